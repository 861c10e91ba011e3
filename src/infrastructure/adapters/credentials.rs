//! Environment Credentials - 按调用读取的服务凭证
//!
//! 每次调用时先读环境变量，未设置时使用配置文件中的值

use crate::application::ports::CredentialsPort;
use crate::config::AppConfig;

/// 单个服务的凭证来源
#[derive(Debug, Clone)]
pub struct CredentialSource {
    /// 环境变量名
    pub env_var: String,
    /// 配置文件中的值
    pub configured: Option<String>,
}

impl CredentialSource {
    pub fn new(env_var: impl Into<String>, configured: Option<String>) -> Self {
        Self {
            env_var: env_var.into(),
            configured,
        }
    }

    pub fn resolve(&self) -> Option<String> {
        std::env::var(&self.env_var)
            .ok()
            .or_else(|| self.configured.clone())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// 环境变量凭证
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    vision: CredentialSource,
    generation: CredentialSource,
}

impl EnvCredentials {
    pub fn new(vision: CredentialSource, generation: CredentialSource) -> Self {
        Self { vision, generation }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            CredentialSource::new(&config.vision.api_key_env, config.vision.api_key.clone()),
            CredentialSource::new(
                &config.generation.api_key_env,
                config.generation.api_key.clone(),
            ),
        )
    }
}

impl CredentialsPort for EnvCredentials {
    fn vision_api_key(&self) -> Option<String> {
        self.vision.resolve()
    }

    fn generation_api_key(&self) -> Option<String> {
        self.generation.resolve()
    }
}
