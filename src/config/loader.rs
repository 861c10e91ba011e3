//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `CYCLEA_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `CYCLEA_SERVER__PORT=8080`
/// - `CYCLEA_SERVER__MODE=development`
/// - `CYCLEA_POLLING__INTERVAL_MS=1000`
///
/// 服务凭证不在这里加载，见 `EnvCredentials`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.max_upload_size", 10 * 1024 * 1024)?
        .set_default("server.request_timeout_secs", 300)?
        .set_default("server.mode", "production")?
        .set_default("vision.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("vision.model", "gemini-1.5-flash")?
        .set_default("vision.timeout_secs", 60)?
        .set_default("vision.api_key_env", "GOOGLE_API_KEY")?
        .set_default("generation.base_url", "https://api.deapi.ai")?
        .set_default("generation.timeout_secs", 60)?
        .set_default("generation.api_key_env", "DEAPI_API_KEY")?
        .set_default("polling.max_attempts", 60)?
        .set_default("polling.interval_ms", 2000)?
        .set_default("fetch.timeout_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），例如 CYCLEA_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("CYCLEA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.vision.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Vision base URL cannot be empty".to_string(),
        ));
    }

    if config.generation.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Generation base URL cannot be empty".to_string(),
        ));
    }

    if config.polling.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "Polling max_attempts must be at least 1".to_string(),
        ));
    }

    // 轮询预算必须小于整体请求时限
    let budget = config.polling.poll_policy().budget();
    let ceiling = Duration::from_secs(config.server.request_timeout_secs);
    if budget >= ceiling {
        return Err(ConfigError::ValidationError(format!(
            "Polling budget ({}s) must fit inside request timeout ({}s)",
            budget.as_secs(),
            ceiling.as_secs()
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Mode: {:?}", config.server.mode);
    tracing::info!("Request Timeout: {}s", config.server.request_timeout_secs);
    tracing::info!("Max Upload Size: {} bytes", config.server.max_upload_size);
    tracing::info!("Vision: {} ({})", config.vision.base_url, config.vision.model);
    tracing::info!(
        "Vision API Key: {} (env {})",
        key_state(&config.vision.api_key_env, config.vision.api_key.as_deref()),
        config.vision.api_key_env
    );
    tracing::info!("Generation: {}", config.generation.base_url);
    tracing::info!(
        "Generation API Key: {} (env {})",
        key_state(
            &config.generation.api_key_env,
            config.generation.api_key.as_deref()
        ),
        config.generation.api_key_env
    );
    tracing::info!(
        "Polling: {} attempts every {}ms",
        config.polling.max_attempts,
        config.polling.interval_ms
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

fn key_state(env_var: &str, configured: Option<&str>) -> &'static str {
    if std::env::var(env_var).is_ok() || configured.is_some() {
        "set"
    } else {
        "missing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_generation_url() {
        let mut config = AppConfig::default();
        config.generation.base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_attempts() {
        let mut config = AppConfig::default();
        config.polling.max_attempts = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_when_polling_exceeds_request_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 60;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\nmode = \"development\"\n\n[polling]\ninterval_ms = 1000"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(!config.server.mode.is_production());
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(config.polling.max_attempts, 60);
    }
}
