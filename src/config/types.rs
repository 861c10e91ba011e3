//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::application::PollPolicy;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 视觉分析服务配置
    #[serde(default)]
    pub vision: VisionConfig,

    /// 图片生成服务配置
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 轮询配置
    #[serde(default)]
    pub polling: PollingConfig,

    /// 远程图片下载配置
    #[serde(default)]
    pub fetch: FetchConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 运行模式
///
/// 非 production 模式下错误响应会附带诊断信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Development,
    #[default]
    Production,
}

impl RunMode {
    pub fn is_production(&self) -> bool {
        matches!(self, RunMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体最大大小（字节），默认 10MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,

    /// 单个生成请求的整体时限（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 运行模式
    #[serde(default)]
    pub mode: RunMode,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024 // 10 MB
}

fn default_request_timeout() -> u64 {
    300 // 5 分钟
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_size: default_max_upload_size(),
            request_timeout_secs: default_request_timeout(),
            mode: RunMode::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 视觉分析服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    /// 服务基础 URL
    #[serde(default = "default_vision_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_vision_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,

    /// 存放 API key 的环境变量名（每次调用时读取）
    #[serde(default = "default_vision_key_env")]
    pub api_key_env: String,

    /// 环境变量未设置时使用的 API key
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_vision_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_vision_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_vision_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_service_timeout() -> u64 {
    60
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: default_vision_url(),
            model: default_vision_model(),
            timeout_secs: default_service_timeout(),
            api_key_env: default_vision_key_env(),
            api_key: None,
        }
    }
}

/// 图片生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// 服务基础 URL
    #[serde(default = "default_generation_url")]
    pub base_url: String,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_service_timeout")]
    pub timeout_secs: u64,

    /// 存放 API key 的环境变量名（每次调用时读取）
    #[serde(default = "default_generation_key_env")]
    pub api_key_env: String,

    /// 环境变量未设置时使用的 API key
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_generation_url() -> String {
    "https://api.deapi.ai".to_string()
}

fn default_generation_key_env() -> String {
    "DEAPI_API_KEY".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_generation_url(),
            timeout_secs: default_service_timeout(),
            api_key_env: default_generation_key_env(),
            api_key: None,
        }
    }
}

/// 轮询配置
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// 最大查询次数
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 查询间隔（毫秒）
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_max_attempts() -> u32 {
    60
}

fn default_interval_ms() -> u64 {
    2000
}

impl PollingConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

/// 远程图片下载配置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

fn default_fetch_timeout() -> u64 {
    30
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
