//! 应用层错误定义
//!
//! 生成流水线的错误分类。视觉分析阶段的错误在描述服务内部被吸收，不会出现在这里

use thiserror::Error;

use crate::application::ports::{FetchError, GeneratorError};
use crate::domain::generation::GenerationDomainError;

/// 轮询超时时返回给调用方的固定文本
pub const TIMEOUT_MESSAGE: &str = "Generation is taking longer than expected";

/// 生成流水线错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 调用方输入缺失或格式错误
    #[error("{0}")]
    Validation(String),

    /// 缺少外部服务凭证
    #[error("{0}")]
    Configuration(String),

    /// 远程参考图片下载失败
    #[error("Could not download the reference image: {0}")]
    UpstreamFetch(String),

    /// 生成服务拒绝了提交请求，状态码原样转发
    #[error("Image generation request rejected: {message}")]
    UpstreamSubmission { status: u16, message: String },

    /// 生成服务返回了成功状态但响应体不符合约定
    #[error("Malformed response from image generation service: {0}")]
    UpstreamProtocol(String),

    /// 服务端报告生成失败
    #[error("{0}")]
    JobFailed(String),

    /// 轮询预算或整体时限耗尽
    #[error("{}", TIMEOUT_MESSAGE)]
    JobTimedOut,

    /// 其它未归类的外部调用失败
    #[error("Image generation failed: {0}")]
    Unexpected(String),
}

impl GenerationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// 错误类别名（用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Configuration(_) => "configuration",
            Self::UpstreamFetch(_) => "upstream_fetch",
            Self::UpstreamSubmission { .. } => "upstream_submission",
            Self::UpstreamProtocol(_) => "upstream_protocol",
            Self::JobFailed(_) => "job_failed",
            Self::JobTimedOut => "job_timed_out",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

impl From<GenerationDomainError> for GenerationError {
    fn from(err: GenerationDomainError) -> Self {
        match err {
            GenerationDomainError::MissingInstruction | GenerationDomainError::MissingImage => {
                Self::Validation(err.to_string())
            }
            GenerationDomainError::InvalidTransition { .. } => Self::Unexpected(err.to_string()),
        }
    }
}

impl From<FetchError> for GenerationError {
    fn from(err: FetchError) -> Self {
        Self::UpstreamFetch(err.to_string())
    }
}

impl From<GeneratorError> for GenerationError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Rejected { status, message } => {
                Self::UpstreamSubmission { status, message }
            }
            GeneratorError::MissingJobId => Self::UpstreamProtocol(err.to_string()),
            GeneratorError::InvalidResponse(msg) => Self::UpstreamProtocol(msg),
            GeneratorError::NetworkError(_) | GeneratorError::Timeout => {
                Self::Unexpected(err.to_string())
            }
        }
    }
}
