//! Fabric Vision Port - 视觉分析服务抽象
//!
//! 单次调用：内联图片 + 文本指令，返回纯文本结果

use async_trait::async_trait;
use thiserror::Error;

/// 视觉服务错误
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    EmptyResponse,
}

/// 一次视觉分析调用
#[derive(Debug, Clone, Copy)]
pub struct VisionCall<'a> {
    pub image_bytes: &'a [u8],
    pub mime_type: &'a str,
    pub instruction: &'a str,
}

/// Fabric Vision Port
#[async_trait]
pub trait FabricVisionPort: Send + Sync {
    /// 发送一次分析请求，返回服务端给出的文本
    async fn analyze(&self, api_key: &str, call: VisionCall<'_>) -> Result<String, VisionError>;
}
