//! Image Generator Port - 异步图片生成服务抽象
//!
//! 提交返回任务 ID，之后按 ID 查询状态

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::{GenerationParams, JobStatusPayload};

/// 生成服务错误
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    /// 服务端拒绝（非 2xx），`message` 已从响应体中提取
    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Response did not contain a request_id")]
    MissingJobId,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 一次状态查询的原始结果
///
/// 非 2xx 也通过 Ok 返回，由调用方按状态码分类
#[derive(Debug, Clone, PartialEq)]
pub struct StatusResponse {
    pub http_status: u16,
    /// 2xx 且带有 `data` 对象时存在
    pub payload: Option<JobStatusPayload>,
}

/// Image Generator Port
#[async_trait]
pub trait ImageGeneratorPort: Send + Sync {
    /// 提交生成任务，返回服务端任务 ID
    async fn submit(&self, api_key: &str, params: &GenerationParams)
        -> Result<String, GeneratorError>;

    /// 查询任务状态
    async fn fetch_status(&self, api_key: &str, job_id: &str)
        -> Result<StatusResponse, GeneratorError>;
}
