//! HTTP Error Handling
//!
//! 错误响应格式: `{"error": "...", "details"?: "..."}`，HTTP 状态码即错误类别

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::GenerationError;
use crate::config::RunMode;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
    GatewayTimeout(String),
    /// 上游服务的状态码原样转发
    Upstream { status: u16, message: String },
    /// 附带诊断信息（仅非 production 模式）
    Detailed { error: Box<ApiError>, details: String },
}

impl ApiError {
    /// 把流水线错误映射为 API 错误，非 production 模式附带诊断信息
    pub fn from_generation(err: GenerationError, mode: RunMode) -> Self {
        let details = format!("{:?}", err);
        let api_error = Self::from(err);
        if mode.is_production() {
            api_error
        } else {
            ApiError::Detailed {
                error: Box::new(api_error),
                details,
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Detailed { error, .. } => error.status(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Internal(msg)
            | ApiError::GatewayTimeout(msg)
            | ApiError::Upstream { message: msg, .. } => msg,
            ApiError::Detailed { error, .. } => error.message(),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::Detailed { details, .. } => Some(details.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.message(), "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.message(), "Request rejected");
        }

        let body = ErrorResponse {
            error: self.message().to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Validation(msg) => ApiError::BadRequest(msg),
            GenerationError::UpstreamSubmission { status, .. } => ApiError::Upstream {
                status,
                message: e.to_string(),
            },
            GenerationError::JobTimedOut => ApiError::GatewayTimeout(e.to_string()),
            GenerationError::Configuration(_)
            | GenerationError::UpstreamFetch(_)
            | GenerationError::UpstreamProtocol(_)
            | GenerationError::JobFailed(_)
            | GenerationError::Unexpected(_) => ApiError::Internal(e.to_string()),
        }
    }
}
