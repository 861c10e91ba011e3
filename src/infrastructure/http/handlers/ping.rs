//! Ping Handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::infrastructure::http::state::AppState;

/// 健康检查响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 运行模式，决定错误响应是否附带 details
    pub mode: &'static str,
    /// 单个生成请求的时限（秒）
    pub request_timeout_secs: u64,
}

/// 健康检查，不调用任何外部服务
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.mode.as_str(),
        request_timeout_secs: state.request_timeout.as_secs(),
    })
}
