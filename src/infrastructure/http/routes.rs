//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping      GET   健康检查
//! - /api/generar   POST  根据面料图片和指令生成服装图片

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/generar", post(handlers::generate_garment))
}
