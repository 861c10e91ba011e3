//! HTTP Middleware
//!
//! 响应状态日志：4xx 记 warn，5xx 记 error，504 单独标记为生成超时

use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};

/// HTTP 状态码错误日志中间件
///
/// 只记录方法、路径、状态码和耗时；错误消息本身在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status == StatusCode::GATEWAY_TIMEOUT {
        tracing::error!(
            method = %method,
            path = %path,
            elapsed_ms,
            "Generation request timed out"
        );
    } else if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::TIMEOUT_MESSAGE;
    use crate::infrastructure::http::error::ApiError;
    use axum::{
        body::{to_bytes, Body},
        http::Request as HttpRequest,
        routing::post,
        Router,
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_router() -> Router {
        Router::new()
            .route(
                "/invalid",
                post(|| async { ApiError::BadRequest("missing image".to_string()) }),
            )
            .route(
                "/rejected",
                post(|| async {
                    ApiError::Upstream {
                        status: 402,
                        message: "Insufficient balance".to_string(),
                    }
                }),
            )
            .route(
                "/timeout",
                post(|| async { ApiError::GatewayTimeout(TIMEOUT_MESSAGE.to_string()) }),
            )
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn call(uri: &str) -> (StatusCode, Value) {
        let request = HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = create_test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_validation_error_body_is_untouched() {
        let (status, body) = call("/invalid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "missing image"}));
    }

    #[tokio::test]
    async fn test_forwarded_upstream_status_is_untouched() {
        let (status, body) = call("/rejected").await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["error"], "Insufficient balance");
    }

    #[tokio::test]
    async fn test_timeout_response_is_untouched() {
        let (status, body) = call("/timeout").await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body, json!({"error": TIMEOUT_MESSAGE}));
    }

    #[tokio::test]
    async fn test_unknown_route_passes_through() {
        let (status, _) = call("/api/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
