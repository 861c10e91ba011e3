//! Generate HTTP Handler
//!
//! 同一个端点接受两种请求体：
//! - multipart/form-data：`prompt` 文本字段 + `images` 文件字段（只取第一个）
//! - application/json：`{"prompt": "...", "images": ["https://..."]}`（只取第一个 URL）

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::application::{GenerateGarment, GeneratedImage, GenerationError, ImageSource};
use crate::infrastructure::http::dto::GenerateJsonRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成服装图片
pub async fn generate_garment(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<GeneratedImage>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", request_id = %request_id);

    run(state, request).instrument(span).await
}

/// 整体时限同时覆盖请求体读取与生成流水线
async fn run(state: Arc<AppState>, request: Request) -> Result<Json<GeneratedImage>, ApiError> {
    match tokio::time::timeout(state.request_timeout, process(&state, request)).await {
        Ok(result) => result.map(Json),
        Err(_) => {
            tracing::warn!(
                timeout_secs = state.request_timeout.as_secs(),
                "Request exceeded its time limit"
            );
            Err(ApiError::from_generation(GenerationError::JobTimedOut, state.mode))
        }
    }
}

async fn process(state: &AppState, request: Request) -> Result<GeneratedImage, ApiError> {
    let cmd = read_command(request).await?;
    tracing::info!(
        has_instruction = cmd.instruction.is_some(),
        has_image = cmd.image.is_some(),
        "Generation request received"
    );

    match state.generate_handler.handle(cmd).await {
        Ok(image) => {
            tracing::info!(job_id = %image.job_id, attempts = image.attempts, "Generation succeeded");
            Ok(image)
        }
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "Generation failed");
            Err(ApiError::from_generation(err, state.mode))
        }
    }
}

/// 按 Content-Type 选择解析方式
async fn read_command(request: Request) -> Result<GenerateGarment, ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        read_multipart(multipart).await
    } else {
        let Json(body) = Json::<GenerateJsonRequest>::from_request(request, &())
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(body.into_command())
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<GenerateGarment, ApiError> {
    let mut cmd = GenerateGarment::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "prompt" => {
                cmd.instruction = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read prompt: {}", e))
                })?);
            }
            "images" if cmd.image.is_none() => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read image: {}", e))
                })?;
                cmd.image = Some(ImageSource::Upload {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            _ => {}
        }
    }

    Ok(cmd)
}
