//! deAPI Client - 异步文生图服务客户端
//!
//! 实现 ImageGeneratorPort trait
//!
//! 外部 API:
//! POST {base_url}/api/v1/client/txt2img                    提交任务，返回 data.request_id
//! GET  {base_url}/api/v1/client/request-status/{id}        查询任务状态
//! 鉴权: Authorization: Bearer {api_key}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{GeneratorError, ImageGeneratorPort, StatusResponse};
use crate::domain::generation::{GenerationParams, JobStatusPayload};

/// 错误响应体截断长度（字符）
const MAX_ERROR_BODY_CHARS: usize = 200;

/// deAPI 客户端配置
#[derive(Debug, Clone)]
pub struct DeapiClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for DeapiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deapi.ai".to_string(),
            timeout_secs: 60,
        }
    }
}

impl DeapiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// deAPI 客户端
pub struct DeapiClient {
    client: Client,
    config: DeapiClientConfig,
}

impl DeapiClient {
    pub fn new(config: DeapiClientConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn submit_url(&self) -> String {
        format!("{}/api/v1/client/txt2img", self.base())
    }

    fn status_url(&self, job_id: &str) -> String {
        format!("{}/api/v1/client/request-status/{}", self.base(), job_id)
    }
}

fn map_send_error(e: reqwest::Error) -> GeneratorError {
    if e.is_timeout() {
        GeneratorError::Timeout
    } else {
        GeneratorError::NetworkError(e.to_string())
    }
}

/// 从失败响应中提取错误信息
///
/// 依次尝试 JSON 的 `error.message` / `message` / `detail`；不是 JSON 时取截断后的原文；
/// 都没有时使用状态码及其原因短语
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let fallback = format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );

    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["/error/message", "/message", "/detail"]
            .iter()
            .find_map(|pointer| {
                json.pointer(pointer)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) if body.trim().is_empty() => fallback,
        Err(_) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

/// 从提交响应中取 `data.request_id`（字符串或数字）
fn extract_job_id(body: &Value) -> Option<String> {
    match body.pointer("/data/request_id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl ImageGeneratorPort for DeapiClient {
    async fn submit(
        &self,
        api_key: &str,
        params: &GenerationParams,
    ) -> Result<String, GeneratorError> {
        tracing::debug!(
            url = %self.submit_url(),
            model = params.model,
            width = params.width,
            height = params.height,
            seed = params.seed,
            "Sending txt2img request"
        );

        let response = self
            .client
            .post(self.submit_url())
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(params)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %error_text, "txt2img request rejected");
            return Err(GeneratorError::Rejected {
                status: status.as_u16(),
                message: extract_error_message(status, &error_text),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        extract_job_id(&body).ok_or(GeneratorError::MissingJobId)
    }

    async fn fetch_status(
        &self,
        api_key: &str,
        job_id: &str,
    ) -> Result<StatusResponse, GeneratorError> {
        let response = self
            .client
            .get(self.status_url(job_id))
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                let error_text = response.text().await.unwrap_or_default();
                tracing::debug!(status = %status, body = %error_text, "Status query error body");
            }
            return Ok(StatusResponse {
                http_status: status.as_u16(),
                payload: None,
            });
        }

        // 只要求响应体是 JSON，`data` 内各字段逐个宽松提取
        let body: Value = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        Ok(StatusResponse {
            http_status: status.as_u16(),
            payload: body
                .get("data")
                .filter(|data| data.is_object())
                .map(JobStatusPayload::from_value),
        })
    }
}
