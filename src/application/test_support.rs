//! 测试用内存端口实现

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    CredentialsPort, FabricVisionPort, FetchError, FetchedImage, GeneratorError,
    ImageFetcherPort, ImageGeneratorPort, SeedSource, StatusResponse, VisionCall, VisionError,
};
use crate::domain::generation::{GenerationParams, JobStatusPayload};

/// 固定凭证
pub struct StaticCredentials {
    pub vision: Option<String>,
    pub generation: Option<String>,
}

impl StaticCredentials {
    pub fn both() -> Self {
        Self {
            vision: Some("vision-key".to_string()),
            generation: Some("generation-key".to_string()),
        }
    }
}

impl CredentialsPort for StaticCredentials {
    fn vision_api_key(&self) -> Option<String> {
        self.vision.clone()
    }

    fn generation_api_key(&self) -> Option<String> {
        self.generation.clone()
    }
}

/// 固定种子
pub struct FixedSeed(pub u32);

impl SeedSource for FixedSeed {
    fn next_seed(&self) -> u32 {
        self.0
    }
}

/// 按脚本依次返回结果的视觉服务
#[derive(Default)]
pub struct ScriptedVision {
    replies: Mutex<VecDeque<Result<String, VisionError>>>,
    pub instructions: Mutex<Vec<String>>,
    pub images: Mutex<Vec<(Vec<u8>, String)>>,
}

impl ScriptedVision {
    pub fn new(replies: Vec<Result<String, VisionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            instructions: Mutex::new(Vec::new()),
            images: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.instructions.lock().unwrap().len()
    }
}

#[async_trait]
impl FabricVisionPort for ScriptedVision {
    async fn analyze(&self, _api_key: &str, call: VisionCall<'_>) -> Result<String, VisionError> {
        self.instructions
            .lock()
            .unwrap()
            .push(call.instruction.to_string());
        self.images
            .lock()
            .unwrap()
            .push((call.image_bytes.to_vec(), call.mime_type.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(VisionError::ServiceError("unavailable".to_string())))
    }
}

/// 按脚本依次返回状态的生成服务；脚本用完后一直返回 pending
pub struct ScriptedGenerator {
    submit_reply: Mutex<Option<Result<String, GeneratorError>>>,
    statuses: Mutex<VecDeque<Result<StatusResponse, GeneratorError>>>,
    pub submitted: Mutex<Vec<GenerationParams>>,
    pub status_calls: Mutex<u32>,
}

impl ScriptedGenerator {
    pub fn new(statuses: Vec<Result<StatusResponse, GeneratorError>>) -> Self {
        Self {
            submit_reply: Mutex::new(Some(Ok("req-1".to_string()))),
            statuses: Mutex::new(statuses.into()),
            submitted: Mutex::new(Vec::new()),
            status_calls: Mutex::new(0),
        }
    }

    pub fn rejecting_submit(err: GeneratorError) -> Self {
        let generator = Self::new(Vec::new());
        *generator.submit_reply.lock().unwrap() = Some(Err(err));
        generator
    }

    pub fn status_calls(&self) -> u32 {
        *self.status_calls.lock().unwrap()
    }
}

#[async_trait]
impl ImageGeneratorPort for ScriptedGenerator {
    async fn submit(
        &self,
        _api_key: &str,
        params: &GenerationParams,
    ) -> Result<String, GeneratorError> {
        self.submitted.lock().unwrap().push(params.clone());
        self.submit_reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok("req-1".to_string()))
    }

    async fn fetch_status(
        &self,
        _api_key: &str,
        _job_id: &str,
    ) -> Result<StatusResponse, GeneratorError> {
        *self.status_calls.lock().unwrap() += 1;
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(status_body("pending")))
    }
}

/// 下载器：固定返回给定结果
pub struct StubFetcher {
    reply: Mutex<Option<Result<FetchedImage, FetchError>>>,
    pub urls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(reply: Result<FetchedImage, FetchError>) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn image(bytes: &[u8], content_type: Option<&str>) -> Self {
        Self::new(Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type: content_type.map(str::to_string),
        }))
    }
}

#[async_trait]
impl ImageFetcherPort for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(FetchError::NetworkError("no reply".to_string())))
    }
}

/// 2xx 且只带 status 的响应
pub fn status_body(status: &str) -> StatusResponse {
    StatusResponse {
        http_status: 200,
        payload: Some(JobStatusPayload {
            status: Some(status.to_string()),
            ..Default::default()
        }),
    }
}

/// 只有状态码、没有响应体的响应
pub fn status_code(code: u16) -> StatusResponse {
    StatusResponse {
        http_status: code,
        payload: None,
    }
}
