//! HTTP Image Fetcher - 下载远程参考图片
//!
//! 实现 ImageFetcherPort trait

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{FetchError, FetchedImage, ImageFetcherPort};

/// 下载器配置
#[derive(Debug, Clone)]
pub struct HttpImageFetcherConfig {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 图片大小上限（字节），与上传大小上限一致
    pub max_bytes: usize,
}

impl Default for HttpImageFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// 远程图片下载器
pub struct HttpImageFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    pub fn new(config: HttpImageFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
        })
    }

    fn too_large(&self, size: u64) -> FetchError {
        FetchError::InvalidResponse(format!(
            "Image too large: {} bytes exceeds limit of {} bytes",
            size, self.max_bytes
        ))
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(declared) = response.content_length() {
            if declared > self.max_bytes as u64 {
                return Err(self.too_large(declared));
            }
        }

        // Content-Length 可能缺失或不准确，按块读取时再检查一次
        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("Failed to read image: {}", e)))?
        {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large((bytes.len() + chunk.len()) as u64));
            }
            bytes.extend_from_slice(&chunk);
        }

        tracing::debug!(
            url = %url,
            size = bytes.len(),
            content_type = ?content_type,
            "Reference image downloaded"
        );

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}
