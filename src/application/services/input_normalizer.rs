//! Input Normalizer - 输入规整
//!
//! 把 multipart 上传或 JSON(远程 URL) 两种形式统一为 `GenerationRequest`

use std::sync::Arc;

use crate::application::commands::{GenerateGarment, ImageSource};
use crate::application::error::GenerationError;
use crate::application::ports::ImageFetcherPort;
use crate::domain::generation::{GenerationDomainError, GenerationRequest, DEFAULT_MIME_TYPE};

/// 通过字段存在性校验的输入（远程图片尚未下载）
#[derive(Debug, Clone)]
pub struct ValidatedInput {
    pub instruction: String,
    pub image: ImageSource,
}

/// 校验必填字段，不做任何外部调用
pub fn validate_input(cmd: GenerateGarment) -> Result<ValidatedInput, GenerationError> {
    let instruction = cmd
        .instruction
        .filter(|s| !s.trim().is_empty())
        .ok_or(GenerationDomainError::MissingInstruction)?;

    let image = match cmd.image {
        Some(ImageSource::Upload { bytes, .. }) if bytes.is_empty() => None,
        Some(ImageSource::Remote { url }) if url.trim().is_empty() => None,
        other => other,
    }
    .ok_or(GenerationDomainError::MissingImage)?;

    Ok(ValidatedInput { instruction, image })
}

/// 输入规整器
pub struct InputNormalizer {
    fetcher: Arc<dyn ImageFetcherPort>,
}

impl InputNormalizer {
    pub fn new(fetcher: Arc<dyn ImageFetcherPort>) -> Self {
        Self { fetcher }
    }

    /// 取得图片字节（远程图片在此下载）并构造 `GenerationRequest`
    pub async fn materialize(
        &self,
        input: ValidatedInput,
    ) -> Result<GenerationRequest, GenerationError> {
        let (bytes, content_type) = match input.image {
            ImageSource::Upload {
                bytes,
                content_type,
            } => (bytes, content_type),
            ImageSource::Remote { url } => {
                let url = url.trim();
                tracing::info!(url = %url, "Downloading reference image");
                let fetched = self.fetcher.fetch(url).await?;
                if fetched.bytes.is_empty() {
                    return Err(GenerationError::UpstreamFetch(
                        "reference image is empty".to_string(),
                    ));
                }
                (fetched.bytes, fetched.content_type)
            }
        };

        let mime_type = content_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        tracing::debug!(
            image_size = bytes.len(),
            mime_type = %mime_type,
            "Reference image ready"
        );

        Ok(GenerationRequest::new(input.instruction, bytes, mime_type)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FetchError;
    use crate::application::test_support::StubFetcher;

    fn upload(bytes: &[u8], content_type: Option<&str>) -> Option<ImageSource> {
        Some(ImageSource::Upload {
            bytes: bytes.to_vec(),
            content_type: content_type.map(str::to_string),
        })
    }

    #[test]
    fn test_missing_instruction() {
        let err = validate_input(GenerateGarment {
            instruction: Some("  ".to_string()),
            image: upload(&[1], None),
        })
        .unwrap_err();
        assert!(matches!(err, GenerationError::Validation(ref m) if m == "missing instruction"));
    }

    #[test]
    fn test_missing_image() {
        let err = validate_input(GenerateGarment {
            instruction: Some("Genera una remera".to_string()),
            image: None,
        })
        .unwrap_err();
        assert!(matches!(err, GenerationError::Validation(ref m) if m == "missing image"));

        let err = validate_input(GenerateGarment {
            instruction: Some("Genera una remera".to_string()),
            image: upload(&[], Some("image/png")),
        })
        .unwrap_err();
        assert!(matches!(err, GenerationError::Validation(ref m) if m == "missing image"));

        let err = validate_input(GenerateGarment {
            instruction: Some("Genera una remera".to_string()),
            image: Some(ImageSource::Remote { url: String::new() }),
        })
        .unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
    }

    #[tokio::test]
    async fn test_upload_keeps_bytes_and_mime() {
        let fetcher = Arc::new(StubFetcher::image(b"unused", None));
        let normalizer = InputNormalizer::new(fetcher.clone());
        let input = validate_input(GenerateGarment {
            instruction: Some("Genera una remera".to_string()),
            image: upload(b"png-bytes", Some("image/png")),
        })
        .unwrap();

        let request = normalizer.materialize(input).await.unwrap();
        assert_eq!(request.instruction(), "Genera una remera");
        assert_eq!(request.image_bytes(), b"png-bytes");
        assert_eq!(request.mime_type(), "image/png");
        assert!(fetcher.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_image_is_fetched_with_default_mime() {
        let fetcher = Arc::new(StubFetcher::image(b"jpeg-bytes", None));
        let normalizer = InputNormalizer::new(fetcher.clone());
        let input = validate_input(GenerateGarment {
            instruction: Some("Genera una remera".to_string()),
            image: Some(ImageSource::Remote {
                url: "https://cdn.example/tela.jpg".to_string(),
            }),
        })
        .unwrap();

        let request = normalizer.materialize(input).await.unwrap();
        assert_eq!(request.image_bytes(), b"jpeg-bytes");
        assert_eq!(request.mime_type(), DEFAULT_MIME_TYPE);
        assert_eq!(
            fetcher.urls.lock().unwrap().as_slice(),
            ["https://cdn.example/tela.jpg".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remote_fetch_failure_is_upstream_fetch_error() {
        let fetcher = Arc::new(StubFetcher::new(Err(FetchError::Status(403))));
        let normalizer = InputNormalizer::new(fetcher);
        let input = ValidatedInput {
            instruction: "Genera una remera".to_string(),
            image: ImageSource::Remote {
                url: "https://cdn.example/tela.jpg".to_string(),
            },
        };

        let err = normalizer.materialize(input).await.unwrap_err();
        assert!(matches!(err, GenerationError::UpstreamFetch(_)));
    }
}
