//! Generation Context - Value Objects

use serde::Serialize;

use super::GenerationDomainError;

/// 未提供 Content-Type 时使用的默认图片类型
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// 一次生成请求（每个调用创建一次，不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    instruction: String,
    image_bytes: Vec<u8>,
    mime_type: String,
}

impl GenerationRequest {
    /// 创建生成请求
    ///
    /// 指令（去除首尾空白后）与图片字节都不能为空；mime 为空时回退为 `image/jpeg`
    pub fn new(
        instruction: impl Into<String>,
        image_bytes: Vec<u8>,
        mime_type: impl Into<String>,
    ) -> Result<Self, GenerationDomainError> {
        let instruction = instruction.into();
        if instruction.trim().is_empty() {
            return Err(GenerationDomainError::MissingInstruction);
        }
        if image_bytes.is_empty() {
            return Err(GenerationDomainError::MissingImage);
        }

        let mime_type = mime_type.into();
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE.to_string()
        } else {
            mime_type
        };

        Ok(Self {
            instruction,
            image_bytes,
            mime_type,
        })
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn image_bytes(&self) -> &[u8] {
        &self.image_bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// 面料描述
///
/// `degraded = true` 表示视觉分析不可用时使用的通用描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabricDescription {
    pub text: String,
    pub degraded: bool,
}

impl FabricDescription {
    /// 视觉分析不可用或失败时使用的通用描述
    pub const FALLBACK_TEXT: &'static str =
        "colores, textura y patrones de la tela de la imagen de referencia";

    pub fn analyzed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: false,
        }
    }

    pub fn fallback() -> Self {
        Self {
            text: Self::FALLBACK_TEXT.to_string(),
            degraded: true,
        }
    }

    /// 字符数（非字节数）
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// 最终提交给生成服务的正/负提示词
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedPrompt {
    pub positive: String,
    pub negative: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_instruction() {
        let err = GenerationRequest::new("   ", vec![1, 2, 3], "image/png").unwrap_err();
        assert_eq!(err, GenerationDomainError::MissingInstruction);
        assert_eq!(err.to_string(), "missing instruction");
    }

    #[test]
    fn test_request_requires_image_bytes() {
        let err = GenerationRequest::new("Genera una remera", Vec::new(), "image/png").unwrap_err();
        assert_eq!(err, GenerationDomainError::MissingImage);
    }

    #[test]
    fn test_request_defaults_mime_type() {
        let request = GenerationRequest::new("Genera una remera", vec![0xff], "").unwrap();
        assert_eq!(request.mime_type(), DEFAULT_MIME_TYPE);
        assert_eq!(request.image_bytes(), &[0xff]);
    }

    #[test]
    fn test_fallback_description_is_degraded() {
        let description = FabricDescription::fallback();
        assert!(description.degraded);
        assert_eq!(description.text, FabricDescription::FALLBACK_TEXT);
    }

    #[test]
    fn test_char_len_counts_characters() {
        let description = FabricDescription::analyzed("añil");
        assert_eq!(description.char_len(), 4);
    }
}
