//! Data Transfer Objects

use serde::Deserialize;

use crate::application::{GenerateGarment, ImageSource};

/// JSON 形式的生成请求
///
/// 字段缺失不在反序列化阶段报错，由应用层给出统一的校验错误
#[derive(Debug, Default, Deserialize)]
pub struct GenerateJsonRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    /// 参考图片 URL 列表，只使用第一个
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl GenerateJsonRequest {
    pub fn into_command(self) -> GenerateGarment {
        GenerateGarment {
            instruction: self.prompt,
            image: self
                .images
                .and_then(|urls| urls.into_iter().next())
                .map(|url| ImageSource::Remote { url }),
        }
    }
}
