//! Generate Commands - 生成服装图片

use serde::Serialize;

/// 参考图片来源
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// multipart 上传的文件
    Upload {
        bytes: Vec<u8>,
        content_type: Option<String>,
    },
    /// JSON 请求中的远程 URL
    Remote { url: String },
}

/// 生成命令
///
/// 传输层只负责取出字段，是否缺失由应用层判断
#[derive(Debug, Clone, Default)]
pub struct GenerateGarment {
    pub instruction: Option<String>,
    /// 第一张图片；其余图片在传输层即被忽略
    pub image: Option<ImageSource>,
}

/// 生成结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedImage {
    pub image_url: String,
    #[serde(skip)]
    pub job_id: String,
    #[serde(skip)]
    pub attempts: u32,
}
