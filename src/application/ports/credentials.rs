//! Credentials Port - 外部服务凭证
//!
//! 每次调用时读取，不在共享状态中缓存

/// 凭证来源
pub trait CredentialsPort: Send + Sync {
    /// 视觉分析服务 API key
    fn vision_api_key(&self) -> Option<String>;

    /// 图片生成服务 API key
    fn generation_api_key(&self) -> Option<String>;
}
