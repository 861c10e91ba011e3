//! Vision Adapter - 视觉分析服务客户端

mod gemini_vision_client;

pub use gemini_vision_client::*;
