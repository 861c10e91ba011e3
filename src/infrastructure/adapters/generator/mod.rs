//! Generator Adapter - 图片生成服务客户端

mod deapi_client;

pub use deapi_client::*;
