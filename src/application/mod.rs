//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（视觉分析、图片生成、图片下载、凭证、种子）
//! - services: 流水线各阶段（输入规整、面料描述、轮询状态机、结果映射）
//! - commands: 生成命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{handlers::GenerateGarmentHandler, GenerateGarment, GeneratedImage, ImageSource};

pub use error::{GenerationError, TIMEOUT_MESSAGE};

pub use ports::{
    CredentialsPort, FabricVisionPort, FetchError, FetchedImage, GeneratorError,
    ImageFetcherPort, ImageGeneratorPort, SeedSource, StatusResponse, VisionCall, VisionError,
};

pub use services::{PollPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
