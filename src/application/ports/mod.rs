//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod credentials;
mod fabric_vision;
mod image_fetcher;
mod image_generator;
mod seed_source;

pub use credentials::CredentialsPort;
pub use fabric_vision::{FabricVisionPort, VisionCall, VisionError};
pub use image_fetcher::{FetchError, FetchedImage, ImageFetcherPort};
pub use image_generator::{GeneratorError, ImageGeneratorPort, StatusResponse};
pub use seed_source::SeedSource;
