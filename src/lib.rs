//! Cyclea - 面料图片驱动的服装图片生成服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Generation: 生成请求、任务状态机、生成参数、状态分类
//! - Prompt Composer: 提示词组装
//!
//! 应用层 (application/):
//! - Ports: 端口定义（FabricVision, ImageGenerator, ImageFetcher, Credentials, SeedSource）
//! - Services: 输入规整、面料描述、轮询、结果映射
//! - Commands: GenerateGarment 命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: Gemini 视觉客户端、deAPI 客户端、图片下载、凭证、随机种子

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
