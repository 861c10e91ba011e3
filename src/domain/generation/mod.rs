//! Generation Context - 生成限界上下文
//!
//! 职责:
//! - 生成请求、面料描述、提示词等值对象
//! - 生成任务及其状态迁移
//! - 状态查询结果分类

mod errors;
mod job;
mod params;
mod status;
mod value_objects;

pub use errors::GenerationDomainError;
pub use job::{GenerationJob, JobState};
pub use params::{
    GenerationParams, GENERATION_GUIDANCE, GENERATION_HEIGHT, GENERATION_MODEL, GENERATION_STEPS,
    GENERATION_WIDTH, SEED_UPPER_BOUND,
};
pub use status::{
    classify_http_status, classify_payload, HttpStatusClass, JobStatusPayload, PollOutcome,
    GENERIC_FAILURE_MESSAGE,
};
pub use value_objects::{ComposedPrompt, FabricDescription, GenerationRequest, DEFAULT_MIME_TYPE};
