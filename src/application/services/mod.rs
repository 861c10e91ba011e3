//! 应用层 - 流水线各阶段服务

mod fabric_describer;
mod input_normalizer;
mod job_poller;
mod result_emitter;

pub use fabric_describer::{
    supplementary_instruction, FabricDescriber, ANALYSIS_INSTRUCTION, SUPPLEMENT_THRESHOLD_CHARS,
};
pub use input_normalizer::{validate_input, InputNormalizer, ValidatedInput};
pub use job_poller::{JobPoller, PollPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use result_emitter::emit_result;
