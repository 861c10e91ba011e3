//! Result Emitter - 终止状态到调用方结果的映射

use crate::application::commands::GeneratedImage;
use crate::application::error::GenerationError;
use crate::domain::generation::{GenerationJob, JobState, GENERIC_FAILURE_MESSAGE};

/// 把终止状态的任务映射为成功结果或错误
pub fn emit_result(job: GenerationJob) -> Result<GeneratedImage, GenerationError> {
    match job.state() {
        JobState::Completed => match job.result_reference() {
            Some(reference) => Ok(GeneratedImage {
                image_url: reference.to_string(),
                job_id: job.id().to_string(),
                attempts: job.attempts(),
            }),
            None => Err(GenerationError::UpstreamProtocol(
                "completed job has no result reference".to_string(),
            )),
        },
        JobState::Failed => Err(GenerationError::JobFailed(
            job.error().unwrap_or(GENERIC_FAILURE_MESSAGE).to_string(),
        )),
        JobState::TimedOut => Err(GenerationError::JobTimedOut),
        state @ (JobState::Submitted | JobState::Pending) => Err(GenerationError::Unexpected(
            format!("job {} is not in a terminal state: {}", job.id(), state),
        )),
    }
}
