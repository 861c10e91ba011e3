//! Job Poller - 生成任务轮询状态机
//!
//! 固定间隔、固定次数的纯轮询。第一次查询前不等待；404、其它非 2xx、网络错误
//! 都只消耗一次尝试次数，不会中断轮询

use std::sync::Arc;
use std::time::Duration;

use crate::application::error::GenerationError;
use crate::application::ports::ImageGeneratorPort;
use crate::domain::generation::{
    classify_http_status, classify_payload, GenerationJob, HttpStatusClass, PollOutcome,
};

/// 默认最大查询次数
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;
/// 默认查询间隔
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// 轮询策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollPolicy {
    /// 轮询最多消耗的等待时间
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

/// 轮询状态机
pub struct JobPoller {
    generator: Arc<dyn ImageGeneratorPort>,
    policy: PollPolicy,
}

impl JobPoller {
    pub fn new(generator: Arc<dyn ImageGeneratorPort>, policy: PollPolicy) -> Self {
        Self { generator, policy }
    }

    /// 驱动任务直到终止状态（Completed / Failed / TimedOut）
    pub async fn run(
        &self,
        api_key: &str,
        mut job: GenerationJob,
    ) -> Result<GenerationJob, GenerationError> {
        for attempt in 1..=self.policy.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.interval).await;
            }
            job.record_attempt();

            tracing::debug!(job_id = %job.id(), attempt, "Querying job status");

            let response = match self.generator.fetch_status(api_key, job.id()).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(job_id = %job.id(), attempt, error = %e, "Status query failed");
                    continue;
                }
            };

            match classify_http_status(response.http_status) {
                HttpStatusClass::Success => {}
                HttpStatusClass::NotMaterialized => {
                    tracing::debug!(job_id = %job.id(), attempt, "Job not available yet (404)");
                    continue;
                }
                HttpStatusClass::Transient => {
                    tracing::warn!(
                        job_id = %job.id(),
                        attempt,
                        status = response.http_status,
                        "Status query returned an error status"
                    );
                    continue;
                }
            }

            let Some(payload) = response.payload else {
                tracing::debug!(job_id = %job.id(), attempt, "Status response without data");
                continue;
            };

            match classify_payload(&payload) {
                PollOutcome::Pending { progress } => {
                    tracing::info!(
                        job_id = %job.id(),
                        attempt,
                        status = payload.status.as_deref().unwrap_or("unknown"),
                        progress = ?progress,
                        "Job still running"
                    );
                    job.mark_pending(progress)?;
                }
                PollOutcome::Completed { reference } => {
                    tracing::info!(
                        job_id = %job.id(),
                        attempt,
                        image_url = %reference,
                        "Job completed"
                    );
                    job.complete(reference)?;
                    return Ok(job);
                }
                PollOutcome::Failed { error } => {
                    tracing::warn!(job_id = %job.id(), attempt, error = %error, "Job failed");
                    job.fail(error)?;
                    return Ok(job);
                }
            }
        }

        tracing::warn!(
            job_id = %job.id(),
            attempts = job.attempts(),
            "Polling budget exhausted"
        );
        job.time_out()?;
        Ok(job)
    }
}
