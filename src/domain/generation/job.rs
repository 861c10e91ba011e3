//! Generation Context - Job
//!
//! 生成任务只存在于发起它的请求生命周期内，状态迁移只由轮询状态机驱动

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::GenerationDomainError;

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// 已提交，尚未查询
    Submitted,
    /// 生成中
    Pending,
    /// 已完成（拿到结果引用）
    Completed,
    /// 服务端报告失败
    Failed,
    /// 轮询预算耗尽
    TimedOut,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Submitted => "submitted",
            JobState::Pending => "pending",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
            JobState::TimedOut => "timed_out",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Failed | JobState::TimedOut
        )
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生成任务
#[derive(Debug, Clone)]
pub struct GenerationJob {
    id: String,
    state: JobState,
    result_reference: Option<String>,
    error: Option<String>,
    progress: Option<f64>,
    attempts: u32,
    submitted_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl GenerationJob {
    /// 以服务端返回的任务 ID 创建任务，初始状态 Submitted
    pub fn submitted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: JobState::Submitted,
            result_reference: None,
            error: None,
            progress: None,
            attempts: 0,
            submitted_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn result_reference(&self) -> Option<&str> {
        self.result_reference.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress(&self) -> Option<f64> {
        self.progress
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// 从提交到进入终止状态的耗时；未终止时为 None
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.submitted_at)
    }

    /// 记录一次状态查询
    pub fn record_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    pub fn mark_pending(&mut self, progress: Option<f64>) -> Result<(), GenerationDomainError> {
        self.transition(JobState::Pending)?;
        if progress.is_some() {
            self.progress = progress;
        }
        Ok(())
    }

    pub fn complete(&mut self, reference: impl Into<String>) -> Result<(), GenerationDomainError> {
        self.transition(JobState::Completed)?;
        self.result_reference = Some(reference.into());
        Ok(())
    }

    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), GenerationDomainError> {
        self.transition(JobState::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    pub fn time_out(&mut self) -> Result<(), GenerationDomainError> {
        self.transition(JobState::TimedOut)
    }

    fn transition(&mut self, to: JobState) -> Result<(), GenerationDomainError> {
        if self.state.is_terminal() || to == JobState::Submitted {
            return Err(GenerationDomainError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        if to.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_is_submitted() {
        let job = GenerationJob::submitted("req-1");
        assert_eq!(job.id(), "req-1");
        assert_eq!(job.state(), JobState::Submitted);
        assert_eq!(job.attempts(), 0);
        assert!(job.finished_at().is_none());
    }

    #[test]
    fn test_pending_then_completed() {
        let mut job = GenerationJob::submitted("req-1");
        job.mark_pending(Some(12.5)).unwrap();
        job.mark_pending(None).unwrap();
        assert_eq!(job.progress(), Some(12.5));

        job.complete("https://x/img.png").unwrap();
        assert_eq!(job.state(), JobState::Completed);
        assert_eq!(job.result_reference(), Some("https://x/img.png"));
        assert!(job.finished_at().is_some());
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut job = GenerationJob::submitted("req-1");
        job.fail("nsfw").unwrap();
        assert_eq!(job.error(), Some("nsfw"));

        let err = job.mark_pending(None).unwrap_err();
        assert_eq!(
            err,
            GenerationDomainError::InvalidTransition {
                from: JobState::Failed,
                to: JobState::Pending,
            }
        );
        assert!(job.time_out().is_err());
    }

    #[test]
    fn test_time_out_from_submitted() {
        let mut job = GenerationJob::submitted("req-1");
        job.time_out().unwrap();
        assert_eq!(job.state(), JobState::TimedOut);
        assert!(job.state().is_terminal());
    }

    #[test]
    fn test_elapsed_only_after_terminal_state() {
        let mut job = GenerationJob::submitted("req-1");
        job.mark_pending(Some(40.0)).unwrap();
        assert!(job.elapsed().is_none());

        job.complete("https://x/img.png").unwrap();
        let elapsed = job.elapsed().unwrap();
        assert!(elapsed >= chrono::Duration::zero());
        assert_eq!(job.finished_at(), Some(job.submitted_at() + elapsed));
    }

    #[test]
    fn test_record_attempt_counts() {
        let mut job = GenerationJob::submitted("req-1");
        assert_eq!(job.record_attempt(), 1);
        assert_eq!(job.record_attempt(), 2);
        assert_eq!(job.attempts(), 2);
    }
}
