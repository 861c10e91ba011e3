//! Generate Command Handler - 生成流水线编排
//!
//! 输入规整 → 面料描述 → 提示词组装 → 提交任务 → 轮询 → 结果映射，全程顺序执行

use std::sync::Arc;

use crate::application::commands::{GenerateGarment, GeneratedImage};
use crate::application::error::GenerationError;
use crate::application::ports::{
    CredentialsPort, FabricVisionPort, ImageFetcherPort, ImageGeneratorPort, SeedSource,
};
use crate::application::services::{
    emit_result, validate_input, FabricDescriber, InputNormalizer, JobPoller, PollPolicy,
};
use crate::domain::compose_prompt;
use crate::domain::generation::{GenerationJob, GenerationParams};

/// GenerateGarment Handler
pub struct GenerateGarmentHandler {
    credentials: Arc<dyn CredentialsPort>,
    normalizer: InputNormalizer,
    describer: FabricDescriber,
    generator: Arc<dyn ImageGeneratorPort>,
    poller: JobPoller,
    seeds: Arc<dyn SeedSource>,
}

impl GenerateGarmentHandler {
    pub fn new(
        fetcher: Arc<dyn ImageFetcherPort>,
        vision: Arc<dyn FabricVisionPort>,
        generator: Arc<dyn ImageGeneratorPort>,
        credentials: Arc<dyn CredentialsPort>,
        seeds: Arc<dyn SeedSource>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            normalizer: InputNormalizer::new(fetcher),
            describer: FabricDescriber::new(vision, credentials.clone()),
            poller: JobPoller::new(generator.clone(), policy),
            credentials,
            generator,
            seeds,
        }
    }

    pub async fn handle(&self, cmd: GenerateGarment) -> Result<GeneratedImage, GenerationError> {
        let input = validate_input(cmd)?;

        // 生成服务凭证缺失时不做任何外部调用
        let api_key = self.credentials.generation_api_key().ok_or_else(|| {
            GenerationError::configuration("Image generation API key is not configured")
        })?;

        let request = self.normalizer.materialize(input).await?;
        let description = self.describer.describe(&request).await;

        let prompt = compose_prompt(request.instruction(), &description);
        tracing::debug!(
            degraded = description.degraded,
            prompt_len = prompt.positive.len(),
            "Prompt composed"
        );

        let params = GenerationParams::new(prompt, self.seeds.next_seed());
        tracing::info!(model = params.model, seed = params.seed, "Submitting generation job");

        let job_id = self.generator.submit(&api_key, &params).await?;
        tracing::info!(job_id = %job_id, "Generation job submitted");

        let job = self
            .poller
            .run(&api_key, GenerationJob::submitted(job_id))
            .await?;

        let elapsed_ms = job.elapsed().map(|d| d.num_milliseconds());
        tracing::info!(
            job_id = %job.id(),
            state = %job.state(),
            attempts = job.attempts(),
            last_progress = ?job.progress(),
            elapsed_ms = ?elapsed_ms,
            "Generation job finished"
        );

        emit_result(job)
    }
}
