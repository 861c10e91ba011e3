//! Generation Context - 固定生成参数

use serde::Serialize;

use super::ComposedPrompt;

/// 生成模型
pub const GENERATION_MODEL: &str = "Flux1schnell";
/// 输出分辨率
pub const GENERATION_WIDTH: u32 = 1024;
pub const GENERATION_HEIGHT: u32 = 1024;
/// 提示词引导强度（偏高，使输出更贴近面料描述）
pub const GENERATION_GUIDANCE: f32 = 9.0;
/// 推理步数（服务端允许的上限）
pub const GENERATION_STEPS: u32 = 10;
/// 随机种子上界（不含）
pub const SEED_UPPER_BOUND: u32 = 1_000_000;

/// 提交给生成服务的完整参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub prompt: String,
    pub negative_prompt: String,
    pub model: &'static str,
    pub width: u32,
    pub height: u32,
    pub guidance: f32,
    pub steps: u32,
    pub seed: u32,
}

impl GenerationParams {
    /// 以固定参数与给定种子构造
    pub fn new(prompt: ComposedPrompt, seed: u32) -> Self {
        Self {
            prompt: prompt.positive,
            negative_prompt: prompt.negative,
            model: GENERATION_MODEL,
            width: GENERATION_WIDTH,
            height: GENERATION_HEIGHT,
            guidance: GENERATION_GUIDANCE,
            steps: GENERATION_STEPS,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_serialize_with_fixed_values() {
        let params = GenerationParams::new(
            ComposedPrompt {
                positive: "p".to_string(),
                negative: "n".to_string(),
            },
            42,
        );
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["prompt"], "p");
        assert_eq!(value["negative_prompt"], "n");
        assert_eq!(value["model"], "Flux1schnell");
        assert_eq!(value["width"], 1024);
        assert_eq!(value["height"], 1024);
        assert_eq!(value["guidance"], 9.0);
        assert_eq!(value["steps"], 10);
        assert_eq!(value["seed"], 42);
    }
}
