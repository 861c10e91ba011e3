//! Domain Layer - 领域层
//!
//! - Generation Context: 生成请求、任务与状态分类
//! - Prompt Composer: 纯函数的提示词组装

pub mod generation;

mod prompt_composer;

pub use prompt_composer::{
    compose_prompt, MIN_DESCRIPTION_CHARS, NEGATIVE_PROMPT,
};
