//! Seed Source Port - 生成种子来源

/// 每次提交取一个新种子，范围 `[0, SEED_UPPER_BOUND)`
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u32;
}
