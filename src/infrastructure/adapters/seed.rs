//! Random Seed Source

use rand::Rng;

use crate::application::ports::SeedSource;
use crate::domain::generation::SEED_UPPER_BOUND;

/// 线程随机数种子
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSeedSource;

impl SeedSource for RandomSeedSource {
    fn next_seed(&self) -> u32 {
        rand::thread_rng().gen_range(0..SEED_UPPER_BOUND)
    }
}
