//! 应用层 - 命令
//!
//! 生成流水线的唯一入口命令

mod generate_commands;

pub mod handlers;

pub use generate_commands::*;
