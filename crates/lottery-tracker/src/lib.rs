//! Georgia Cash 4 投注单追踪
//!
//! 命令行入口与每日开奖检查流程：开奖结果获取 -> 奖金评估 -> 通知。

pub mod checker;
pub mod cli;
pub mod validation;

pub use checker::{CheckReport, DrawChecker};

/// 服务名，用于加载配置与日志
pub const SERVICE_NAME: &str = "lot-tracker";
