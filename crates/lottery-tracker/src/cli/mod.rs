//! CLI 模块
//!
//! - `add` - 新增投注单
//! - `list` / `check-active` - 查看投注单
//! - `delete` / `update-dates` - 维护投注单
//! - `check` - 每日开奖检查（通常由定时任务在零点后执行）
//! - `evaluate` - 单次奖金评估
//!
//! # 使用示例
//!
//! ```bash
//! lot-tracker add -n 1234 -e me@gmail.com -p straight -p box -d midday --start 06-16 --end 06-30
//! lot-tracker check
//! lot-tracker evaluate -p oneoff -n 1234 -w 0234 --off-count 1
//! ```

pub mod commands;
pub mod runner;

pub use commands::{AddArgs, Cli, Commands};
pub use runner::CommandRunner;
