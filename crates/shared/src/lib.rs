//! 共享库
//!
//! 包含所有 crate 共用的配置、错误处理、日志与指标初始化等基础设施代码，
//! 以及跨 crate 共用的开奖场次模型。

pub mod config;
pub mod draws;
pub mod error;
pub mod observability;
