//! 统一可观测性模块
//!
//! 提供日志与指标的统一初始化。命令行工具只做单次运行，不启动指标导出端口；
//! 指标通过 metrics 门面记录，注册 recorder 之前为空操作。

pub mod metrics;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;

use crate::config::ObservabilityConfig;

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. Metrics（指标描述）
///
/// # Example
///
/// ```ignore
/// use cash4_shared::config::AppConfig;
/// use cash4_shared::observability;
///
/// let config = AppConfig::load("lot-tracker")?;
/// observability::init(&config.service_name, &config.observability)?;
/// ```
pub fn init(service_name: &str, config: &ObservabilityConfig) -> Result<()> {
    tracing::init(config)?;
    metrics::describe(service_name);

    info!(
        service = %service_name,
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Observability initialized"
    );
    Ok(())
}
