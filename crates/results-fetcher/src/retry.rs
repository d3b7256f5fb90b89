//! 开奖页面请求的退避重试
//!
//! 5xx、429、超时与连接失败按指数退避重试；其它 4xx 和无效地址直接失败。
//! 响应带 `Retry-After` 秒数时取它与退避时间中的较大值，仍受上限约束。

use std::future::Future;
use std::time::Duration;

use cash4_shared::config::FetcherConfig;
use cash4_shared::error::{Result, TrackerError};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use tracing::{info, warn};

pub(crate) const SERVICE: &str = "galottery";

/// 退避参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Backoff {
    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.retry_initial_ms),
            max_delay: Duration::from_secs(config.retry_max_seconds),
        }
    }

    /// 第 `retry` 次重试（从 0 开始）前的等待时间
    pub fn delay(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(retry))
            .max(retry_after.unwrap_or_default())
            .min(self.max_delay)
    }
}

/// 单次页面请求的结果
#[derive(Debug)]
pub enum PageAttempt {
    Page(String),
    /// 瞬时故障，退避后可重试
    Transient {
        error: TrackerError,
        retry_after: Option<Duration>,
    },
    Failed(TrackerError),
}

impl PageAttempt {
    /// 按状态码分类非成功响应
    pub fn from_status(status: StatusCode, headers: &HeaderMap) -> Self {
        let message = format!("HTTP {status}");
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Self::Transient {
                error: TrackerError::ExternalService {
                    service: SERVICE.to_string(),
                    message,
                },
                retry_after: retry_after(headers),
            }
        } else {
            Self::Failed(TrackerError::InvalidArgument {
                field: "fetcher.url".to_string(),
                message,
            })
        }
    }

    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::Failed(TrackerError::InvalidArgument {
                field: "fetcher.url".to_string(),
                message: err.to_string(),
            });
        }

        let error = if err.is_timeout() {
            TrackerError::ExternalServiceTimeout {
                service: SERVICE.to_string(),
            }
        } else {
            TrackerError::ExternalService {
                service: SERVICE.to_string(),
                message: err.to_string(),
            }
        };
        Self::Transient {
            error,
            retry_after: None,
        }
    }
}

/// 只支持秒数形式，HTTP 日期形式忽略
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let seconds = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    Some(Duration::from_secs(seconds))
}

/// 重复请求直到拿到页面、遇到不可重试的错误或用尽重试次数
pub async fn fetch_with_backoff<F, Fut>(backoff: &Backoff, mut attempt: F) -> Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = PageAttempt>,
{
    let mut retry = 0;
    loop {
        match attempt().await {
            PageAttempt::Page(body) => {
                if retry > 0 {
                    info!(retries = retry, "开奖页面在重试后获取成功");
                }
                return Ok(body);
            }
            PageAttempt::Failed(error) => {
                warn!(error = %error, code = error.code(), "开奖页面请求被拒绝");
                return Err(error);
            }
            PageAttempt::Transient { error, retry_after } => {
                if retry >= backoff.max_retries {
                    warn!(retries = retry, error = %error, "开奖页面重试次数已用尽");
                    return Err(error);
                }
                let delay = backoff.delay(retry, retry_after);
                warn!(
                    retry,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "开奖页面暂时不可用，退避后重试"
                );
                tokio::time::sleep(delay).await;
                retry += 1;
            }
        }
    }
}
