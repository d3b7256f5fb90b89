//! 开奖页面来源

use std::time::Duration;

use async_trait::async_trait;
use cash4_shared::config::FetcherConfig;
use cash4_shared::error::{Result, TrackerError};
use tracing::debug;

use crate::retry::{Backoff, PageAttempt, fetch_with_backoff};

/// 提供已渲染的开奖结果页面 HTML
#[async_trait]
pub trait ResultsSource: Send + Sync {
    async fn fetch_page(&self) -> Result<String>;
}

/// 通过 HTTP 获取页面
///
/// 官方页面依赖脚本渲染，`url` 应指向能返回完整表格的地址（如渲染代理）。
pub struct HttpResultsSource {
    client: reqwest::Client,
    url: String,
    backoff: Backoff,
}

impl HttpResultsSource {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TrackerError::Internal(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            backoff: Backoff::from_config(config),
        })
    }

    async fn fetch_once(&self) -> PageAttempt {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => return PageAttempt::from_reqwest(e),
        };

        let status = response.status();
        if !status.is_success() {
            return PageAttempt::from_status(status, response.headers());
        }

        match response.text().await {
            Ok(body) => {
                debug!(bytes = body.len(), "开奖页面已下载");
                PageAttempt::Page(body)
            }
            Err(e) => PageAttempt::from_reqwest(e),
        }
    }
}

#[async_trait]
impl ResultsSource for HttpResultsSource {
    async fn fetch_page(&self) -> Result<String> {
        fetch_with_backoff(&self.backoff, || self.fetch_once()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_fails_without_retry() {
        let config = FetcherConfig {
            url: "not a url".to_string(),
            retry_initial_ms: 1,
            ..FetcherConfig::default()
        };
        let source = HttpResultsSource::new(&config).unwrap();

        let err = source.fetch_page().await.unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }
}
