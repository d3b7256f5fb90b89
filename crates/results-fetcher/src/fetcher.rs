//! 开奖结果获取
//!
//! 先查当日缓存，未命中再从页面来源下载并解析，成功后写回缓存。

use std::sync::Arc;

use cash4_shared::draws::DrawSession;
use cash4_shared::observability::metrics;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cache::ResultsCache;
use crate::error::Result;
use crate::models::{DrawResult, LatestResults};
use crate::parser::ResultsParser;
use crate::source::ResultsSource;

pub struct ResultsFetcher {
    source: Arc<dyn ResultsSource>,
    parser: ResultsParser,
    cache: ResultsCache,
}

impl ResultsFetcher {
    pub fn new(source: Arc<dyn ResultsSource>, cache: ResultsCache) -> Result<Self> {
        Ok(Self {
            source,
            parser: ResultsParser::new()?,
            cache,
        })
    }

    /// 各场次的最新结果
    pub async fn latest(&self, today: NaiveDate) -> Result<LatestResults> {
        if let Some(cached) = self.cache.load(today) {
            info!(count = cached.len(), "使用当日开奖缓存");
            metrics::record_fetch("cache", true);
            return Ok(cached);
        }

        let results = match self.fetch_and_parse().await {
            Ok(results) => results,
            Err(e) => {
                metrics::record_fetch("remote", false);
                return Err(e);
            }
        };
        metrics::record_fetch("remote", true);

        if results.is_empty() {
            warn!("开奖页面中没有可用结果");
        } else {
            info!(count = results.len(), "开奖结果已获取");
            if let Err(e) = self.cache.save(today, &results) {
                warn!(error = %e, "写入开奖缓存失败");
            }
        }
        Ok(results)
    }

    /// 指定场次的最新结果，页面上没有该场次时返回 `None`
    pub async fn winning_number_for(
        &self,
        session: DrawSession,
        today: NaiveDate,
    ) -> Result<Option<DrawResult>> {
        Ok(self.latest(today).await?.get(session).copied())
    }

    async fn fetch_and_parse(&self) -> Result<LatestResults> {
        let html = self.source.fetch_page().await?;
        self.parser.parse(&html)
    }
}
