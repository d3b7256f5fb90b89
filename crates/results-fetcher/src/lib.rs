//! 开奖结果获取
//!
//! 下载并解析 Georgia Cash 4 开奖页面，按场次给出最新开奖号码，并按运行日期缓存。

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod retry;
pub mod source;

pub use cache::ResultsCache;
pub use error::{FetchError, Result};
pub use fetcher::ResultsFetcher;
pub use models::{DrawResult, LatestResults};
pub use parser::ResultsParser;
pub use retry::{Backoff, PageAttempt};
pub use source::{HttpResultsSource, ResultsSource};
