//! 投注单存储错误类型

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("投注单序号越界: {index}（共 {len} 张）")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("有效期无效: 开始日期 {start} 晚于结束日期 {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("投注单缺少联系邮箱")]
    MissingEmail,

    #[error("投注单不合法: {0}")]
    InvalidTicket(#[from] prize_engine::PrizeError),

    #[error("投注单文件损坏: {path}: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Shared(#[from] cash4_shared::error::TrackerError),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Shared(err.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::IndexOutOfRange { index: 7, len: 2 };
        assert_eq!(err.to_string(), "投注单序号越界: 7（共 2 张）");

        let err = StoreError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "有效期无效: 开始日期 2026-07-01 晚于结束日期 2026-06-01"
        );
    }

    #[test]
    fn test_io_error_wraps_into_shared() {
        let err: StoreError = std::io::Error::other("disk full").into();
        assert!(matches!(err, StoreError::Shared(_)));
    }
}
