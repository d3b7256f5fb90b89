//! 开奖结果获取错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("页面中未找到开奖结果表格: {0}")]
    TableNotFound(&'static str),

    #[error("解析器初始化失败: {0}")]
    Parser(#[from] regex::Error),

    #[error(transparent)]
    Shared(#[from] cash4_shared::error::TrackerError),
}

impl FetchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TableNotFound(_) => "RESULTS_TABLE_NOT_FOUND",
            Self::Parser(_) => "PARSER_ERROR",
            Self::Shared(e) => e.code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
