//! 奖金引擎错误类型

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrizeError {
    /// 号码或投注额格式不合法（长度不为 4、含非数字字符、投注额非正数等）
    #[error("号码校验失败: {0}")]
    Validation(String),

    #[error("未知的玩法: {name}")]
    UnknownPlayType { name: String },

    /// 玩法参数配置错误（如 off_count 不在 1..=4 之内）
    #[error("玩法配置错误: {0}")]
    Configuration(String),
}

impl PrizeError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnknownPlayType { .. } => "UNKNOWN_PLAY_TYPE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, PrizeError>;
