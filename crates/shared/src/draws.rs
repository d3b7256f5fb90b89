//! 开奖场次
//!
//! Georgia Cash 4 每天开奖三次。投注单、开奖结果缓存和每日检查任务都以场次为键。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

// ---------------------------------------------------------------------------
// DrawSession：开奖场次枚举
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawSession {
    Midday,
    Evening,
    Night,
}

impl DrawSession {
    /// 按一天内的开奖先后排列
    pub const ALL: [DrawSession; 3] = [Self::Midday, Self::Evening, Self::Night];

    /// 官方开奖时间（美国东部时间）
    pub fn draw_time(&self) -> &'static str {
        match self {
            Self::Midday => "12:29 PM",
            Self::Evening => "6:59 PM",
            Self::Night => "11:34 PM",
        }
    }

    /// 小写键名，用于开奖结果缓存文件
    pub fn key(&self) -> &'static str {
        match self {
            Self::Midday => "midday",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// 从页面上的场次文字识别（如 "Midday"、"EVE"、"Night Draw"）
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_ascii_lowercase();
        if label.contains("mid") {
            Some(Self::Midday)
        } else if label.contains("eve") {
            Some(Self::Evening)
        } else if label.contains("night") {
            Some(Self::Night)
        } else {
            None
        }
    }
}

impl fmt::Display for DrawSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Midday => "MIDDAY",
            Self::Evening => "EVENING",
            Self::Night => "NIGHT",
        };
        write!(f, "{s}")
    }
}

impl FromStr for DrawSession {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "midday" | "mid" => Ok(Self::Midday),
            "evening" | "eve" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            _ => Err(TrackerError::InvalidArgument {
                field: "draw_time".to_string(),
                message: format!("未知的开奖场次: {s}（可选 midday / evening / night）"),
            }),
        }
    }
}
