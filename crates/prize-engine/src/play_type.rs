//! 玩法定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PrizeError, Result};

/// 玩法名称（不带参数），用于存储和命令行解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayKind {
    Straight,
    Box,
    StraightBox,
    Combo,
    OneOff,
}

impl PlayKind {
    pub const ALL: [PlayKind; 5] = [
        Self::Straight,
        Self::Box,
        Self::StraightBox,
        Self::Combo,
        Self::OneOff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Box => "box",
            Self::StraightBox => "straightbox",
            Self::Combo => "combo",
            Self::OneOff => "oneoff",
        }
    }
}

impl fmt::Display for PlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlayKind {
    type Err = PrizeError;

    /// 大小写不敏感，忽略 `_`、`-`、`/`、空格等分隔符（如 "Straight/Box"、"one-off"）
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "straight" => Ok(Self::Straight),
            "box" => Ok(Self::Box),
            "straightbox" => Ok(Self::StraightBox),
            "combo" => Ok(Self::Combo),
            "oneoff" | "1off" => Ok(Self::OneOff),
            _ => Err(PrizeError::UnknownPlayType {
                name: s.to_string(),
            }),
        }
    }
}

/// 1-Off 玩法允许偏差一位的数字个数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OffCount(u8);

impl OffCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PrizeError::Configuration(format!(
                "off_count 必须在 {}..={} 之间，实际为 {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for OffCount {
    fn default() -> Self {
        Self(1)
    }
}

impl<'de> Deserialize<'de> for OffCount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        OffCount::new(value).map_err(serde::de::Error::custom)
    }
}

/// 玩法（封闭变体集合），各变体的匹配规则与奖金表见 evaluator / payout 模块
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayType {
    Straight,
    Box,
    StraightBox,
    Combo,
    OneOff { off_count: OffCount },
}

impl PlayType {
    pub fn kind(&self) -> PlayKind {
        match self {
            Self::Straight => PlayKind::Straight,
            Self::Box => PlayKind::Box,
            Self::StraightBox => PlayKind::StraightBox,
            Self::Combo => PlayKind::Combo,
            Self::OneOff { .. } => PlayKind::OneOff,
        }
    }

    /// 由玩法名称和可选参数构造；off_count 仅对 1-Off 有意义，其它玩法忽略
    pub fn from_kind(kind: PlayKind, off_count: Option<u8>) -> Result<Self> {
        Ok(match kind {
            PlayKind::Straight => Self::Straight,
            PlayKind::Box => Self::Box,
            PlayKind::StraightBox => Self::StraightBox,
            PlayKind::Combo => Self::Combo,
            PlayKind::OneOff => Self::OneOff {
                off_count: off_count.map(OffCount::new).transpose()?.unwrap_or_default(),
            },
        })
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneOff { off_count } => write!(f, "oneoff({})", off_count.get()),
            other => write!(f, "{}", other.kind()),
        }
    }
}
