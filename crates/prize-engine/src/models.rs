//! 奖金引擎领域模型

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::digits::{Digits, PlayedNumber, WinningNumber};
use crate::error::{PrizeError, Result};
use crate::evaluator::evaluate;
use crate::play_type::{PlayKind, PlayType};

/// 投注额，必须为正数，默认 $1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Stake(Decimal);

impl Stake {
    pub fn new(amount: Decimal) -> Result<Self> {
        if amount <= Decimal::ZERO {
            return Err(PrizeError::Validation(format!("投注额必须为正数，实际为 {amount}")));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl Default for Stake {
    fn default() -> Self {
        Self(Decimal::ONE)
    }
}

impl FromStr for Stake {
    type Err = PrizeError;

    fn from_str(s: &str) -> Result<Self> {
        let amount = Decimal::from_str(s.trim().trim_start_matches('$'))
            .map_err(|e| PrizeError::Validation(format!("无效的投注额 \"{s}\": {e}")))?;
        Self::new(amount)
    }
}

impl fmt::Display for Stake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Stake {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Stake::new(amount).map_err(serde::de::Error::custom)
    }
}

/// 评估结果，始终由 (号码, 玩法, 开奖号码) 重新计算，不单独持久化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub is_winner: bool,
    pub prize_amount: Decimal,
}

impl Outcome {
    pub fn win(prize_amount: Decimal) -> Self {
        Self {
            is_winner: true,
            prize_amount,
        }
    }

    pub fn lose() -> Self {
        Self {
            is_winner: false,
            prize_amount: Decimal::ZERO,
        }
    }
}

/// 玩法附加参数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayOptions {
    /// 仅 1-Off 使用，缺省为 1
    pub off_count: Option<u8>,
}

/// 一注投注：玩法 + 号码 + 投注额
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wager {
    pub play_type: PlayType,
    pub numbers: PlayedNumber,
    pub stake: Stake,
}

impl Wager {
    pub fn new(play_type: PlayType, numbers: PlayedNumber, stake: Stake) -> Self {
        Self {
            play_type,
            numbers,
            stake,
        }
    }

    /// 与开奖号码比对
    pub fn evaluate(&self, winning: &WinningNumber) -> Outcome {
        evaluate(self.play_type, &self.numbers, winning, self.stake)
    }
}

/// 玩法工厂
///
/// 依次校验玩法名称、号码和玩法参数，任何一步失败都直接返回错误：
/// 未知玩法 -> `UnknownPlayType`，号码非法 -> `Validation`，off_count 越界 -> `Configuration`。
pub fn create_play_type(
    name: &str,
    numbers: &str,
    stake: Stake,
    options: PlayOptions,
) -> Result<Wager> {
    let kind = PlayKind::from_str(name)?;
    let numbers = Digits::parse(numbers)?;
    let play_type = PlayType::from_kind(kind, options.off_count)?;
    Ok(Wager::new(play_type, numbers, stake))
}
