//! 四位号码模型
//!
//! 投注号码与开奖号码共用同一结构：定长 4 位、每位 0-9。
//! 合法性只在构造时校验一次，之后的评估逻辑无需再处理非法输入。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PrizeError, Result};

/// Cash 4 号码位数
pub const DIGIT_COUNT: usize = 4;

/// 四位数字序列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digits([u8; DIGIT_COUNT]);

/// 用户投注的号码
pub type PlayedNumber = Digits;

/// 官方开奖号码
pub type WinningNumber = Digits;

impl Digits {
    /// 从数值数组构造，任一位超过 9 即视为非法
    pub fn new(digits: [u8; DIGIT_COUNT]) -> Result<Self> {
        if let Some(bad) = digits.iter().find(|d| **d > 9) {
            return Err(PrizeError::Validation(format!("数字超出 0-9 范围: {bad}")));
        }
        Ok(Self(digits))
    }

    /// 解析形如 "0429" 的字符串
    pub fn parse(input: &str) -> Result<Self> {
        validate_numbers(input)
    }

    pub fn as_array(&self) -> &[u8; DIGIT_COUNT] {
        &self.0
    }

    /// 升序排列后的数字，用于组选（box）比较
    pub fn sorted(&self) -> [u8; DIGIT_COUNT] {
        let mut sorted = self.0;
        sorted.sort_unstable();
        sorted
    }

    /// 两个号码的数字多重集合是否相同
    pub fn is_box_match(&self, other: &Digits) -> bool {
        self.sorted() == other.sorted()
    }

    /// 号码的组选形态（由重复数字的分布决定）
    pub fn ways(&self) -> BoxWays {
        let mut counts = [0u8; 10];
        for d in self.0 {
            counts[d as usize] += 1;
        }
        let mut freq: Vec<u8> = counts.into_iter().filter(|c| *c > 0).collect();
        freq.sort_unstable_by(|a, b| b.cmp(a));

        match freq.as_slice() {
            [4] => BoxWays::OneWay,
            [3, 1] => BoxWays::FourWay,
            [2, 2] => BoxWays::SixWay,
            [2, 1, 1] => BoxWays::TwelveWay,
            _ => BoxWays::TwentyFourWay,
        }
    }
}

/// 校验并解析四位号码：恰好 4 个字符，且每个字符都是 0-9
pub fn validate_numbers(input: &str) -> Result<Digits> {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() != DIGIT_COUNT {
        return Err(PrizeError::Validation(format!(
            "号码必须为 {DIGIT_COUNT} 位数字，实际为 \"{input}\""
        )));
    }

    let mut digits = [0u8; DIGIT_COUNT];
    for (slot, ch) in digits.iter_mut().zip(chars) {
        *slot = ch
            .to_digit(10)
            .ok_or_else(|| PrizeError::Validation(format!("号码包含非数字字符: '{ch}'")))?
            as u8;
    }

    Ok(Digits(digits))
}

impl FromStr for Digits {
    type Err = PrizeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl Serialize for Digits {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 兼容两种存储格式："1234" 与 ["1", "2", "3", "4"]
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDigits {
    Text(String),
    List(Vec<RawDigit>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDigit {
    Text(String),
    Number(u8),
}

impl<'de> Deserialize<'de> for Digits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = match RawDigits::deserialize(deserializer)? {
            RawDigits::Text(s) => s,
            RawDigits::List(items) => items
                .into_iter()
                .map(|item| match item {
                    RawDigit::Text(s) => s,
                    RawDigit::Number(n) => n.to_string(),
                })
                .collect(),
        };
        Digits::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// 组选形态
///
/// 以不同排列数区分：全不同 24 种、一对 12 种、两对 6 种、三同 4 种。
/// 四位全同只有 1 种排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxWays {
    OneWay,
    FourWay,
    SixWay,
    TwelveWay,
    TwentyFourWay,
}

impl BoxWays {
    /// 不同排列的数量
    pub fn permutations(self) -> u32 {
        match self {
            Self::OneWay => 1,
            Self::FourWay => 4,
            Self::SixWay => 6,
            Self::TwelveWay => 12,
            Self::TwentyFourWay => 24,
        }
    }
}

impl fmt::Display for BoxWays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-way", self.permutations())
    }
}
