//! Cash 4 奖金引擎
//!
//! 提供五种玩法的中奖判定与奖金计算：
//! - 直选（straight）：位置完全一致
//! - 组选（box）：数字多重集合一致，按投注号码的排列数付奖
//! - 直选/组选（straight/box）：两部分奖金独立的组合投注
//! - 组合（combo）：买下全部直选排列，奖池按排列数均分
//! - 1-Off：每位允许 ±1 偏差（不环绕），按 off_count 付奖
//!
//! 评估是纯函数，不做 I/O。号码在构造时校验。

pub mod digits;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod payout;
pub mod play_type;

pub use digits::{BoxWays, DIGIT_COUNT, Digits, PlayedNumber, WinningNumber, validate_numbers};
pub use error::{PrizeError, Result};
pub use evaluator::evaluate;
pub use models::{Outcome, PlayOptions, Stake, Wager, create_play_type};
pub use play_type::{OffCount, PlayKind, PlayType};
