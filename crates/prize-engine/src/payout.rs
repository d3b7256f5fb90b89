//! 奖金表
//!
//! 所有金额均为每 $1 投注的官方公布奖金，按投注额线性缩放。
//! 组选相关的表以排列数（24/12/6/4/1）为键。

use rust_decimal::{Decimal, RoundingStrategy};

use crate::digits::BoxWays;
use crate::play_type::OffCount;

/// 直选中奖金额
pub const STRAIGHT_PRIZE: i64 = 5_000;

/// 1-Off 完全命中时的金额
pub const ONE_OFF_EXACT_PRIZE: i64 = 2_500;

/// 组选：排列数 -> 金额
pub const BOX_PAYOUTS: [(u32, i64); 5] = [
    (24, 200),
    (12, 400),
    (6, 800),
    (4, 1_200),
    (1, 5_000),
];

/// 直选/组选：排列数 -> (直选部分, 组选部分)
///
/// 完全命中时两部分相加，仅组选命中时只付组选部分。
pub const STRAIGHT_BOX_PAYOUTS: [(u32, i64, i64); 5] = [
    (24, 2_600, 100),
    (12, 2_700, 200),
    (6, 2_900, 400),
    (4, 3_100, 600),
    (1, 2_500, 2_500),
];

/// 1-Off：票面 off_count -> 金额
pub const ONE_OFF_PAYOUTS: [(u8, i64); 4] = [(1, 124), (2, 24), (3, 16), (4, 32)];

/// 按投注额缩放并保留到分
pub fn scale(base: i64, stake: Decimal) -> Decimal {
    to_cents(Decimal::from(base) * stake)
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// 组选奖金（$1 基准）
pub fn box_base(ways: BoxWays) -> i64 {
    BOX_PAYOUTS
        .iter()
        .find(|(key, _)| *key == ways.permutations())
        .map(|(_, amount)| *amount)
        .unwrap_or(0)
}

/// 直选/组选的两部分奖金（$1 基准）
pub fn straight_box_base(ways: BoxWays) -> (i64, i64) {
    STRAIGHT_BOX_PAYOUTS
        .iter()
        .find(|(key, _, _)| *key == ways.permutations())
        .map(|(_, straight, boxed)| (*straight, *boxed))
        .unwrap_or((0, 0))
}

/// 1-Off 偏差命中奖金（$1 基准）
pub fn one_off_base(off_count: OffCount) -> i64 {
    ONE_OFF_PAYOUTS
        .iter()
        .find(|(key, _)| *key == off_count.get())
        .map(|(_, amount)| *amount)
        .unwrap_or(0)
}

/// 组合投注：按投注额缩放后的直选奖池按排列数均分，保留到分
pub fn combo_share(ways: BoxWays, stake: Decimal) -> Decimal {
    to_cents(Decimal::from(STRAIGHT_PRIZE) * stake / Decimal::from(ways.permutations()))
}
