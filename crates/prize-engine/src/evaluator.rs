//! 中奖评估器
//!
//! 纯函数：给定玩法、投注号码、开奖号码和投注额，返回确定的评估结果。
//! 输入在构造时已校验，这里不会失败。

use rust_decimal::Decimal;

use crate::digits::{Digits, PlayedNumber, WinningNumber};
use crate::models::{Outcome, Stake};
use crate::payout::{self, ONE_OFF_EXACT_PRIZE, STRAIGHT_PRIZE};
use crate::play_type::{OffCount, PlayType};

/// 评估一注投注
pub fn evaluate(
    play_type: PlayType,
    played: &PlayedNumber,
    winning: &WinningNumber,
    stake: Stake,
) -> Outcome {
    let stake = stake.amount();
    let prize = match play_type {
        PlayType::Straight => straight(played, winning, stake),
        PlayType::Box => boxed(played, winning, stake),
        PlayType::StraightBox => straight_box(played, winning, stake),
        PlayType::Combo => combo(played, winning, stake),
        PlayType::OneOff { off_count } => one_off(played, winning, off_count, stake),
    };

    match prize {
        Some(amount) => Outcome::win(amount),
        None => Outcome::lose(),
    }
}

fn straight(played: &Digits, winning: &Digits, stake: Decimal) -> Option<Decimal> {
    (played == winning).then(|| payout::scale(STRAIGHT_PRIZE, stake))
}

/// 组选奖金只看投注号码自身的形态
fn boxed(played: &Digits, winning: &Digits, stake: Decimal) -> Option<Decimal> {
    played
        .is_box_match(winning)
        .then(|| payout::scale(payout::box_base(played.ways()), stake))
}

fn straight_box(played: &Digits, winning: &Digits, stake: Decimal) -> Option<Decimal> {
    let (straight_share, box_share) = payout::straight_box_base(played.ways());
    if played == winning {
        Some(payout::scale(straight_share + box_share, stake))
    } else if played.is_box_match(winning) {
        Some(payout::scale(box_share, stake))
    } else {
        None
    }
}

/// 组合投注相当于买下全部直选排列，因此只有位置完全一致时中奖
fn combo(played: &Digits, winning: &Digits, stake: Decimal) -> Option<Decimal> {
    (played == winning).then(|| payout::combo_share(played.ways(), stake))
}

fn one_off(
    played: &Digits,
    winning: &Digits,
    off_count: OffCount,
    stake: Decimal,
) -> Option<Decimal> {
    if played == winning {
        return Some(payout::scale(ONE_OFF_EXACT_PRIZE, stake));
    }

    let mut off_positions = 0u8;
    for (p, w) in played.as_array().iter().zip(winning.as_array()) {
        match p.abs_diff(*w) {
            0 => {}
            // 不做 9 与 0 之间的环绕
            1 => off_positions += 1,
            _ => return None,
        }
    }

    (off_positions <= off_count.get()).then(|| payout::scale(payout::one_off_base(off_count), stake))
}
