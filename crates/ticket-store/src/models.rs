//! 投注单模型

use cash4_shared::draws::DrawSession;
use chrono::NaiveDate;
use prize_engine::{Digits, PlayKind, PlayOptions, Stake, Wager, create_play_type};
use serde::{Deserialize, Serialize};

/// 投注单
///
/// 文件中按顺序存放，以位置作为编号。玩法名称按原文保存，
/// 评估时再交给玩法工厂解析，单张票的玩法错误不影响其它票。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub numbers: Digits,
    pub play_type: String,
    /// 仅 1-Off 使用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_count: Option<u8>,
    #[serde(default)]
    pub stake: Stake,
    pub draw_time: DrawSession,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub email: String,
    pub created_at: NaiveDate,
}

impl Ticket {
    /// 有效期两端都包含
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// 距到期的天数，到期当天为 0
    pub fn days_remaining(&self, date: NaiveDate) -> i64 {
        (self.end_date - date).num_days()
    }

    /// 通过玩法工厂构造投注，未知玩法或参数非法时返回错误
    pub fn wager(&self) -> prize_engine::Result<Wager> {
        create_play_type(
            &self.play_type,
            &self.numbers.to_string(),
            self.stake,
            PlayOptions {
                off_count: self.off_count,
            },
        )
    }
}

/// 批量创建投注单的输入：每个 玩法 × 场次 组合生成一张票
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub numbers: Digits,
    pub play_types: Vec<PlayKind>,
    pub draw_times: Vec<DrawSession>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub email: String,
    pub stake: Stake,
    pub off_count: Option<u8>,
}

impl TicketDraft {
    /// 展开为具体投注单（玩法在外层循环）
    pub fn expand(&self, created_at: NaiveDate) -> Vec<Ticket> {
        let mut tickets = Vec::with_capacity(self.play_types.len() * self.draw_times.len());
        for play_type in &self.play_types {
            for draw_time in &self.draw_times {
                tickets.push(Ticket {
                    numbers: self.numbers,
                    play_type: play_type.to_string(),
                    off_count: match play_type {
                        PlayKind::OneOff => self.off_count,
                        _ => None,
                    },
                    stake: self.stake,
                    draw_time: *draw_time,
                    start_date: self.start_date,
                    end_date: self.end_date,
                    email: self.email.clone(),
                    created_at,
                });
            }
        }
        tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prize_engine::PlayType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ticket() -> Ticket {
        Ticket {
            numbers: Digits::parse("1234").unwrap(),
            play_type: "straight".to_string(),
            off_count: None,
            stake: Stake::default(),
            draw_time: DrawSession::Evening,
            start_date: date(2026, 6, 16),
            end_date: date(2026, 6, 20),
            email: "player@gmail.com".to_string(),
            created_at: date(2026, 6, 15),
        }
    }

    #[test]
    fn test_active_window_is_inclusive() {
        let t = ticket();
        assert!(!t.is_active_on(date(2026, 6, 15)));
        assert!(t.is_active_on(date(2026, 6, 16)));
        assert!(t.is_active_on(date(2026, 6, 20)));
        assert!(!t.is_active_on(date(2026, 6, 21)));
        assert_eq!(t.days_remaining(date(2026, 6, 18)), 2);
        assert_eq!(t.days_remaining(date(2026, 6, 20)), 0);
    }

    #[test]
    fn test_legacy_record_deserializes() {
        // 旧格式：号码为字符列表，没有 stake / off_count 字段
        let json = r#"{
            "numbers": ["0", "4", "2", "9"],
            "play_type": "box",
            "draw_time": "MIDDAY",
            "start_date": "2025-06-16",
            "end_date": "2025-06-30",
            "email": "player@gmail.com",
            "created_at": "2025-06-15"
        }"#;
        let t: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(t.numbers.to_string(), "0429");
        assert_eq!(t.stake, Stake::default());
        assert_eq!(t.off_count, None);
        assert_eq!(t.draw_time, DrawSession::Midday);
    }

    #[test]
    fn test_wager_uses_factory() {
        let mut t = ticket();
        t.play_type = "oneoff".to_string();
        t.off_count = Some(2);
        let wager = t.wager().unwrap();
        assert!(matches!(wager.play_type, PlayType::OneOff { .. }));

        t.play_type = "pick5".to_string();
        assert_eq!(t.wager().unwrap_err().code(), "UNKNOWN_PLAY_TYPE");
    }

    #[test]
    fn test_draft_expands_cartesian_product() {
        let draft = TicketDraft {
            numbers: Digits::parse("1234").unwrap(),
            play_types: vec![PlayKind::Straight, PlayKind::OneOff],
            draw_times: vec![DrawSession::Midday, DrawSession::Night],
            start_date: date(2026, 6, 16),
            end_date: date(2026, 6, 30),
            email: "player@gmail.com".to_string(),
            stake: Stake::default(),
            off_count: Some(3),
        };

        let tickets = draft.expand(date(2026, 6, 15));
        assert_eq!(tickets.len(), 4);
        assert_eq!(tickets[0].play_type, "straight");
        assert_eq!(tickets[0].draw_time, DrawSession::Midday);
        assert_eq!(tickets[0].off_count, None);
        assert_eq!(tickets[3].play_type, "oneoff");
        assert_eq!(tickets[3].draw_time, DrawSession::Night);
        assert_eq!(tickets[3].off_count, Some(3));
    }
}
