//! 通知模板
//!
//! 按通知类型生成邮件标题与正文。模板变量由调度层组装为 JSON 对象，
//! 缺失字段使用占位符，不会导致渲染失败。

use prize_engine::Digits;
use rust_decimal::Decimal;

use crate::notice::NoticeKind;

/// 兑奖期限（天）
pub const CLAIM_WINDOW_DAYS: u32 = 180;

pub struct NotificationTemplateEngine;

impl NotificationTemplateEngine {
    /// 标题固定，不做变量替换
    pub fn render_title(kind: NoticeKind, _data: &serde_json::Value) -> String {
        match kind {
            NoticeKind::Win => "Congratulations! You Won the Georgia Cash 4!".to_string(),
            NoticeKind::NoWin => "Georgia Cash 4 Results".to_string(),
            NoticeKind::Expiring => "Your Georgia Cash 4 Ticket is Expiring Soon".to_string(),
        }
    }

    pub fn render_body(kind: NoticeKind, data: &serde_json::Value) -> String {
        let numbers = extract_str(data, "numbers", "?");
        let play_type = extract_str(data, "play_type", "?");
        let draw_time = extract_str(data, "draw_time", "?");

        match kind {
            NoticeKind::Win => {
                let winning = extract_str(data, "winning_numbers", "?");
                let draw_date = extract_str(data, "draw_date", "?");
                let prize = extract_str(data, "prize", "?");
                format!(
                    "Congratulations! Your Georgia Cash 4 ticket has won!\n\n\
                     Your Numbers: {numbers}\n\
                     Winning Numbers: {winning}\n\
                     Play Type: {play_type}\n\
                     Draw Time: {draw_time}\n\
                     Draw Date: {draw_date}\n\
                     Prize Amount: {prize}\n\n\
                     Please claim your prize within {CLAIM_WINDOW_DAYS} days of the drawing date.\n\n\
                     Good luck with your next ticket!\n"
                )
            }
            NoticeKind::NoWin => {
                let winning = extract_str(data, "winning_numbers", "?");
                let draw_date = extract_str(data, "draw_date", "?");
                format!(
                    "Your Georgia Cash 4 results are in:\n\n\
                     Your Numbers: {numbers}\n\
                     Winning Numbers: {winning}\n\
                     Play Type: {play_type}\n\
                     Draw Time: {draw_time}\n\
                     Draw Date: {draw_date}\n\n\
                     Unfortunately, this ticket did not win. Better luck next time!\n"
                )
            }
            NoticeKind::Expiring => {
                let days = extract_str(data, "days_remaining", "?");
                let end_date = extract_str(data, "end_date", "?");
                let ticket_number = extract_str(data, "ticket_number", "<ticket_number>");
                format!(
                    "Your Georgia Cash 4 ticket is expiring soon!\n\n\
                     Ticket Details:\n\
                     Numbers: {numbers}\n\
                     Play Type: {play_type}\n\
                     Draw Time: {draw_time}\n\
                     End Date: {end_date}\n\
                     Days Remaining: {days}\n\n\
                     If you want to continue tracking these numbers, please update the ticket's dates:\n\
                     lot-tracker update-dates {ticket_number} --start YYYY-MM-DD --end YYYY-MM-DD\n"
                )
            }
        }
    }
}

/// 号码以短横线分隔展示，如 1-2-3-4
pub fn dashed(digits: &Digits) -> String {
    digits
        .as_array()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

/// 金额格式化为 `$5,000.00`
pub fn format_money(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, int_digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(int_digits.len() + int_digits.len() / 3);
    for (i, ch) in int_digits.chars().enumerate() {
        if i > 0 && (int_digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac_part}")
}

/// 从 JSON 对象中安全提取字符串值，非字符串类型按 JSON 文本渲染
fn extract_str(data: &serde_json::Value, key: &str, default: &str) -> String {
    data.get(key)
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| default.to_string())
}
