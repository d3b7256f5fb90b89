//! 通知调度
//!
//! 把评估结果与到期提醒渲染为通知并交给发送器。投递失败只记录日志和指标，
//! 以 `SendResult` 返回给调用方，不中断每日检查流程。

use std::sync::Arc;

use cash4_shared::observability::metrics;
use chrono::NaiveDate;
use prize_engine::{Outcome, WinningNumber};
use ticket_store::Ticket;
use tracing::{error, info};

use crate::notice::{Notice, NoticeKind};
use crate::sender::{NotificationSender, SendResult};
use crate::templates::{NotificationTemplateEngine, dashed, format_money};

pub struct Notifier {
    sender: Arc<dyn NotificationSender>,
}

impl Notifier {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    pub fn channel(&self) -> &'static str {
        self.sender.channel()
    }

    /// 发送开奖结果通知，中奖与未中奖使用不同模板
    pub async fn notify_result(
        &self,
        ticket: &Ticket,
        winning: &WinningNumber,
        draw_date: NaiveDate,
        outcome: &Outcome,
    ) -> SendResult {
        let kind = if outcome.is_winner {
            NoticeKind::Win
        } else {
            NoticeKind::NoWin
        };
        let data = serde_json::json!({
            "numbers": dashed(&ticket.numbers),
            "winning_numbers": dashed(winning),
            "play_type": ticket.play_type,
            "draw_time": ticket.draw_time.to_string(),
            "draw_date": draw_date.to_string(),
            "prize": format_money(outcome.prize_amount),
        });

        self.dispatch(kind, &ticket.email, &data).await
    }

    /// 发送到期提醒，`ticket_number` 为命令行中使用的 1 起始编号
    pub async fn notify_expiring(
        &self,
        ticket: &Ticket,
        ticket_number: usize,
        days_remaining: i64,
    ) -> SendResult {
        let data = serde_json::json!({
            "numbers": dashed(&ticket.numbers),
            "play_type": ticket.play_type,
            "draw_time": ticket.draw_time.to_string(),
            "end_date": ticket.end_date.to_string(),
            "days_remaining": days_remaining,
            "ticket_number": ticket_number,
        });

        self.dispatch(NoticeKind::Expiring, &ticket.email, &data).await
    }

    async fn dispatch(&self, kind: NoticeKind, recipient: &str, data: &serde_json::Value) -> SendResult {
        let notice = Notice::new(
            kind,
            recipient,
            NotificationTemplateEngine::render_title(kind, data),
            NotificationTemplateEngine::render_body(kind, data),
        );

        let result = match self.sender.send(&notice).await {
            Ok(result) => {
                info!(
                    notice_id = %notice.notice_id,
                    kind = %kind,
                    channel = result.channel,
                    "通知已投递"
                );
                result
            }
            Err(e) => {
                error!(
                    notice_id = %notice.notice_id,
                    kind = %kind,
                    channel = self.sender.channel(),
                    error = %e,
                    "通知投递失败"
                );
                SendResult::failed(self.sender.channel(), e.to_string())
            }
        };

        metrics::record_notification(kind.as_str(), result.success);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotificationError;
    use crate::sender::MockNotificationSender;
    use cash4_shared::draws::DrawSession;
    use mockall::predicate::function;
    use prize_engine::{Digits, Stake};
    use rust_decimal::Decimal;

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
            start_date: date(2025, 6, 16),
            end_date: date(2025, 6, 18),
            email: "player@gmail.com".to_string(),
            created_at: date(2025, 6, 15),
        }
    }

    #[tokio::test]
    async fn test_win_notice_is_rendered_and_sent() {
        let mut sender = MockNotificationSender::new();
        sender.expect_channel().return_const("EMAIL");
        sender
            .expect_send()
            .with(function(|n: &Notice| {
                n.kind == NoticeKind::Win
                    && n.recipient == "player@gmail.com"
                    && n.body.contains("Prize Amount: $5,000.00")
                    && n.body.contains("Draw Date: 2025-06-16")
            }))
            .times(1)
            .returning(|n| Ok(SendResult::delivered("EMAIL", n.notice_id.clone())));

        let notifier = Notifier::new(Arc::new(sender));
        let winning = Digits::parse("1234").unwrap();
        let outcome = Outcome::win(Decimal::from(5000));
        let result = notifier
            .notify_result(&ticket(), &winning, date(2025, 6, 16), &outcome)
            .await;

        assert!(result.success);
        assert_eq!(result.channel, "EMAIL");
    }

    #[tokio::test]
    async fn test_no_win_notice() {
        let mut sender = MockNotificationSender::new();
        sender.expect_channel().return_const("EMAIL");
        sender
            .expect_send()
            .with(function(|n: &Notice| {
                n.kind == NoticeKind::NoWin && n.subject == "Georgia Cash 4 Results"
            }))
            .times(1)
            .returning(|n| Ok(SendResult::delivered("EMAIL", n.notice_id.clone())));

        let notifier = Notifier::new(Arc::new(sender));
        let winning = Digits::parse("9876").unwrap();
        let result = notifier
            .notify_result(&ticket(), &winning, date(2025, 6, 16), &Outcome::lose())
            .await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_send_failure_is_not_propagated() {
        let mut sender = MockNotificationSender::new();
        sender.expect_channel().return_const("EMAIL");
        sender.expect_send().times(1).returning(|_| {
            Err(NotificationError::SendFailed {
                channel: "EMAIL".to_string(),
                reason: "HTTP 503".to_string(),
            })
        });

        let notifier = Notifier::new(Arc::new(sender));
        let result = notifier.notify_expiring(&ticket(), 1, 2).await;

        assert!(!result.success);
        assert_eq!(result.channel, "EMAIL");
        assert!(result.error.unwrap().contains("HTTP 503"));
    }

    #[tokio::test]
    async fn test_expiring_notice_contains_update_hint() {
        let mut sender = MockNotificationSender::new();
        sender.expect_channel().return_const("EMAIL");
        sender
            .expect_send()
            .with(function(|n: &Notice| {
                n.kind == NoticeKind::Expiring
                    && n.body.contains("Days Remaining: 2")
                    && n.body.contains("lot-tracker update-dates 4 ")
            }))
            .times(1)
            .returning(|n| Ok(SendResult::delivered("EMAIL", n.notice_id.clone())));

        let notifier = Notifier::new(Arc::new(sender));
        assert!(notifier.notify_expiring(&ticket(), 4, 2).await.success);
    }
}
