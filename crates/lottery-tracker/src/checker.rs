//! 每日开奖检查
//!
//! 流程：获取各场次最新结果 -> 逐张评估当期有效的投注单 -> 发送中奖/未中奖通知，
//! 最后给即将到期的投注单发送提醒。单张票或单个场次的失败只记录日志，不中断整体流程。

use cash4_shared::config::ScheduleConfig;
use cash4_shared::observability::metrics;
use chrono::NaiveDate;
use notification_worker::Notifier;
use prize_engine::Outcome;
use results_fetcher::{DrawResult, LatestResults, ResultsFetcher};
use ticket_store::{Ticket, TicketStore};
use tracing::{error, info, warn};

/// 一次检查的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub sessions_checked: usize,
    pub sessions_missing: usize,
    pub tickets_evaluated: usize,
    pub winners: usize,
    pub ticket_errors: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
    pub expiry_reminders: usize,
}

pub struct DrawChecker<'a> {
    store: &'a TicketStore,
    fetcher: &'a ResultsFetcher,
    notifier: &'a Notifier,
    schedule: &'a ScheduleConfig,
}

impl<'a> DrawChecker<'a> {
    pub fn new(
        store: &'a TicketStore,
        fetcher: &'a ResultsFetcher,
        notifier: &'a Notifier,
        schedule: &'a ScheduleConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            notifier,
            schedule,
        }
    }

    /// 以 `today` 为运行日期执行一次完整检查
    pub async fn run(&self, today: NaiveDate) -> CheckReport {
        let mut report = CheckReport::default();

        let results = match self.fetcher.latest(today).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, code = e.code(), "获取开奖结果失败，跳过本次开奖检查");
                LatestResults::default()
            }
        };

        for session in &self.schedule.sessions {
            match results.get(*session) {
                Some(result) => {
                    info!(
                        session = %session,
                        numbers = %result.numbers,
                        draw_date = %result.draw_date,
                        "检查场次"
                    );
                    report.sessions_checked += 1;
                    self.check_session(result, &mut report).await;
                }
                None => {
                    warn!(session = %session, "未找到该场次的开奖号码");
                    report.sessions_missing += 1;
                }
            }
        }

        self.send_expiry_reminders(today, &mut report).await;

        info!(
            sessions_checked = report.sessions_checked,
            tickets_evaluated = report.tickets_evaluated,
            winners = report.winners,
            ticket_errors = report.ticket_errors,
            notifications_failed = report.notifications_failed,
            expiry_reminders = report.expiry_reminders,
            "开奖检查完成"
        );
        report
    }

    /// 评估开奖当天该场次有效的投注单
    async fn check_session(&self, result: &DrawResult, report: &mut CheckReport) {
        for (index, ticket) in self
            .store
            .active_for_session(result.session, result.draw_date)
        {
            let Some(outcome) = evaluate_ticket(index, ticket, result) else {
                report.ticket_errors += 1;
                continue;
            };
            report.tickets_evaluated += 1;
            if outcome.is_winner {
                report.winners += 1;
                info!(
                    ticket = index + 1,
                    numbers = %ticket.numbers,
                    play_type = %ticket.play_type,
                    prize = %outcome.prize_amount,
                    "投注单中奖"
                );
            }

            let sent = self
                .notifier
                .notify_result(ticket, &result.numbers, result.draw_date, &outcome)
                .await;
            if sent.success {
                report.notifications_sent += 1;
            } else {
                report.notifications_failed += 1;
            }
        }
    }

    async fn send_expiry_reminders(&self, today: NaiveDate, report: &mut CheckReport) {
        for expiring in self
            .store
            .expiring_within(today, self.schedule.expiry_warning_days)
        {
            let sent = self
                .notifier
                .notify_expiring(expiring.ticket, expiring.index + 1, expiring.days_remaining)
                .await;
            if sent.success {
                report.expiry_reminders += 1;
                info!(
                    ticket = expiring.index + 1,
                    days_remaining = expiring.days_remaining,
                    "已发送到期提醒"
                );
            } else {
                report.notifications_failed += 1;
            }
        }
    }
}

/// 单张票评估，玩法无法解析时返回 `None` 并记录日志
fn evaluate_ticket(index: usize, ticket: &Ticket, result: &DrawResult) -> Option<Outcome> {
    match ticket.wager() {
        Ok(wager) => {
            let outcome = wager.evaluate(&result.numbers);
            metrics::record_evaluation(wager.play_type.kind().as_str(), outcome.is_winner);
            Some(outcome)
        }
        Err(e) => {
            warn!(
                ticket = index + 1,
                play_type = %ticket.play_type,
                error = %e,
                code = e.code(),
                "投注单无法评估，已跳过"
            );
            None
        }
    }
}

