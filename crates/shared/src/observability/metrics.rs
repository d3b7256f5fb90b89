//! 业务指标
//!
//! 基于 metrics 门面记录检查、中奖、通知与抓取次数。

/// 已评估的投注单数
pub const TICKETS_EVALUATED: &str = "tickets_evaluated_total";
/// 中奖投注单数
pub const TICKETS_WON: &str = "tickets_won_total";
/// 通知发送次数（按 status 区分成功失败）
pub const NOTIFICATIONS: &str = "notifications_total";
/// 开奖结果抓取次数（按 source 区分缓存与网络）
pub const RESULT_FETCHES: &str = "result_fetches_total";

/// 注册指标描述
pub fn describe(service_name: &str) {
    metrics::describe_counter!(TICKETS_EVALUATED, "Total number of evaluated tickets");
    metrics::describe_counter!(TICKETS_WON, "Total number of winning tickets");
    metrics::describe_counter!(NOTIFICATIONS, "Total number of notification attempts");
    metrics::describe_counter!(RESULT_FETCHES, "Total number of winning number lookups");

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 记录一次投注单评估
#[inline]
pub fn record_evaluation(play_type: &str, is_winner: bool) {
    metrics::counter!(TICKETS_EVALUATED, "play_type" => play_type.to_string()).increment(1);
    if is_winner {
        metrics::counter!(TICKETS_WON, "play_type" => play_type.to_string()).increment(1);
    }
}

/// 记录一次通知发送
#[inline]
pub fn record_notification(kind: &str, success: bool) {
    let status = if success { "success" } else { "failed" };
    metrics::counter!(
        NOTIFICATIONS,
        "kind" => kind.to_string(),
        "status" => status
    )
    .increment(1);
}

/// 记录一次开奖结果获取
#[inline]
pub fn record_fetch(source: &'static str, success: bool) {
    let status = if success { "success" } else { "failed" };
    metrics::counter!(RESULT_FETCHES, "source" => source, "status" => status).increment(1);
}
