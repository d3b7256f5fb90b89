//! 每日开奖检查端到端测试
//!
//! 页面来源与邮件发送器使用 mockall 替身，投注单与开奖缓存写入临时目录。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cash4_shared::config::ScheduleConfig;
use cash4_shared::draws::DrawSession;
use cash4_shared::error::TrackerError;
use chrono::NaiveDate;
use lottery_tracker::{CheckReport, DrawChecker};
use mockall::mock;
use notification_worker::{
    Notice, NoticeKind, NotificationError, NotificationSender, Notifier, SendResult,
};
use prize_engine::{Digits, Stake};
use results_fetcher::{ResultsCache, ResultsFetcher, ResultsSource};
use ticket_store::{Ticket, TicketStore};

mock! {
    pub Source {}

    #[async_trait]
    impl ResultsSource for Source {
        async fn fetch_page(&self) -> cash4_shared::error::Result<String>;
    }
}

mock! {
    pub Sender {}

    #[async_trait]
    impl NotificationSender for Sender {
        async fn send(&self, notice: &Notice) -> Result<SendResult, NotificationError>;
        fn channel(&self) -> &'static str;
    }
}

const PAGE: &str = r#"
<div id="winningNumbersSearchResults">
  <table class="table-winning-numbers-pick">
    <tr data-toggle="tableWinningNumbers">
      <td title="date">06/16/2026<div class="draw-time">Night</div></td>
      <td title="Winning Number"><span><i>1</i></span><span><i>2</i></span><span><i>3</i></span><span><i>4</i></span></td>
    </tr>
    <tr data-toggle="tableWinningNumbers">
      <td title="date">06/16/2026<div class="draw-time">Evening</div></td>
      <td title="Winning Number"><span><i>5</i></span><span><i>6</i></span><span><i>7</i></span><span><i>8</i></span></td>
    </tr>
  </table>
</div>"#;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(6, 17)
}

fn ticket(numbers: &str, play_type: &str, session: DrawSession, start: NaiveDate, end: NaiveDate) -> Ticket {
    Ticket {
        numbers: Digits::parse(numbers).unwrap(),
        play_type: play_type.to_string(),
        off_count: None,
        stake: Stake::default(),
        draw_time: session,
        start_date: start,
        end_date: end,
        email: "player@gmail.com".to_string(),
        created_at: date(6, 1),
    }
}

/// 直接写文件，以便混入无法通过校验的旧记录
fn seed_store(dir: &tempfile::TempDir) -> TicketStore {
    let tickets = vec![
        ticket("1234", "straight", DrawSession::Night, date(6, 1), date(6, 30)),
        ticket("4321", "box", DrawSession::Night, date(6, 1), date(6, 30)),
        ticket("1234", "pick5", DrawSession::Night, date(6, 1), date(6, 30)),
        ticket("9999", "straight", DrawSession::Evening, date(6, 1), date(6, 30)),
        // 开奖日尚未生效
        ticket("1234", "straight", DrawSession::Night, date(6, 17), date(6, 30)),
        // 午间场无结果，但明天到期
        ticket("1111", "combo", DrawSession::Midday, date(6, 1), date(6, 18)),
    ];
    let path = dir.path().join("tickets.json");
    std::fs::write(&path, serde_json::to_string_pretty(&tickets).unwrap()).unwrap();
    TicketStore::open(path).unwrap()
}

fn fetcher(dir: &tempfile::TempDir, source: MockSource) -> ResultsFetcher {
    ResultsFetcher::new(
        Arc::new(source),
        ResultsCache::new(dir.path().join("winning_numbers.json")),
    )
    .unwrap()
}

/// 记录每条通知的类型与正文
fn recording_sender(deliver: bool) -> (MockSender, Arc<Mutex<Vec<(NoticeKind, String)>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let log = sent.clone();
    let mut sender = MockSender::new();
    sender.expect_channel().return_const("EMAIL");
    sender.expect_send().returning(move |notice| {
        log.lock()
            .unwrap()
            .push((notice.kind, notice.body.clone()));
        if deliver {
            Ok(SendResult::delivered("EMAIL", notice.notice_id.clone()))
        } else {
            Err(NotificationError::SendFailed {
                channel: "EMAIL".to_string(),
                reason: "HTTP 503".to_string(),
            })
        }
    });
    (sender, sent)
}

#[tokio::test]
async fn daily_check_evaluates_notifies_and_reminds() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);

    let mut source = MockSource::new();
    source
        .expect_fetch_page()
        .times(1)
        .returning(|| Ok(PAGE.to_string()));
    let fetcher = fetcher(&dir, source);

    let (sender, sent) = recording_sender(true);
    let notifier = Notifier::new(Arc::new(sender));
    let schedule = ScheduleConfig::default();

    let report = DrawChecker::new(&store, &fetcher, &notifier, &schedule)
        .run(today())
        .await;

    assert_eq!(
        report,
        CheckReport {
            sessions_checked: 2,
            sessions_missing: 1,
            tickets_evaluated: 3,
            winners: 2,
            ticket_errors: 1,
            notifications_sent: 3,
            notifications_failed: 0,
            expiry_reminders: 1,
        }
    );

    let sent = sent.lock().unwrap();
    let kinds: Vec<NoticeKind> = sent.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        kinds,
        vec![
            NoticeKind::NoWin,
            NoticeKind::Win,
            NoticeKind::Win,
            NoticeKind::Expiring
        ]
    );
    assert!(sent[1].1.contains("Prize Amount: $5,000.00"));
    assert!(sent[2].1.contains("Prize Amount: $200.00"));
    assert!(sent[3].1.contains("lot-tracker update-dates 6 "));
    assert!(dir.path().join("winning_numbers.json").exists());
}

#[tokio::test]
async fn fetch_failure_still_sends_expiry_reminders() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);

    let mut source = MockSource::new();
    source.expect_fetch_page().times(1).returning(|| {
        Err(TrackerError::ExternalServiceTimeout {
            service: "galottery".to_string(),
        })
    });
    let fetcher = fetcher(&dir, source);

    let (sender, sent) = recording_sender(true);
    let notifier = Notifier::new(Arc::new(sender));
    let schedule = ScheduleConfig::default();

    let report = DrawChecker::new(&store, &fetcher, &notifier, &schedule)
        .run(today())
        .await;

    assert_eq!(report.sessions_checked, 0);
    assert_eq!(report.sessions_missing, 3);
    assert_eq!(report.tickets_evaluated, 0);
    assert_eq!(report.expiry_reminders, 1);
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delivery_failures_do_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);

    let mut source = MockSource::new();
    source
        .expect_fetch_page()
        .returning(|| Ok(PAGE.to_string()));
    let fetcher = fetcher(&dir, source);

    let (sender, sent) = recording_sender(false);
    let notifier = Notifier::new(Arc::new(sender));
    let schedule = ScheduleConfig {
        sessions: vec![DrawSession::Night],
        ..ScheduleConfig::default()
    };

    let report = DrawChecker::new(&store, &fetcher, &notifier, &schedule)
        .run(today())
        .await;

    assert_eq!(report.sessions_checked, 1);
    assert_eq!(report.tickets_evaluated, 2);
    assert_eq!(report.notifications_sent, 0);
    assert_eq!(report.notifications_failed, 3);
    assert_eq!(report.expiry_reminders, 0);
    assert_eq!(sent.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn cached_results_skip_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);

    let mut first = MockSource::new();
    first
        .expect_fetch_page()
        .times(1)
        .returning(|| Ok(PAGE.to_string()));
    let (sender, _) = recording_sender(true);
    let notifier = Notifier::new(Arc::new(sender));
    let schedule = ScheduleConfig::default();
    DrawChecker::new(&store, &fetcher(&dir, first), &notifier, &schedule)
        .run(today())
        .await;

    let mut second = MockSource::new();
    second.expect_fetch_page().times(0);
    let report = DrawChecker::new(&store, &fetcher(&dir, second), &notifier, &schedule)
        .run(today())
        .await;
    assert_eq!(report.sessions_checked, 2);
}
