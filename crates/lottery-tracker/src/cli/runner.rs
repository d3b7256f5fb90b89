//! 命令执行器
//!
//! 把命令行参数转为投注单存储、开奖检查和奖金评估调用，结果输出到标准输出。

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use cash4_shared::config::{AppConfig, MailConfig};
use chrono::NaiveDate;
use notification_worker::templates::format_money;
use notification_worker::{EmailApiSender, LogSender, NotificationSender, Notifier};
use prize_engine::{Digits, PlayKind, PlayOptions, Stake, create_play_type};
use results_fetcher::{HttpResultsSource, ResultsCache, ResultsFetcher};
use ticket_store::{Ticket, TicketDraft, TicketStore};
use tracing::{info, warn};

use crate::checker::{CheckReport, DrawChecker};
use crate::cli::commands::AddArgs;
use crate::validation::{EmailCheck, EmailValidator, parse_date, parse_window};

pub struct CommandRunner {
    config: AppConfig,
    today: NaiveDate,
}

impl CommandRunner {
    pub fn new(config: AppConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    fn open_store(&self) -> Result<TicketStore> {
        let path = &self.config.storage.tickets_file;
        TicketStore::open(path).with_context(|| format!("打开投注单文件失败: {}", path.display()))
    }

    /// 执行 add 命令，返回新投注单的编号（1 起始）
    pub fn run_add(&self, args: AddArgs) -> Result<Vec<usize>> {
        match EmailValidator::new()?.check(&args.email)? {
            EmailCheck::Common => {}
            EmailCheck::UncommonDomain(domain) => {
                println!(
                    "Warning: '{domain}' is not a common email domain. Please verify your email address."
                );
            }
        }

        if args.off_count.is_some() && !args.play_types.contains(&PlayKind::OneOff) {
            warn!("--off-count 仅对 oneoff 玩法生效");
        }

        let (start_date, end_date) = parse_window(&args.start, &args.end, self.today)?;
        let draft = TicketDraft {
            numbers: args.numbers,
            play_types: dedup(args.play_types),
            draw_times: dedup(args.draws),
            start_date,
            end_date,
            email: args.email.trim().to_string(),
            stake: args.stake,
            off_count: args.off_count,
        };

        let mut store = self.open_store()?;
        let indices = store
            .add_many(&draft, self.today)
            .context("保存投注单失败")?;
        let numbers: Vec<usize> = indices.iter().map(|i| i + 1).collect();

        println!("\nSuccessfully added {} ticket(s):", numbers.len());
        for number in &numbers {
            let ticket = store.get(number - 1)?;
            println!(
                "  #{number}  {} play for {} drawing ({} per play)",
                ticket.play_type, ticket.draw_time, ticket.stake
            );
        }
        println!("Valid from {start_date} to {end_date}");
        Ok(numbers)
    }

    /// 执行 list 命令
    pub fn run_list(&self) -> Result<()> {
        let store = self.open_store()?;
        if store.is_empty() {
            println!("No tickets found.");
            return Ok(());
        }

        for (index, ticket) in store.list().iter().enumerate() {
            print_ticket(index + 1, ticket);
        }
        Ok(())
    }

    /// 执行 check-active 命令
    pub fn run_check_active(&self) -> Result<()> {
        let store = self.open_store()?;
        let active = store.active_on(self.today);
        if active.is_empty() {
            println!("No active tickets found.");
            return Ok(());
        }

        println!("Found {} active ticket(s):", active.len());
        for (index, ticket) in active {
            print_ticket(index + 1, ticket);
        }
        Ok(())
    }

    /// 执行 delete 命令
    pub fn run_delete(&self, ticket_number: usize) -> Result<Ticket> {
        let mut store = self.open_store()?;
        let index = to_index(ticket_number, store.len())?;
        let removed = store.remove(index)?;

        println!("Ticket #{ticket_number} deleted:");
        print_ticket(ticket_number, &removed);
        Ok(removed)
    }

    /// 执行 update-dates 命令
    pub fn run_update_dates(&self, ticket_number: usize, start: &str, end: &str) -> Result<()> {
        let (start, end) = parse_window(start, end, self.today)?;
        let mut store = self.open_store()?;
        let index = to_index(ticket_number, store.len())?;
        store.update_dates(index, start, end)?;

        println!("Ticket #{ticket_number} is now valid from {start} to {end}.");
        Ok(())
    }

    /// 执行 check 命令：每日开奖检查
    pub async fn run_check(&self, date: Option<&str>) -> Result<CheckReport> {
        let today = match date {
            Some(date) => parse_date("date", date, self.today)?,
            None => self.today,
        };

        let store = self.open_store()?;
        let source = HttpResultsSource::new(&self.config.fetcher)?;
        let fetcher = ResultsFetcher::new(
            Arc::new(source),
            ResultsCache::new(&self.config.storage.results_cache_file),
        )?;
        let notifier = Notifier::new(build_sender(&self.config.mail)?);

        info!(%today, tickets = store.len(), channel = notifier.channel(), "开始每日开奖检查");
        let report = DrawChecker::new(&store, &fetcher, &notifier, &self.config.schedule)
            .run(today)
            .await;

        println!("Check for {today} finished:");
        println!("  sessions checked:   {}", report.sessions_checked);
        println!("  sessions missing:   {}", report.sessions_missing);
        println!("  tickets evaluated:  {}", report.tickets_evaluated);
        println!("  winners:            {}", report.winners);
        println!("  skipped tickets:    {}", report.ticket_errors);
        println!("  expiry reminders:   {}", report.expiry_reminders);
        println!("  failed deliveries:  {}", report.notifications_failed);
        Ok(report)
    }

    /// 执行 evaluate 命令
    pub fn run_evaluate(
        &self,
        play_type: PlayKind,
        numbers: &Digits,
        winning: &Digits,
        stake: Stake,
        off_count: Option<u8>,
    ) -> Result<()> {
        let wager = create_play_type(
            play_type.as_str(),
            &numbers.to_string(),
            stake,
            PlayOptions { off_count },
        )?;
        let outcome = wager.evaluate(winning);

        println!("Play:    {} {numbers} ({stake})", wager.play_type);
        println!("Winning: {winning}");
        if outcome.is_winner {
            println!("Result:  WIN {}", format_money(outcome.prize_amount));
        } else {
            println!("Result:  NO WIN");
        }
        Ok(())
    }
}

/// 邮件配置齐全时使用邮件中继，否则只记录日志
pub fn build_sender(config: &MailConfig) -> Result<Arc<dyn NotificationSender>> {
    if config.is_complete() {
        Ok(Arc::new(EmailApiSender::new(config)?))
    } else {
        warn!("邮件配置不完整（mail.api_url / EMAIL_USER / EMAIL_PASSWORD），通知只写入日志");
        Ok(Arc::new(LogSender))
    }
}

fn to_index(ticket_number: usize, len: usize) -> Result<usize> {
    if len == 0 {
        bail!("No tickets found.");
    }
    if ticket_number == 0 || ticket_number > len {
        bail!("Invalid ticket number {ticket_number}. Please enter a number between 1 and {len}");
    }
    Ok(ticket_number - 1)
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

fn print_ticket(number: usize, ticket: &Ticket) {
    println!("\nTicket #{number}:");
    println!("  Numbers:    {}", ticket.numbers);
    match ticket.off_count {
        Some(off) => println!("  Play Type:  {} (off by {off})", ticket.play_type),
        None => println!("  Play Type:  {}", ticket.play_type),
    }
    println!("  Stake:      {}", ticket.stake);
    println!("  Draw Time:  {} ({})", ticket.draw_time, ticket.draw_time.draw_time());
    println!("  Start Date: {}", ticket.start_date);
    println!("  End Date:   {}", ticket.end_date);
    println!("  Email:      {}", ticket.email);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cash4_shared::draws::DrawSession;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn runner(dir: &tempfile::TempDir) -> CommandRunner {
        let mut config = AppConfig::default();
        config.storage.tickets_file = dir.path().join("tickets.json");
        config.storage.results_cache_file = dir.path().join("winning_numbers.json");
        CommandRunner::new(config, date(2026, 6, 15))
    }

    fn add_args(email: &str) -> AddArgs {
        AddArgs {
            numbers: Digits::parse("1234").unwrap(),
            email: email.to_string(),
            play_types: vec![PlayKind::Straight, PlayKind::Box, PlayKind::Straight],
            draws: vec![DrawSession::Midday, DrawSession::Night],
            start: "06-16".to_string(),
            end: "06-30".to_string(),
            stake: Stake::default(),
            off_count: None,
        }
    }

    #[test]
    fn test_add_creates_one_ticket_per_combination() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(&dir);

        let numbers = runner.run_add(add_args("player@gmail.com")).unwrap();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let store = TicketStore::open(dir.path().join("tickets.json")).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.get(0).unwrap().start_date, date(2026, 6, 16));
        assert_eq!(store.get(3).unwrap().play_type, "box");
        assert_eq!(store.get(3).unwrap().draw_time, DrawSession::Night);
        assert_eq!(store.get(0).unwrap().created_at, date(2026, 6, 15));
    }

    #[test]
    fn test_add_rejects_typo_email() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(&dir);
        assert!(runner.run_add(add_args("player@gmial.com")).is_err());
        assert!(!dir.path().join("tickets.json").exists());
    }

    #[test]
    fn test_delete_and_update_use_one_based_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(&dir);
        runner.run_add(add_args("player@gmail.com")).unwrap();

        runner.run_update_dates(2, "07-01", "2026-07-31").unwrap();
        let store = TicketStore::open(dir.path().join("tickets.json")).unwrap();
        assert_eq!(store.get(1).unwrap().end_date, date(2026, 7, 31));
        assert_eq!(store.get(0).unwrap().end_date, date(2026, 6, 30));

        let removed = runner.run_delete(1).unwrap();
        assert_eq!(removed.draw_time, DrawSession::Midday);
        assert_eq!(removed.play_type, "straight");

        assert!(runner.run_delete(0).is_err());
        assert!(runner.run_delete(4).is_err());
        assert!(runner.run_update_dates(1, "07-31", "07-01").is_err());
    }

    #[test]
    fn test_list_and_evaluate() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(&dir);
        runner.run_list().unwrap();
        runner.run_check_active().unwrap();

        let numbers = Digits::parse("1211").unwrap();
        let winning = Digits::parse("1112").unwrap();
        runner
            .run_evaluate(PlayKind::Box, &numbers, &winning, Stake::default(), None)
            .unwrap();
        assert!(
            runner
                .run_evaluate(PlayKind::OneOff, &numbers, &winning, Stake::default(), Some(7))
                .is_err()
        );
    }

    #[test]
    fn test_build_sender_falls_back_to_log() {
        let sender = build_sender(&MailConfig::default()).unwrap();
        assert_eq!(sender.channel(), "LOG");

        let config = MailConfig {
            api_url: Some("https://mail.example.com/v1/send".to_string()),
            sender_email: "tracker@example.com".to_string(),
            sender_password: "secret".to_string(),
            ..MailConfig::default()
        };
        assert_eq!(build_sender(&config).unwrap().channel(), "EMAIL");
    }
}
