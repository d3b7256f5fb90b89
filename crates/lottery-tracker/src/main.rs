//! lot-tracker 命令行入口

use anyhow::Context;
use cash4_shared::config::AppConfig;
use cash4_shared::observability;
use chrono::Local;
use clap::Parser;
use lottery_tracker::SERVICE_NAME;
use lottery_tracker::cli::{Cli, CommandRunner, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = AppConfig::load(SERVICE_NAME).context("加载配置失败")?;
    if let Some(level) = cli.log_level.clone() {
        config.observability.log_level = level;
    }
    observability::init(&config.service_name, &config.observability)?;

    let runner = CommandRunner::new(config, Local::now().date_naive());

    match cli.command {
        Commands::Add(args) => {
            runner.run_add(args)?;
        }
        Commands::List => runner.run_list()?,
        Commands::CheckActive => runner.run_check_active()?,
        Commands::Delete { ticket_number } => {
            runner.run_delete(ticket_number)?;
        }
        Commands::UpdateDates {
            ticket_number,
            start,
            end,
        } => runner.run_update_dates(ticket_number, &start, &end)?,
        Commands::Check { date } => {
            runner.run_check(date.as_deref()).await?;
        }
        Commands::Evaluate {
            play_type,
            numbers,
            winning,
            stake,
            off_count,
        } => runner.run_evaluate(play_type, &numbers, &winning, stake, off_count)?,
    }

    Ok(())
}
