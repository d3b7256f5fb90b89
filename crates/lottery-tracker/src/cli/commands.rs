//! CLI 命令定义
//!
//! 投注单编号对用户从 1 开始，与 `list` 输出一致。

use cash4_shared::draws::DrawSession;
use clap::{Args, Parser, Subcommand};
use prize_engine::{Digits, PlayKind, Stake};

/// Georgia Cash 4 号码追踪工具
#[derive(Parser, Debug)]
#[command(name = "lot-tracker")]
#[command(version, about = "Georgia Lottery Cash 4 number tracker")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别，覆盖配置文件 (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 新增投注单，每个 玩法 × 场次 组合生成一张
    Add(AddArgs),

    /// 列出全部投注单
    List,

    /// 列出今天有效的投注单
    CheckActive,

    /// 删除投注单
    Delete {
        /// 投注单编号（1 起始）
        ticket_number: usize,
    },

    /// 修改投注单有效期
    UpdateDates {
        /// 投注单编号（1 起始）
        ticket_number: usize,

        /// 新开始日期（MM-DD 或 YYYY-MM-DD）
        #[arg(long)]
        start: String,

        /// 新结束日期（MM-DD 或 YYYY-MM-DD）
        #[arg(long)]
        end: String,
    },

    /// 执行每日开奖检查并发送通知
    Check {
        /// 运行日期，默认今天（YYYY-MM-DD）
        #[arg(long)]
        date: Option<String>,
    },

    /// 不读写投注单，直接评估一组号码
    Evaluate {
        #[arg(short, long)]
        play_type: PlayKind,

        /// 投注号码
        #[arg(short, long)]
        numbers: Digits,

        /// 开奖号码
        #[arg(short, long)]
        winning: Digits,

        #[arg(long, default_value = "1")]
        stake: Stake,

        /// 1-Off 允许偏差的位数（1-4）
        #[arg(long)]
        off_count: Option<u8>,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// 4 位号码，如 1234
    #[arg(short, long)]
    pub numbers: Digits,

    /// 通知邮箱
    #[arg(short, long)]
    pub email: String,

    /// 玩法，可重复：straight, box, straightbox, combo, oneoff
    #[arg(short, long = "play-type", required = true)]
    pub play_types: Vec<PlayKind>,

    /// 开奖场次，可重复：midday, evening, night
    #[arg(short, long = "draw", required = true)]
    pub draws: Vec<DrawSession>,

    /// 开始日期（MM-DD 或 YYYY-MM-DD）
    #[arg(long)]
    pub start: String,

    /// 结束日期（MM-DD 或 YYYY-MM-DD）
    #[arg(long)]
    pub end: String,

    /// 每张投注额
    #[arg(long, default_value = "1")]
    pub stake: Stake,

    /// 1-Off 允许偏差的位数（1-4）
    #[arg(long)]
    pub off_count: Option<u8>,
}
