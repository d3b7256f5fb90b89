//! 通知服务
//!
//! 把开奖结果与到期提醒渲染为邮件并投递。发送器通过 trait 抽象，
//! 单条通知失败只记录日志，不影响其它投注单的处理。

pub mod dispatcher;
pub mod error;
pub mod notice;
pub mod sender;
pub mod templates;

pub use dispatcher::Notifier;
pub use error::NotificationError;
pub use notice::{Notice, NoticeKind};
pub use sender::{EmailApiSender, LogSender, NotificationSender, SendResult};
