//! 通知内容模型

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeKind {
    Win,
    NoWin,
    Expiring,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::NoWin => "no_win",
            Self::Expiring => "expiring",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 渲染完成、待投递的通知
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub notice_id: String,
    pub kind: NoticeKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, recipient: &str, subject: String, body: String) -> Self {
        Self {
            notice_id: Uuid::now_v7().to_string(),
            kind,
            recipient: recipient.trim().to_string(),
            subject,
            body,
        }
    }
}
