//! 邮件发送器
//!
//! 通过 `NotificationSender` trait 抽象投递行为。`EmailApiSender` 调用邮件中继的
//! HTTP API；邮件配置不完整时使用 `LogSender`，只记录日志不实际发送。

use std::time::Duration;

use async_trait::async_trait;
use cash4_shared::config::MailConfig;
use cash4_shared::error::TrackerError;
use serde::Serialize;
use tracing::info;

use crate::error::NotificationError;
use crate::notice::Notice;

/// 发送结果
#[derive(Debug, Clone)]
pub struct SendResult {
    pub success: bool,
    pub channel: &'static str,
    /// 中继返回的消息标识，未返回时使用通知 ID
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl SendResult {
    pub fn delivered(channel: &'static str, message_id: String) -> Self {
        Self {
            success: true,
            channel,
            message_id: Some(message_id),
            error: None,
        }
    }

    pub fn failed(channel: &'static str, error: String) -> Self {
        Self {
            success: false,
            channel,
            message_id: None,
            error: Some(error),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notice: &Notice) -> Result<SendResult, NotificationError>;

    /// 渠道名称，用于日志与指标
    fn channel(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// 邮件中继发送器
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct MailRequest<'a> {
    from: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    text: &'a str,
}

pub struct EmailApiSender {
    client: reqwest::Client,
    api_url: String,
    config: MailConfig,
}

impl EmailApiSender {
    pub fn new(config: &MailConfig) -> Result<Self, NotificationError> {
        let api_url = config
            .api_url
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| TrackerError::InvalidArgument {
                field: "mail.api_url".to_string(),
                message: "未配置邮件中继地址".to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| TrackerError::Internal(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            client,
            api_url,
            config: config.clone(),
        })
    }

    fn send_failed(reason: impl ToString) -> NotificationError {
        NotificationError::SendFailed {
            channel: "EMAIL".to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl NotificationSender for EmailApiSender {
    async fn send(&self, notice: &Notice) -> Result<SendResult, NotificationError> {
        if notice.recipient.is_empty() {
            return Err(NotificationError::MissingRecipient);
        }

        let request = MailRequest {
            from: Address {
                email: &self.config.sender_email,
                name: Some(&self.config.sender_name),
            },
            to: vec![Address {
                email: &notice.recipient,
                name: None,
            }],
            subject: &notice.subject,
            text: &notice.body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.config.sender_password)
            .json(&request)
            .send()
            .await
            .map_err(Self::send_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::send_failed(format!("HTTP {status}")));
        }

        // 中继返回体格式不一，只尝试读取 id 字段
        let message_id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(str::to_string))
            .unwrap_or_else(|| notice.notice_id.clone());

        info!(
            channel = "EMAIL",
            notice_id = %notice.notice_id,
            kind = %notice.kind,
            message_id = %message_id,
            "邮件已发送"
        );
        Ok(SendResult::delivered(self.channel(), message_id))
    }

    fn channel(&self) -> &'static str {
        "EMAIL"
    }
}

// ---------------------------------------------------------------------------
// 日志发送器
// ---------------------------------------------------------------------------

/// 只记录日志的发送器，用于邮件配置不完整或演练运行
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, notice: &Notice) -> Result<SendResult, NotificationError> {
        if notice.recipient.is_empty() {
            return Err(NotificationError::MissingRecipient);
        }

        info!(
            channel = "LOG",
            notice_id = %notice.notice_id,
            kind = %notice.kind,
            recipient = %notice.recipient,
            subject = %notice.subject,
            body = %notice.body,
            "未配置邮件投递，仅记录通知内容"
        );
        Ok(SendResult::delivered(self.channel(), notice.notice_id.clone()))
    }

    fn channel(&self) -> &'static str {
        "LOG"
    }
}
