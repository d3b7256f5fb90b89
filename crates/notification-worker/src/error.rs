//! 通知错误类型
//!
//! 区分投递失败与收件信息缺失，调度层据此记录日志，不向上传播。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("通知发送失败: 渠道={channel}, 原因={reason}")]
    SendFailed { channel: String, reason: String },

    #[error("投注单缺少收件邮箱")]
    MissingRecipient,

    #[error(transparent)]
    Shared(#[from] cash4_shared::error::TrackerError),
}
