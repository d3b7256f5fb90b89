//! 投注单存储
//!
//! 投注单的模型定义、校验以及基于 JSON 文件的持久化。

pub mod error;
pub mod models;
pub mod store;

pub use error::{Result, StoreError};
pub use models::{Ticket, TicketDraft};
pub use store::{ExpiringTicket, TicketStore};
