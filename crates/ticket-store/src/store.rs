//! 投注单文件存储
//!
//! 所有投注单保存在一个 JSON 数组文件中，每次修改后整体写回。
//! 写入先落到临时文件再重命名，进程中断时不会留下半截文件。

use std::fs;
use std::path::{Path, PathBuf};

use cash4_shared::draws::DrawSession;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::{Ticket, TicketDraft};

/// 即将到期的投注单
#[derive(Debug, Clone, Copy)]
pub struct ExpiringTicket<'a> {
    pub index: usize,
    pub ticket: &'a Ticket,
    pub days_remaining: i64,
}

pub struct TicketStore {
    path: PathBuf,
    tickets: Vec<Ticket>,
}

impl TicketStore {
    /// 打开存储文件，文件不存在时视为空列表
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tickets = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                    path: path.display().to_string(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "投注单文件不存在，从空列表开始");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), count = tickets.len(), "投注单已加载");
        Ok(Self { path, tickets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// 按存储顺序返回全部投注单
    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, index: usize) -> Result<&Ticket> {
        self.tickets.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.tickets.len(),
        })
    }

    /// 校验后追加一张投注单，返回其序号
    pub fn add(&mut self, ticket: Ticket) -> Result<usize> {
        validate(&ticket)?;
        let mut next = self.tickets.clone();
        next.push(ticket);
        self.commit(next)?;

        let index = self.tickets.len() - 1;
        info!(index, "投注单已保存");
        Ok(index)
    }

    /// 按 玩法 × 场次 展开草稿并一次性写入
    ///
    /// 任意一张校验失败则全部不写入。
    pub fn add_many(&mut self, draft: &TicketDraft, created_at: NaiveDate) -> Result<Vec<usize>> {
        let tickets = draft.expand(created_at);
        for ticket in &tickets {
            validate(ticket)?;
        }

        let first = self.tickets.len();
        let mut next = self.tickets.clone();
        next.extend(tickets);
        self.commit(next)?;

        let indices: Vec<usize> = (first..self.tickets.len()).collect();
        info!(count = indices.len(), "批量投注单已保存");
        Ok(indices)
    }

    /// 删除并返回指定投注单，后面的序号依次前移
    pub fn remove(&mut self, index: usize) -> Result<Ticket> {
        self.get(index)?;
        let mut next = self.tickets.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(index, numbers = %removed.numbers, "投注单已删除");
        Ok(removed)
    }

    /// 修改有效期，其它字段保持不变
    pub fn update_dates(&mut self, index: usize, start: NaiveDate, end: NaiveDate) -> Result<&Ticket> {
        if start > end {
            return Err(StoreError::InvalidDateRange { start, end });
        }
        self.get(index)?;
        let mut next = self.tickets.clone();
        next[index].start_date = start;
        next[index].end_date = end;
        self.commit(next)?;

        info!(index, %start, %end, "投注单有效期已更新");
        Ok(&self.tickets[index])
    }

    /// 指定日期处于有效期内的投注单
    pub fn active_on(&self, date: NaiveDate) -> Vec<(usize, &Ticket)> {
        self.tickets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_active_on(date))
            .collect()
    }

    /// 指定日期、指定场次的有效投注单
    pub fn active_for_session(&self, session: DrawSession, date: NaiveDate) -> Vec<(usize, &Ticket)> {
        self.tickets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.draw_time == session && t.is_active_on(date))
            .collect()
    }

    /// 仍有效且距到期不超过 `days` 天的投注单
    pub fn expiring_within(&self, date: NaiveDate, days: i64) -> Vec<ExpiringTicket<'_>> {
        self.tickets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_active_on(date))
            .filter_map(|(index, ticket)| {
                let days_remaining = ticket.days_remaining(date);
                (days_remaining <= days).then_some(ExpiringTicket {
                    index,
                    ticket,
                    days_remaining,
                })
            })
            .collect()
    }

    /// 先写文件，成功后才替换内存中的列表
    fn commit(&mut self, next: Vec<Ticket>) -> Result<()> {
        self.save(&next)?;
        self.tickets = next;
        Ok(())
    }

    fn save(&self, tickets: &[Ticket]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(tickets)
            .map_err(cash4_shared::error::TrackerError::from)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!(path = %self.path.display(), error = %e, "替换投注单文件失败");
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

fn validate(ticket: &Ticket) -> Result<()> {
    if ticket.start_date > ticket.end_date {
        return Err(StoreError::InvalidDateRange {
            start: ticket.start_date,
            end: ticket.end_date,
        });
    }
    if ticket.email.trim().is_empty() {
        return Err(StoreError::MissingEmail);
    }
    ticket.wager()?;
    Ok(())
}
