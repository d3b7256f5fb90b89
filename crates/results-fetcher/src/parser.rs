//! 开奖结果页面解析
//!
//! 页面结构（已渲染的 HTML）：
//!
//! ```text
//! div#winningNumbersSearchResults
//!   table.table-winning-numbers-pick
//!     tr[data-toggle="tableWinningNumbers"]      按时间倒序
//!       td[title="date"]            06/16/2025 <div class="draw-time">Night</div>
//!       td[title="Winning Number"]  <span><i>4</i></span> ...
//! ```
//!
//! 每个场次只取第一行，三场齐全后停止。格式不对的行直接跳过。

use cash4_shared::draws::DrawSession;
use chrono::NaiveDate;
use prize_engine::Digits;
use regex::Regex;
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::models::{DrawResult, LatestResults};

const DATE_FORMAT: &str = "%m/%d/%Y";

pub struct ResultsParser {
    container: Regex,
    table: Regex,
    row: Regex,
    date_cell: Regex,
    draw_time: Regex,
    numbers_cell: Regex,
    digit: Regex,
    tag: Regex,
}

impl ResultsParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            container: Regex::new(r#"<div[^>]*\bid\s*=\s*"winningNumbersSearchResults""#)?,
            table: Regex::new(
                r#"(?is)<table[^>]*\bclass\s*=\s*"[^"]*\btable-winning-numbers-pick\b[^"]*"[^>]*>(.*?)</table>"#,
            )?,
            row: Regex::new(
                r#"(?is)<tr[^>]*\bdata-toggle\s*=\s*"tableWinningNumbers"[^>]*>(.*?)</tr>"#,
            )?,
            date_cell: Regex::new(r#"(?is)<td[^>]*\btitle\s*=\s*"date"[^>]*>(.*?)</td>"#)?,
            draw_time: Regex::new(
                r#"(?is)<div[^>]*\bclass\s*=\s*"[^"]*\bdraw-time\b[^"]*"[^>]*>(.*?)</div>"#,
            )?,
            numbers_cell: Regex::new(
                r#"(?is)<td[^>]*\btitle\s*=\s*"Winning Number"[^>]*>(.*?)</td>"#,
            )?,
            digit: Regex::new(r"(?is)<span[^>]*>\s*<i[^>]*>\s*(\d)\s*</i>")?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
        })
    }

    /// 解析页面中每个场次的最新结果
    ///
    /// 找不到结果容器或表格时返回 `TableNotFound`；表格存在但没有可用行时返回空结果。
    pub fn parse(&self, html: &str) -> Result<LatestResults> {
        let start = self
            .container
            .find(html)
            .ok_or(FetchError::TableNotFound("div#winningNumbersSearchResults"))?
            .start();
        let table = self
            .table
            .captures(&html[start..])
            .and_then(|c| c.get(1))
            .ok_or(FetchError::TableNotFound("table.table-winning-numbers-pick"))?
            .as_str();

        let mut results = LatestResults::default();
        for row in self.row.captures_iter(table) {
            let Some(body) = row.get(1) else { continue };
            match self.parse_row(body.as_str()) {
                Some(result) => {
                    results.insert_if_absent(result);
                    if results.is_complete() {
                        break;
                    }
                }
                None => debug!("跳过无法解析的开奖行"),
            }
        }
        Ok(results)
    }

    fn parse_row(&self, row: &str) -> Option<DrawResult> {
        let date_cell = self.date_cell.captures(row)?.get(1)?.as_str();

        // 日期是场次 div 之前的文本
        let date_text = date_cell.split('<').next()?.trim();
        let draw_date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).ok()?;

        let label = self.draw_time.captures(date_cell)?.get(1)?.as_str();
        let session = DrawSession::from_label(&self.strip_tags(label))?;

        let numbers_cell = self.numbers_cell.captures(row)?.get(1)?.as_str();
        let digits: String = self
            .digit
            .captures_iter(numbers_cell)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        let numbers = Digits::parse(&digits).ok()?;

        Some(DrawResult {
            session,
            numbers,
            draw_date,
        })
    }

    fn strip_tags(&self, fragment: &str) -> String {
        self.tag.replace_all(fragment, "").trim().to_string()
    }
}
