//! 当日开奖结果缓存
//!
//! 文件格式：
//!
//! ```json
//! { "date": "2025-06-17", "numbers": { "night": { "numbers": "4177", "draw_date": "2025-06-16" } } }
//! ```
//!
//! `date` 是写入缓存的运行日期，只有同一天的运行才会复用。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use cash4_shared::draws::DrawSession;
use cash4_shared::error::TrackerError;
use chrono::NaiveDate;
use prize_engine::WinningNumber;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{DrawResult, LatestResults};

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    date: NaiveDate,
    numbers: BTreeMap<String, CachedDraw>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedDraw {
    numbers: WinningNumber,
    draw_date: NaiveDate,
}

pub struct ResultsCache {
    path: PathBuf,
}

impl ResultsCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取 `today` 当天写入的缓存
    ///
    /// 文件不存在、日期不符或内容损坏都视为未命中。
    pub fn load(&self, today: NaiveDate) -> Option<LatestResults> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "读取开奖缓存失败");
                }
                return None;
            }
        };

        let file: CacheFile = match serde_json::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "开奖缓存内容损坏，忽略");
                return None;
            }
        };

        if file.date != today {
            debug!(cached = %file.date, %today, "开奖缓存已过期");
            return None;
        }

        let results: LatestResults = file
            .numbers
            .into_iter()
            .filter_map(|(key, draw)| {
                let session = key.parse::<DrawSession>().ok()?;
                Some(DrawResult {
                    session,
                    numbers: draw.numbers,
                    draw_date: draw.draw_date,
                })
            })
            .collect();

        (!results.is_empty()).then_some(results)
    }

    /// 覆盖写入缓存
    pub fn save(&self, today: NaiveDate, results: &LatestResults) -> Result<()> {
        let file = CacheFile {
            date: today,
            numbers: results
                .iter()
                .map(|r| {
                    (
                        r.session.key().to_string(),
                        CachedDraw {
                            numbers: r.numbers,
                            draw_date: r.draw_date,
                        },
                    )
                })
                .collect(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(TrackerError::from)?;
        }
        let json = serde_json::to_string_pretty(&file).map_err(TrackerError::from)?;
        fs::write(&self.path, json).map_err(TrackerError::from)?;
        debug!(path = %self.path.display(), count = results.len(), "开奖缓存已写入");
        Ok(())
    }
}
