//! 开奖结果模型

use std::collections::BTreeMap;

use cash4_shared::draws::DrawSession;
use chrono::NaiveDate;
use prize_engine::WinningNumber;
use serde::{Deserialize, Serialize};

/// 单场开奖结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub session: DrawSession,
    pub numbers: WinningNumber,
    pub draw_date: NaiveDate,
}

/// 每个场次的最新一期结果，场次缺失表示页面上没有该场次的数据
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestResults {
    draws: BTreeMap<DrawSession, DrawResult>,
}

impl LatestResults {
    /// 已有同场次结果时保留先出现的（页面按时间倒序排列）
    pub fn insert_if_absent(&mut self, result: DrawResult) -> bool {
        if self.draws.contains_key(&result.session) {
            return false;
        }
        self.draws.insert(result.session, result);
        true
    }

    pub fn get(&self, session: DrawSession) -> Option<&DrawResult> {
        self.draws.get(&session)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawResult> {
        self.draws.values()
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// 三个场次是否都已齐全
    pub fn is_complete(&self) -> bool {
        self.draws.len() == DrawSession::ALL.len()
    }
}

impl FromIterator<DrawResult> for LatestResults {
    fn from_iter<I: IntoIterator<Item = DrawResult>>(iter: I) -> Self {
        let mut results = Self::default();
        for result in iter {
            results.insert_if_absent(result);
        }
        results
    }
}
