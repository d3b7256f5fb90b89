//! 命令行输入校验：邮箱与日期

use cash4_shared::error::{Result, TrackerError};
use chrono::{Datelike, NaiveDate};
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub const COMMON_DOMAINS: [&str; 10] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
    "protonmail.com",
    "mail.com",
    "live.com",
    "msn.com",
];

/// 常见域名的拼写错误 -> 正确域名
const DOMAIN_TYPOS: [(&str, &str); 9] = [
    ("gmial.com", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("gmal.com", "gmail.com"),
    ("gnail.com", "gmail.com"),
    ("yaho.com", "yahoo.com"),
    ("yahooo.com", "yahoo.com"),
    ("hotmai.com", "hotmail.com"),
    ("hotmal.com", "hotmail.com"),
    ("outlok.com", "outlook.com"),
];

/// 格式合法的邮箱按域名分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailCheck {
    Common,
    /// 不在常见域名列表中，只提示不拒绝
    UncommonDomain(String),
}

pub struct EmailValidator {
    pattern: Regex,
}

impl EmailValidator {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(EMAIL_PATTERN)
            .map_err(|e| TrackerError::Internal(format!("邮箱正则编译失败: {e}")))?;
        Ok(Self { pattern })
    }

    pub fn check(&self, email: &str) -> Result<EmailCheck> {
        let email = email.trim();
        if !self.pattern.is_match(email) {
            return Err(invalid_email(format!(
                "'{email}' is not a valid email address (e.g. user@example.com)"
            )));
        }

        let domain = email
            .rsplit_once('@')
            .map(|(_, d)| d.to_ascii_lowercase())
            .unwrap_or_default();

        if let Some((_, fixed)) = DOMAIN_TYPOS.iter().find(|(typo, _)| *typo == domain) {
            return Err(invalid_email(format!("Did you mean '{fixed}'?")));
        }

        if COMMON_DOMAINS.contains(&domain.as_str()) {
            Ok(EmailCheck::Common)
        } else {
            Ok(EmailCheck::UncommonDomain(domain))
        }
    }
}

fn invalid_email(message: String) -> TrackerError {
    TrackerError::InvalidArgument {
        field: "email".to_string(),
        message,
    }
}

/// 解析日期：`YYYY-MM-DD`，或 `MM-DD`（取 `today` 所在年份）
pub fn parse_date(field: &str, input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let invalid = || TrackerError::InvalidArgument {
        field: field.to_string(),
        message: format!("无效日期 '{input}'，请使用 MM-DD 或 YYYY-MM-DD"),
    };

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let (month, day) = input.split_once('-').ok_or_else(invalid)?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(today.year(), month, day).ok_or_else(invalid)
}

/// 解析有效期并校验开始不晚于结束
pub fn parse_window(start: &str, end: &str, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date("start", start, today)?;
    let end = parse_date("end", end, today)?;
    if start > end {
        return Err(TrackerError::Validation(format!(
            "开始日期 {start} 晚于结束日期 {end}"
        )));
    }
    Ok((start, end))
}
