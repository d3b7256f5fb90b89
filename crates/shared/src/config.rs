//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::draws::DrawSession;

/// 本地数据文件配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 投注单 JSON 文件
    pub tickets_file: PathBuf,
    /// 当日开奖结果缓存文件
    pub results_cache_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tickets_file: PathBuf::from("data/tickets.json"),
            results_cache_file: PathBuf::from("data/winning_numbers.json"),
        }
    }
}

/// 开奖结果抓取配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// 开奖结果页面地址（需返回已渲染的 HTML）
    pub url: String,
    pub timeout_seconds: u64,
    /// 5xx、429 与超时的最大重试次数
    pub max_retries: u32,
    /// 首次重试前等待的毫秒数，之后每次翻倍
    pub retry_initial_ms: u64,
    /// 单次等待上限（秒），`Retry-After` 也受此限制
    pub retry_max_seconds: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url: "https://www.galottery.com/en-us/games/draw-games/cash-four.html#tab-winningNumbers"
                .to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_initial_ms: 500,
            retry_max_seconds: 10,
            user_agent: "lot-tracker/0.1".to_string(),
        }
    }
}

/// 邮件投递配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// 邮件中继 HTTP API 地址，为空时只记录日志不实际发送
    pub api_url: Option<String>,
    pub sender_email: String,
    /// API 凭证，可由 EMAIL_PASSWORD 环境变量覆盖
    pub sender_password: String,
    pub sender_name: String,
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            sender_email: String::new(),
            sender_password: String::new(),
            sender_name: "Georgia Cash 4 Tracker".to_string(),
            timeout_seconds: 15,
        }
    }
}

impl MailConfig {
    /// 发件地址、凭证和 API 地址是否齐全
    pub fn is_complete(&self) -> bool {
        self.api_url.as_deref().is_some_and(|u| !u.is_empty())
            && !self.sender_email.is_empty()
            && !self.sender_password.is_empty()
    }
}

/// 每日检查任务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// 距到期不超过该天数的投注单会收到到期提醒
    pub expiry_warning_days: i64,
    /// 每日检查的场次，按开奖先后处理
    pub sessions: Vec<DrawSession>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            expiry_warning_days: 3,
            sessions: DrawSession::ALL.to_vec(),
        }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub storage: StorageConfig,
    pub fetcher: FetcherConfig,
    pub mail: MailConfig,
    pub schedule: ScheduleConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. 环境变量（CASH4_ 前缀，层级用双下划线，如 CASH4_STORAGE__TICKETS_FILE -> storage.tickets_file）
    /// 4. EMAIL_USER / EMAIL_PASSWORD（邮件凭证）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("CASH4_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let mut config = Self::load_from(service_name, &env, Path::new(&config_dir))?;
        config.apply_mail_credentials(
            std::env::var("EMAIL_USER").ok(),
            std::env::var("EMAIL_PASSWORD").ok(),
        );
        Ok(config)
    }

    /// 从指定目录加载，不读取邮件凭证环境变量
    pub fn load_from(service_name: &str, env: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{env}.toml"))).required(false))
            .add_source(
                Environment::with_prefix("CASH4")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 环境变量中的邮件凭证优先于配置文件，空值忽略
    pub fn apply_mail_credentials(&mut self, user: Option<String>, password: Option<String>) {
        if let Some(user) = user.filter(|u| !u.is_empty()) {
            self.mail.sender_email = user;
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.mail.sender_password = password;
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.tickets_file, PathBuf::from("data/tickets.json"));
        assert_eq!(config.schedule.expiry_warning_days, 3);
        assert_eq!(config.fetcher.max_retries, 3);
        assert_eq!(config.fetcher.retry_initial_ms, 500);
        assert_eq!(config.schedule.sessions.len(), 3);
        assert!(!config.mail.is_complete());
    }

    #[test]
    fn test_load_from_layers_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [storage]
            tickets_file = "/var/lib/cash4/tickets.json"

            [schedule]
            expiry_warning_days = 5
            "#,
        )
        .unwrap();
        fs::write(
            dir.path().join("test.toml"),
            r#"
            [schedule]
            expiry_warning_days = 1
            sessions = ["EVENING", "NIGHT"]
            "#,
        )
        .unwrap();

        let config = AppConfig::load_from("lot-tracker", "test", dir.path()).unwrap();
        assert_eq!(config.service_name, "lot-tracker");
        assert_eq!(config.environment, "test");
        assert_eq!(
            config.storage.tickets_file,
            PathBuf::from("/var/lib/cash4/tickets.json")
        );
        // 未配置的字段保留默认值
        assert_eq!(
            config.storage.results_cache_file,
            PathBuf::from("data/winning_numbers.json")
        );
        assert_eq!(config.schedule.expiry_warning_days, 1);
        assert_eq!(
            config.schedule.sessions,
            vec![DrawSession::Evening, DrawSession::Night]
        );
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from("lot-tracker", "development", &dir.path().join("nope"))
            .unwrap();
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_mail_credentials_override() {
        let mut config = AppConfig::default();
        config.mail.api_url = Some("https://mail.example.com/send".to_string());
        config.mail.sender_email = "file@example.com".to_string();

        config.apply_mail_credentials(Some("env@example.com".to_string()), Some(String::new()));
        assert_eq!(config.mail.sender_email, "env@example.com");
        assert!(config.mail.sender_password.is_empty());
        assert!(!config.mail.is_complete());

        config.apply_mail_credentials(None, Some("secret".to_string()));
        assert_eq!(config.mail.sender_email, "env@example.com");
        assert!(config.mail.is_complete());
    }
}
