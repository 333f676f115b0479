use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | ledger.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | BUSINESS_TIMEZONE | UTC | 业务时区 (IANA 名称) |
/// | JWT_SECRET | - | JWT 密钥, 非开发环境必填 (≥ 32 字符) |
/// | JWT_ISSUER / JWT_AUDIENCE | ledger-server / salon-clients | JWT 校验 |
/// | LOG_LEVEL | info | 日志级别 (`RUST_LOG` 优先) |
/// | LOG_DIR | - | 日志目录 (按天滚动) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// DATABASE_PATH=/data/ledger.db BUSINESS_TIMEZONE=Europe/Madrid cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Timezone service dates and month boundaries are computed in
    pub timezone: Tz,
    pub jwt: JwtConfig,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ServerError::Config(format!("Unknown BUSINESS_TIMEZONE: {name}")))
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let timezone = match std::env::var("BUSINESS_TIMEZONE") {
            Ok(name) => parse_timezone(&name)?,
            Err(_) => Tz::UTC,
        };
        let jwt = JwtConfig::from_env(environment == "development")?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "ledger.db".into()),
            http_port: env_parse("HTTP_PORT", 3000),
            environment,
            timezone,
            jwt,
            log_level: std::env::var("LOG_LEVEL").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
        })
    }

    /// Development config for a given database, independent of the environment
    ///
    /// 常用于测试场景
    pub fn for_database(database_path: impl Into<String>, jwt: JwtConfig) -> Self {
        Self {
            database_path: database_path.into(),
            http_port: 0,
            environment: "development".into(),
            timezone: Tz::UTC,
            jwt,
            log_level: None,
            log_dir: None,
            request_timeout_ms: 30_000,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Madrid").unwrap(), Tz::Europe__Madrid);
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn test_for_database() {
        let config = Config::for_database(
            "/tmp/x.db",
            JwtConfig::with_secret("0123456789abcdef0123456789abcdef"),
        );
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.timezone, Tz::UTC);
    }
}
