use std::str::FromStr;
use std::time::Duration;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub application: ApplicationSettings,
    /// `None` runs against the in-memory store.
    pub database: Option<DatabaseSettings>,
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub sqlx_logging: bool,
}

impl Settings {
    /// Reads settings from the process environment (after `dotenv`).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let application = ApplicationSettings {
            host: lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "APP_PORT", 5000)?,
        };

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => Some(DatabaseSettings {
                url,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 1)?,
                connect_timeout: Duration::from_secs(parse_or(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 8)?),
                sqlx_logging: parse_or(&lookup, "DATABASE_SQLX_LOGGING", false)?,
            }),
            None => None,
        };

        Ok(Self {
            application,
            database,
            log_filter: lookup("LOG_FILTER").unwrap_or_else(|| "info,sqlx=warn".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
