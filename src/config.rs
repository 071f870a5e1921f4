use std::env;

use anyhow::{Context, anyhow};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: PgConnectOptions,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Allowed browser origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .context("DATABASE_URL is not a valid Postgres URL")?,
            None => database_from_parts(&lookup)?,
        };
        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let cors_origins = lookup("APP_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty() && *origin != "*")
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            database,
            max_connections,
            host,
            port,
            cors_origins,
        })
    }
}

// Credentials go through the builder so that reserved URL characters in them stay literal.
fn database_from_parts<F>(lookup: &F) -> anyhow::Result<PgConnectOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &str| {
        lookup(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("{key} must be set when DATABASE_URL is absent"))
    };

    let host = required("DB_HOST")?;
    let user = required("DB_USERNAME")?;
    let name = required("DB_NAME")?;
    let port = match lookup("DB_PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("DB_PORT is not a valid port: {raw}"))?,
        None => 5432,
    };
    let ssl_mode = match lookup("DB_SSLMODE") {
        Some(raw) => raw
            .parse::<PgSslMode>()
            .with_context(|| format!("DB_SSLMODE is not a valid mode: {raw}"))?,
        None => PgSslMode::Require,
    };

    let mut options = PgConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .database(&name)
        .ssl_mode(ssl_mode);
    if let Some(password) = lookup("DB_PASSWORD").filter(|v| !v.is_empty()) {
        options = options.password(&password);
    }
    Ok(options)
}
