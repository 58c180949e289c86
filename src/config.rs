//! Environment configuration.

use std::{net::SocketAddr, time::Duration};

use anyhow::{Context, Result};

use crate::context::DEFAULT_CONTEXT_TTL;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub context_cache_ttl: Duration,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads the process environment; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .context("BIND_ADDR must be a socket address")?;
        let context_cache_ttl = match lookup("CONTEXT_CACHE_TTL_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("CONTEXT_CACHE_TTL_SECS must be a number of seconds")?,
            ),
            None => DEFAULT_CONTEXT_TTL,
        };
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("LOG_FORMAT must be pretty or json, got {}", other),
        };
        Ok(AppConfig {
            database_url,
            jwt_secret,
            bind_addr,
            context_cache_ttl,
            log_format,
        })
    }
}
