//! Centralized configuration (environment variables + defaults).
//!
//! `.env` is loaded by `Config::from_env`, so every variable can also live there.

use anyhow::{bail, Context};
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::info;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/farm_stand";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which `CatalogStore` backend the binaries build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => bail!("unknown store backend '{}' (expected postgres or memory)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub store_backend: StoreBackend,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            info!("DATABASE_URL not set, using default: {}", DEFAULT_DATABASE_URL);
            DEFAULT_DATABASE_URL.to_string()
        });
        let store_backend = parse_or("STORE_BACKEND", &lookup, StoreBackend::Postgres)?;
        let bind_addr = parse_or(
            "BIND_ADDR",
            &lookup,
            DEFAULT_BIND_ADDR
                .parse::<SocketAddr>()
                .context("default bind address is invalid")?,
        )?;
        let db_max_connections =
            parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?.max(1);

        Ok(Self {
            database_url,
            store_backend,
            bind_addr,
            db_max_connections,
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.db_max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn values_are_read_and_parsed() {
        let config = from_pairs(&[
            ("STORE_BACKEND", "Memory"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "0"),
        ])
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_max_connections, 1);
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = from_pairs(&[("STORE_BACKEND", "mongo")]).unwrap_err();
        assert!(err.to_string().contains("STORE_BACKEND"), "{err}");
    }
}
