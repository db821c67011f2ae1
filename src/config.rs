//! Server configuration from the process environment (after `.env` is loaded).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// `DATABASE_URL`, or `CONNECTION_DB` when unset.
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit: usize,
    /// Create the target database on startup when it does not exist.
    pub create_database: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL")
            .or_else(|| get("CONNECTION_DB"))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse(
            "BIND_ADDR",
            get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        )?;
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => parse("DB_MAX_CONNECTIONS", v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit = match get("BODY_LIMIT_BYTES") {
            Some(v) => parse("BODY_LIMIT_BYTES", v)?,
            None => DEFAULT_BODY_LIMIT,
        };
        let create_database = match get("CREATE_DATABASE") {
            Some(v) => parse_bool("CREATE_DATABASE", &v)?,
            None => true,
        };

        Ok(ServerConfig {
            database_url,
            bind_addr,
            max_connections,
            body_limit,
            create_database,
        })
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: format!("{}: {}", value, e),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            message: format!("{}: expected true or false", value),
        }),
    }
}
