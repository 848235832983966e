use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got `{0}`")]
    InvalidPort(String),
    #[error("HOST must be an IP address, got `{0}`")]
    InvalidHost(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub addr: SocketAddr,
}

impl Config {
    /// Reads `DATABASE_URL`, `HOST` and `PORT` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host.trim().parse().map_err(|_| ConfigError::InvalidHost(host.clone()))?;
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { database_url, addr: SocketAddr::new(host, port) })
    }
}
