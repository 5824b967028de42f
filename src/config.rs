//! Runtime configuration read from the environment (and `.env` via dotenvy).

use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";
/// Month filters always resolve against this year unless overridden.
pub const DEFAULT_REPORT_YEAR: i32 = 2023;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value \"{value}\"")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub seed_url: String,
    pub report_year: i32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value: var("BIND_ADDR").unwrap_or_default(),
            })?;

        let seed_url = var("SEED_URL").unwrap_or_else(|| DEFAULT_SEED_URL.to_string());

        let report_year = match var("REPORT_YEAR") {
            Some(value) => value.trim().parse::<i32>().map_err(|_| ConfigError::Invalid {
                name: "REPORT_YEAR",
                value,
            })?,
            None => DEFAULT_REPORT_YEAR,
        };

        Ok(Self {
            database_url,
            bind_addr,
            seed_url,
            report_year,
        })
    }
}
