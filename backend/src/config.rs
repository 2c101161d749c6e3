use std::env;
use std::net::SocketAddr;

use crate::centrobank::DAILY_RATES_URL;

const DEFAULT_DATABASE_URL: &str = "sqlite:currency.db";
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);
const DEFAULT_INGEST_DAYS: u32 = 30;

/// Runtime configuration, read from the environment once at startup and
/// handed to components at construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub feed_url: String,
    /// How many trailing calendar days the rate loader covers.
    pub ingest_days: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR));
        let feed_url = env::var("CBR_FEED_URL").unwrap_or_else(|_| DAILY_RATES_URL.to_string());
        let ingest_days = env::var("INGEST_DAYS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_INGEST_DAYS);

        Self {
            database_url,
            bind_addr,
            feed_url,
            ingest_days,
        }
    }
}
