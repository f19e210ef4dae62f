//! Configuration module for the worship backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to the static schedule JSON file
    pub schedule_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("WORSHIP_DB_PATH")
            .unwrap_or_else(|_| "./data/worship.sqlite".to_string())
            .into();

        let schedule_path = env::var("WORSHIP_SCHEDULE_PATH")
            .unwrap_or_else(|_| "./data/schedule.json".to_string())
            .into();

        let bind_addr = env::var("WORSHIP_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid WORSHIP_BIND_ADDR format");

        let log_level = env::var("WORSHIP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            schedule_path,
            bind_addr,
            log_level,
        }
    }
}
