use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

const DEFAULT_DATABASE_PATH: &str = "summaries.db";
const DEFAULT_EXTRACT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub database_path: PathBuf,
    pub extract_timeout: Duration,
    pub request_timeout: Duration,
    /// Optional JSON file merged over the built-in translation table.
    pub translation_table_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let extract_timeout = parse_secs(&lookup, "EXTRACT_TIMEOUT_SECS", DEFAULT_EXTRACT_TIMEOUT_SECS)?;
        let request_timeout = parse_secs(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let translation_table_path = lookup("TRANSLATION_TABLE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            server_addr,
            database_path,
            extract_timeout,
            request_timeout,
            translation_table_path,
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e)))?,
        None => default,
    };

    if secs == 0 {
        return Err(AppError::Config(format!("{} must be greater than zero", key)));
    }

    Ok(Duration::from_secs(secs))
}
