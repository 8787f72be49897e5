//! Configuration module for the circuits backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::energy::WindowPolicy;
use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// How windows whose end precedes their start are evaluated
    pub window_policy: WindowPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("CIRCUITS_DB_PATH")
            .unwrap_or_else(|_| "./data/circuits.sqlite".to_string())
            .into();

        let raw_addr =
            env::var("CIRCUITS_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
        let bind_addr = raw_addr.parse().map_err(|e| {
            AppError::Internal(format!("Invalid CIRCUITS_BIND_ADDR '{}': {}", raw_addr, e))
        })?;

        let log_level = env::var("CIRCUITS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let window_policy = match env::var("CIRCUITS_WRAP_MIDNIGHT") {
            Ok(raw) => {
                if parse_flag(&raw).ok_or_else(|| {
                    AppError::Internal(format!("Invalid CIRCUITS_WRAP_MIDNIGHT '{}'", raw))
                })? {
                    WindowPolicy::WrapMidnight
                } else {
                    WindowPolicy::Naive
                }
            }
            Err(_) => WindowPolicy::Naive,
        };

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            window_policy,
        })
    }
}

/// Serializes tests that touch the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so every scenario lives in one test.
    #[test]
    fn test_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::remove_var("CIRCUITS_DB_PATH");
        env::remove_var("CIRCUITS_BIND_ADDR");
        env::remove_var("CIRCUITS_LOG_LEVEL");
        env::remove_var("CIRCUITS_WRAP_MIDNIGHT");

        let config = Config::from_env().unwrap();
        assert_eq!(config.db_path, PathBuf::from("./data/circuits.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.window_policy, WindowPolicy::Naive);

        env::set_var("CIRCUITS_WRAP_MIDNIGHT", "true");
        env::set_var("CIRCUITS_BIND_ADDR", "0.0.0.0:8088");
        let config = Config::from_env().unwrap();
        assert_eq!(config.window_policy, WindowPolicy::WrapMidnight);
        assert_eq!(config.bind_addr.port(), 8088);

        env::set_var("CIRCUITS_BIND_ADDR", "not-an-address");
        assert!(Config::from_env().is_err());
        env::remove_var("CIRCUITS_BIND_ADDR");

        env::set_var("CIRCUITS_WRAP_MIDNIGHT", "maybe");
        assert!(Config::from_env().is_err());
        env::remove_var("CIRCUITS_WRAP_MIDNIGHT");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("sometimes"), None);
    }
}
