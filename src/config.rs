use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// Runtime configuration: listen address and the SQLite database path.
/// CLI flags win over environment variables, which win over defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub database_path: PathBuf,
}

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub bind_addr: Option<IpAddr>,
    pub db_path: Option<String>,
}

impl Config {
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let port = match overrides.port {
            Some(port) => port,
            None => parse_env("PORT", DEFAULT_PORT)?,
        };
        let bind_addr = match overrides.bind_addr {
            Some(addr) => addr,
            None => parse_env("BIND_ADDR", DEFAULT_BIND_ADDR.parse().expect("valid default"))?,
        };

        let database_path = match overrides.db_path.or_else(|| env::var("TODO_DB").ok()) {
            Some(raw) => validate_db_path(&raw)?,
            None => default_db_path()?,
        };

        Ok(Self {
            port,
            bind_addr,
            database_path,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| ConfigError::InvalidConfig(format!("Invalid {} value: {}", key, e))),
        Err(_) => {
            info!("{key} not set, using default");
            Ok(default)
        }
    }
}

fn validate_db_path(raw: &str) -> Result<PathBuf, ConfigError> {
    if raw.contains('\0') {
        return Err(ConfigError::InvalidConfig(
            "Path contains invalid characters".to_string(),
        ));
    }

    let path = PathBuf::from(shellexpand::tilde(raw).to_string());
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "Path cannot be empty".to_string(),
        ));
    }

    ensure_parent(&path)?;
    Ok(path)
}

fn default_db_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::data_dir()
        .ok_or_else(|| ConfigError::InvalidConfig("Cannot resolve data directory".to_string()))?;
    let path = base.join("todo_api").join("tasks.db");
    ensure_parent(&path)?;
    Ok(path)
}

fn ensure_parent(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_db_path_is_expanded_and_created() {
        let temp_dir = tempfile::tempdir().unwrap();
        let raw = temp_dir
            .path()
            .join("nested")
            .join("tasks.db")
            .to_str()
            .unwrap()
            .to_string();

        let path = validate_db_path(&raw).unwrap();
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    fn test_db_path_rejects_null_bytes() {
        assert!(validate_db_path("bad\0path.db").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load(ConfigOverrides {
            port: Some(8080),
            bind_addr: Some("127.0.0.1".parse().unwrap()),
            db_path: Some(temp_dir.path().join("t.db").to_str().unwrap().to_string()),
        })
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, "127.0.0.1".parse::<IpAddr>().unwrap());
    }
}
