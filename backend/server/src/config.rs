use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is required but not set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub supabase_url: String,
    pub supabase_key: String,
    pub users_table: String,
    pub datastore_timeout: Duration,
    pub frontend_url: Option<String>,
}

impl Config {
    /// Secrets mounted under `/run/secrets` take precedence over the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| read_secret(key).or_else(|| var(key)))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms: u64 = try_load(&lookup, "DATASTORE_TIMEOUT_MS", "10000")?;

        Ok(Self {
            port: try_load(&lookup, "RUST_PORT", "8000")?,
            supabase_url: require(&lookup, "SUPABASE_URL")?,
            supabase_key: require(&lookup, "SUPABASE_KEY")?,
            users_table: try_load(&lookup, "USERS_TABLE", "users")?,
            datastore_timeout: Duration::from_millis(timeout_ms),
            frontend_url: lookup("FRONTEND_URL").filter(|url| !url.trim().is_empty()),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn require<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");

            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path).map(|s| s.trim().to_string()).ok()
}
