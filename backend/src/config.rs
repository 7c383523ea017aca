use std::env;
use std::path::PathBuf;

pub const KEY_DATA_FILE: &str = "DATA_FILE";
pub const KEY_SECRET_KEY: &str = "SECRET_KEY";
pub const KEY_LOG_LEVEL: &str = "LOG_LEVEL";
pub const KEY_BIND_ADDR: &str = "BIND_ADDR";

pub const DEFAULT_SECRET_KEY: &str = "dev";

/// Process configuration, sourced from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub secret_key: String,
    pub log_level: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            data_file: PathBuf::from(get(KEY_DATA_FILE, "data/todos.json")),
            secret_key: get(KEY_SECRET_KEY, DEFAULT_SECRET_KEY),
            log_level: get(KEY_LOG_LEVEL, "debug").to_lowercase(),
            bind_addr: get(KEY_BIND_ADDR, "0.0.0.0:3000"),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}
