//! Functions Configuration
//!
//! Settings are read from environment variables with sensible defaults.

use std::path::PathBuf;
use std::str::FromStr;

use crate::runtime::RuntimeConfig;

/// Which document store backs the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Volatile, lost on exit.
    #[default]
    Memory,
    /// SQLite database under the data directory.
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

/// Functions runtime configuration.
#[derive(Debug, Clone)]
pub struct FunctionsConfig {
    /// Store backend.
    pub store_backend: StoreBackend,
    /// Directory for persistent data.
    pub data_dir: PathBuf,
    /// Attempts per change and function before giving up.
    pub max_delivery_attempts: u32,
    /// Deliveries per drain before the runtime pauses.
    pub max_cascade: usize,
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        FunctionsConfig {
            store_backend: StoreBackend::default(),
            data_dir: PathBuf::from("./data"),
            max_delivery_attempts: runtime.max_delivery_attempts,
            max_cascade: runtime.max_cascade,
        }
    }
}

impl FunctionsConfig {
    /// Loads configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        FunctionsConfig {
            store_backend: lookup("WISHY_STORE_BACKEND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_backend),
            data_dir: lookup("WISHY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            max_delivery_attempts: lookup("WISHY_MAX_DELIVERY_ATTEMPTS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_delivery_attempts),
            max_cascade: lookup("WISHY_MAX_CASCADE")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_cascade),
        }
    }

    /// Path of the SQLite database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("wishy.db")
    }

    /// Delivery limits for the runtime.
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            max_delivery_attempts: self.max_delivery_attempts,
            max_cascade: self.max_cascade,
        }
    }
}
