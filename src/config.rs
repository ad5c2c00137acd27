//! Runtime configuration read from the environment.
//!
//! | variable           | meaning                                          | default           |
//! |--------------------|--------------------------------------------------|-------------------|
//! | `FLEETSIM_SPECS`   | spec table file (`.yaml`, `.yml`, `.json`)       | built-in table    |
//! | `FLEETSIM_WORKERS` | worker threads for odds estimation (0 = all)     | `0`               |
//! | `FLEETSIM_LOG`     | tracing filter directive, then `RUST_LOG`        | `fleetsim=info`   |

use std::env;
use std::path::PathBuf;

pub const ENV_SPECS_PATH: &str = "FLEETSIM_SPECS";
pub const ENV_WORKERS: &str = "FLEETSIM_WORKERS";
pub const ENV_LOG: &str = "FLEETSIM_LOG";
pub const DEFAULT_LOG_FILTER: &str = "fleetsim=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Spec table to load instead of the built-in one.
    pub specs_path: Option<PathBuf>,
    pub workers: usize,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            specs_path: None,
            workers: 0,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let workers = match get(ENV_WORKERS) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                eprintln!("invalid {ENV_WORKERS} '{raw}', defaulting to {}", defaults.workers);
                defaults.workers
            }),
            None => defaults.workers,
        };

        Self {
            specs_path: get(ENV_SPECS_PATH).map(PathBuf::from),
            workers,
            log_filter: get(ENV_LOG)
                .or_else(|| get("RUST_LOG"))
                .unwrap_or(defaults.log_filter),
        }
    }
}
