//! Engine configuration resolved from the environment.
//!
//! Every value has a default so the binary runs with no setup at all;
//! command-line flags are applied on top by the caller.

use std::path::PathBuf;
use std::time::Duration;

pub const ENV_ROOT: &str = "MOCKDOCK_ROOT";
pub const ENV_PROGRESS_DELAY_MS: &str = "MOCKDOCK_PROGRESS_DELAY_MS";
pub const ENV_NAMESPACE: &str = "MOCKDOCK_NAMESPACE";

pub const DEFAULT_ROOT: &str = "./mock-docker";
pub const DEFAULT_PROGRESS_DELAY_MS: u64 = 100;
pub const DEFAULT_NAMESPACE: &str = "docker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory holding `images.json`, `containers.json` and `config/`.
    pub storage_root: PathBuf,
    /// Pause between simulated progress lines. Zero disables it.
    pub progress_delay: Duration,
    pub namespace: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from(DEFAULT_ROOT),
            progress_delay: Duration::from_millis(DEFAULT_PROGRESS_DELAY_MS),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration through `lookup`, falling back to defaults
    /// for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_root = lookup(ENV_ROOT)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_root);

        let progress_delay = match lookup(ENV_PROGRESS_DELAY_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_PROGRESS_DELAY_MS);
                    defaults.progress_delay
                }
            },
            None => defaults.progress_delay,
        };

        let namespace = lookup(ENV_NAMESPACE)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.namespace);

        Self {
            storage_root,
            progress_delay,
            namespace,
        }
    }

    pub fn with_storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_root = root.into();
        self
    }
}
