use std::env;
use std::path::PathBuf;

use crate::artifacts::ArtifactStore;

pub const DEFAULT_DATASET_PATH: &str = "data/dataset.csv";
pub const DEFAULT_MODELS_DIR: &str = "models";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

pub const DATASET_ENV: &str = "SENTIMIENTO_DATASET";
pub const MODELS_DIR_ENV: &str = "SENTIMIENTO_MODELS_DIR";
pub const BIND_ENV: &str = "SENTIMIENTO_BIND";

/// Process-wide settings shared by the CLI subcommands.
///
/// Resolution order is command-line flag, then environment variable, then the
/// built-in default.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub models_dir: PathBuf,
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by any `SENTIMIENTO_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            dataset_path: env::var(DATASET_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            models_dir: env::var(MODELS_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.models_dir),
            bind_address: env::var(BIND_ENV).unwrap_or(defaults.bind_address),
        }
    }

    pub fn with_dataset_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.dataset_path = path;
        }
        self
    }

    pub fn with_models_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.models_dir = dir;
        }
        self
    }

    pub fn with_bind_address(mut self, address: Option<String>) -> Self {
        if let Some(address) = address {
            self.bind_address = address;
        }
        self
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.models_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_and_overrides() {
        env::set_var(MODELS_DIR_ENV, "/tmp/test-sentimiento/models");
        env::set_var(BIND_ENV, "0.0.0.0:9000");
        let config = AppConfig::from_env();
        assert_eq!(config.models_dir, PathBuf::from("/tmp/test-sentimiento/models"));
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET_PATH));
        env::remove_var(MODELS_DIR_ENV);
        env::remove_var(BIND_ENV);

        let config = AppConfig::from_env()
            .with_models_dir(Some(PathBuf::from("elsewhere")))
            .with_bind_address(None);
        assert_eq!(config.models_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert!(config.artifact_store().model_path().starts_with("elsewhere"));
    }
}
