//! # atelier-config
//!
//! Layered configuration loading for Atelier using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ATELIER_*` prefix, `__` as separator)
//! 2. Project-level `.atelier/config.toml`
//! 3. User-level `~/.config/atelier/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ATELIER_GANTT__PADDING_DAYS` -> `gantt.padding_days`,
//! `ATELIER_STORE__DATA_DIR` -> `store.data_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use atelier_config::AtelierConfig;
//!
//! let config = AtelierConfig::load_with_dotenv().expect("config");
//! println!("axis padding: {} days", config.gantt.padding_days);
//! ```

mod error;
mod gantt;
mod store;

pub use error::ConfigError;
pub use gantt::GanttConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AtelierConfig {
    #[serde(default)]
    pub gantt: GanttConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AtelierConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.gantt.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".atelier/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ATELIER_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("atelier").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for a `.env`, then
    /// falls back to the current directory. Silently does nothing if none exists.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AtelierConfig::default();
        assert!(config.gantt.validate().is_ok());
        assert_eq!(config.store.data_dir, ".atelier/data");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = AtelierConfig::from_figment(&AtelierConfig::figment())
                .expect("should extract defaults");
            assert_eq!(config.gantt.padding_days, 2);
            assert_eq!(config.gantt.category_order.len(), 12);
            Ok(())
        });
    }
}
