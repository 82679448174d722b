//! Configuration file support for rmselect.
//!
//! Configuration is loaded from `~/.config/rmselect/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/rmselect/config.toml
//! base_url = "https://stats.example.com/api"
//! filter = "cities"
//! value = [1, 3]
//! debounce_ms = 250
//! hide_ids = false
//! change_on_select = false
//!
//! [params]
//! country = ["1", "2"]
//! active = "1"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::controller::Props;
use crate::debounce::DEFAULT_WINDOW;
use crate::error::{Result, SelectError};
use crate::model::Identifier;
use crate::query::Params;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Base URL the resource paths are joined onto
    pub base_url: Option<String>,

    /// Direct resource path
    pub target: Option<String>,

    /// Named filter resource (wins over `target`)
    pub filter: Option<String>,

    /// Extra query parameters
    pub params: Option<Params>,

    /// Initially selected identifiers
    pub value: Option<Vec<Identifier>>,

    /// Search debounce window in milliseconds
    pub debounce_ms: Option<u64>,

    pub hide_ids: bool,

    pub change_on_select: bool,

    pub disabled: bool,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match Self::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rmselect")
            .join("config.toml")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        target: Option<String>,
        filter: Option<String>,
    ) -> Self {
        if base_url.is_some() {
            self.base_url = base_url;
        }
        if target.is_some() {
            self.target = target;
        }
        if filter.is_some() {
            self.filter = filter;
        }
        self
    }

    /// Get the base URL, falling back to environment variable or default.
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .or_else(|| std::env::var("RMSELECT_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WINDOW)
    }

    /// Props for the mounted control.
    pub fn props(&self) -> Props {
        Props {
            value: self.value.clone(),
            target: self.target.clone(),
            filter: self.filter.clone(),
            params: self.params.clone(),
            disabled: self.disabled,
            hide_ids: self.hide_ids,
            change_on_select: self.change_on_select,
        }
    }
}
