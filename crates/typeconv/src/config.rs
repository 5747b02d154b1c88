// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry configuration.
//!
//! Supports both programmatic and file-based configuration.
//!
//! ```toml
//! name = "wire-adapters"
//! warn_on_ambiguity = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a [`RegistryConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read registry config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed registry config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("registry config rejected: {0}")]
    Invalid(String),
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry name (tags log lines).
    #[serde(default = "default_registry_name")]
    pub name: String,

    /// Log a warning when several candidates tie for the best score.
    #[serde(default = "default_true")]
    pub warn_on_ambiguity: bool,
}

fn default_registry_name() -> String {
    "typeconv".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: default_registry_name(),
            warn_on_ambiguity: true,
        }
    }
}

impl RegistryConfig {
    /// Create a config with the given name and default settings.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("`name` must not be blank".into()));
        }
        Ok(())
    }

    /// Set ambiguity warnings.
    pub fn warn_on_ambiguity(mut self, enabled: bool) -> Self {
        self.warn_on_ambiguity = enabled;
        self
    }
}
