// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Backend connection configuration
//!
//! Loaded from a TOML file, then overridden by environment variables so
//! scripts and CI can point a run at another backend without touching the
//! file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default API base URL for a local backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Connection settings for the project backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend API
    pub base_url: String,
    /// Bearer token attached to every request, when set
    pub token: Option<String>,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BackendConfig {
    /// Load from a TOML file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        Ok(config.with_env_overrides())
    }

    /// Load from the given file if it exists, defaults otherwise, with
    /// environment overrides applied either way
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default().with_env_overrides()),
        }
    }

    /// Apply `MLC_API_URL`, `MLC_API_TOKEN` and `MLC_TIMEOUT_MS`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("MLC_API_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(token) = std::env::var("MLC_API_TOKEN") {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }
        if let Some(timeout) = parse_duration_ms("MLC_TIMEOUT_MS") {
            self.timeout = timeout;
        }
        self
    }
}

/// Read an env var holding a duration in milliseconds
fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
