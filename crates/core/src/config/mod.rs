// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus and host loop configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! configuration:
//!
//! ```toml
//! [bus]
//! capacity = 50
//!
//! [host]
//! poll_interval = "1ms"
//! max_iterations = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default maximum number of pending events
pub const DEFAULT_CAPACITY: usize = 50;

/// Largest accepted `bus.capacity`; the queue is preallocated in full
pub const MAX_CAPACITY: usize = 1 << 20;

/// Default pause between dispatcher passes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Event bus sizing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    /// Maximum number of pending events; size it for the worst-case burst
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Host loop pacing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Pause between dispatcher passes; zero spins without sleeping
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Stop after this many passes; run until stopped when absent
    pub max_iterations: Option<u64>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_iterations: None,
        }
    }
}

impl HostConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
}

/// Complete configuration file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bus: BusConfig,
    pub host: HostConfig,
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.capacity == 0 {
            return Err(ConfigError::Invalid(
                "bus.capacity must be at least 1".to_string(),
            ));
        }
        if self.bus.capacity > MAX_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "bus.capacity must be at most {}, got {}",
                MAX_CAPACITY, self.bus.capacity
            )));
        }
        if self.host.max_iterations == Some(0) {
            return Err(ConfigError::Invalid(
                "host.max_iterations must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
