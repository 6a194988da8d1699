// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario files: scripted events released at fixed offsets
//!
//! ```toml
//! [[event]]
//! kind = "button:pressed"
//! at = "0ms"
//! payload = "down"
//!
//! [[event]]
//! kind = "timer:expired"
//! at = "25ms"
//! ```

use crate::demo::DemoEvent;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tickbus::EventKind;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedEvent {
    pub kind: String,
    /// Offset from the start of the replay
    #[serde(default, with = "humantime_serde")]
    pub at: Duration,
    pub payload: Option<String>,
}

/// A scripted event with its kind resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub kind: DemoEvent,
    pub at: Duration,
    pub payload: Option<String>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve kind names and order events by release offset
    ///
    /// Events sharing an offset keep their file order.
    pub fn releases(&self) -> Result<Vec<Release>> {
        let mut releases = Vec::with_capacity(self.events.len());
        for event in &self.events {
            let Some(kind) = DemoEvent::from_name(&event.kind) else {
                let known: Vec<_> = DemoEvent::ALL.iter().map(|k| k.name()).collect();
                bail!(
                    "unknown event kind '{}' (known: {})",
                    event.kind,
                    known.join(", ")
                );
            };
            releases.push(Release {
                kind,
                at: event.at,
                payload: event.payload.clone(),
            });
        }
        releases.sort_by_key(|r| r.at);
        Ok(releases)
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
