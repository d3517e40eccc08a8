// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::poll::{DEFAULT_INTERVAL_MS, INTERVAL_ENV};
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Builder configuration shared by every builder created from one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Delay between two reads while waiting on a resource
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            poll_interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let poll_interval = match lookup(INTERVAL_ENV) {
            Some(raw) => {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a number of milliseconds, got '{}'", INTERVAL_ENV, raw))?;
                anyhow::ensure!(millis > 0, "{} must be greater than zero", INTERVAL_ENV);
                Duration::from_millis(millis)
            }
            None => Duration::from_millis(DEFAULT_INTERVAL_MS),
        };

        Ok(Config { poll_interval })
    }
}
