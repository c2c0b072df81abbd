// Copyright 2025 the Pensketch Authors
// SPDX-License-Identifier: Apache-2.0

//! Startup configuration read from `pensketch.toml`.
//!
//! Every field is optional; missing values fall back to the constants in
//! `settings`.
//!
//! ```toml
//! [export]
//! width = 640
//! height = 480
//!
//! [view]
//! zoom_step = 1.5
//! ```

use crate::port::ExportSettings;
use crate::settings;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default file name looked up in the working directory
pub const CONFIG_FILE: &str = "pensketch.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportSettings,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Zoom factor of one scroll step on a view handle
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_step: settings::view::ZOOM_STEP,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(text).context("Invalid configuration")?;
        if config.view.zoom_step <= 1.0 {
            anyhow::bail!("view.zoom_step must be greater than 1, got {}", config.view.zoom_step);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to load config {}", path.display()))
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
