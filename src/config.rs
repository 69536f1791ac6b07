// SPDX-License-Identifier: GPL-3.0-only

//! On-disk configuration
//!
//! Optional JSON file supplying default decode options for the CLI;
//! command-line flags override every field.

use crate::decode::{BarcodeFormat, Options};
use crate::errors::{ScanError, ScanResult};
use crate::frame::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Symbologies to look for (empty = all enabled)
    pub formats: BTreeSet<BarcodeFormat>,
    /// Spend more time per frame for damaged or low-contrast symbols
    pub try_harder: bool,
    /// Also try rotated orientations of the symbol
    pub try_rotate: bool,
    /// Working-buffer format for the transform stages
    pub output_format: OutputFormat,
    /// Enable the inversion stage (light-on-dark symbols)
    pub invert: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            formats: BTreeSet::new(), // all formats enabled
            try_harder: false,
            try_rotate: false,
            output_format: OutputFormat::SingleChannel,
            invert: false,
        }
    }
}

impl ScanConfig {
    /// Default config file location (`~/.config/scanprep/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scanprep").join("config.json"))
    }

    /// Load the config from a JSON file
    pub fn load(path: &Path) -> ScanResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|err| ScanError::Config(err.to_string()))
    }

    /// Load the config from the default location, falling back to
    /// defaults when the file does not exist
    pub fn load_default() -> ScanResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Write the config as JSON
    pub fn save(&self, path: &Path) -> ScanResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            serde_json::to_string_pretty(self).map_err(|err| ScanError::Config(err.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The decode options this config selects
    pub fn options(&self) -> Options {
        Options {
            formats: self.formats.clone(),
            try_harder: self.try_harder,
            try_rotate: self.try_rotate,
        }
    }
}
