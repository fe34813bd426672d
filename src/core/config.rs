//! Converter configuration, read from a RON file.
//!
//! ```ron
//! (
//!     output_dir: "narrative_outputs",
//!     overwrite: true,
//!     scorecard: true,
//!     ball_by_ball_table: false,
//!     wrap_width: 98,
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::formatter::FormatOptions;

/// File the CLI looks for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "cricsheet-narrate.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub output_dir: PathBuf,
    /// Replace files that already exist instead of failing.
    pub overwrite: bool,
    pub scorecard: bool,
    pub ball_by_ball_table: bool,
    /// Width the header's squad lists wrap at.
    pub wrap_width: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        let format = FormatOptions::default();
        Self {
            output_dir: PathBuf::from("narrative_outputs"),
            overwrite: true,
            scorecard: format.scorecard,
            ball_by_ball_table: format.ball_by_ball_table,
            wrap_width: format.wrap_width,
        }
    }
}

impl ConverterConfig {
    pub fn load_from_ron(path: &Path) -> Result<ConverterConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<ConverterConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            scorecard: self.scorecard,
            ball_by_ball_table: self.ball_by_ball_table,
            wrap_width: self.wrap_width,
        }
    }
}
