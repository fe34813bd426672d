//! The conversion pipeline: load → assemble → write.
//!
//! Wires the record loader, match assembler and output writer together and
//! runs them over a single file or a whole folder.

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::assembler::{assemble, MatchNarrative};
use crate::core::config::{ConfigError, ConverterConfig};
use crate::core::formatter::FormatOptions;
use crate::core::table::{AsciiGridRenderer, TableRenderer};
use crate::core::writer::{OutputWriter, WriteError};
use crate::schema::record::{MatchRecord, ParseError};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("write error: {0}")]
    Write(#[from] WriteError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("invalid folder pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Outcome of converting a folder.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, in input order.
    pub converted: Vec<PathBuf>,
    /// Inputs that were skipped and why.
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts Cricsheet files into narrative text. Built via `Converter::builder()`.
pub struct Converter {
    options: FormatOptions,
    renderer: Box<dyn TableRenderer>,
    writer: OutputWriter,
}

/// Builder for constructing a `Converter`.
pub struct ConverterBuilder {
    config: Option<ConverterConfig>,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    overwrite: Option<bool>,
    renderer: Option<Box<dyn TableRenderer>>,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder {
            config: None,
            config_path: None,
            output_dir: None,
            overwrite: None,
            renderer: None,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.writer.dir()
    }

    /// Narrate a loaded match without touching the filesystem.
    pub fn render(&self, record: &MatchRecord) -> MatchNarrative {
        assemble(record, &self.options, self.renderer.as_ref())
    }

    /// Convert one match file and return the path written.
    pub fn convert_file(&self, path: &Path) -> Result<PathBuf, ConvertError> {
        self.convert_unique(path, &mut FxHashSet::default())
    }

    /// Convert `path`, tagging the output name with the input file stem when
    /// an earlier file in the same batch already claimed the plain name.
    fn convert_unique(
        &self,
        path: &Path,
        claimed: &mut FxHashSet<String>,
    ) -> Result<PathBuf, ConvertError> {
        debug!(path = %path.display(), "loading match");
        let record = MatchRecord::load_from_json(path).map_err(|source| ConvertError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let narrative = self.render(&record);
        for gap in &narrative.gaps {
            warn!(path = %path.display(), "{gap}");
        }

        let mut name = OutputWriter::file_name(&record);
        if claimed.contains(&name) {
            let tag = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| claimed.len().to_string());
            let tagged = OutputWriter::tagged_file_name(&record, &tag);
            warn!(input = %path.display(), "{name} already written in this batch, using {tagged}");
            name = tagged;
        }

        let written = self.writer.write(&name, &narrative.lines)?;
        claimed.insert(name);
        info!(input = %path.display(), output = %written.display(), "narrative written");
        Ok(written)
    }

    /// Convert every `*.json` file in `dir`. A failing file is logged and
    /// recorded in the report; the rest of the batch still runs.
    pub fn convert_folder(&self, dir: &Path) -> Result<BatchReport, ConvertError> {
        if !dir.is_dir() {
            return Err(ConvertError::NotADirectory(dir.to_path_buf()));
        }

        let pattern = glob::Pattern::escape(&dir.to_string_lossy());
        let pattern = format!("{pattern}/*.json");
        let mut inputs: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        inputs.sort();
        info!(folder = %dir.display(), files = inputs.len(), "converting folder");

        let mut report = BatchReport::default();
        let mut claimed = FxHashSet::default();
        for input in inputs {
            match self.convert_unique(&input, &mut claimed) {
                Ok(written) => report.converted.push(written),
                Err(e) => {
                    warn!(path = %input.display(), "skipped: {e}");
                    report.failed.push((input, e));
                }
            }
        }
        Ok(report)
    }
}

impl ConverterBuilder {
    /// Use an already loaded configuration.
    pub fn config(mut self, config: ConverterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from a RON file at build time.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    /// Provide a table renderer (defaults to the ASCII grid).
    pub fn with_renderer(mut self, renderer: Box<dyn TableRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn build(self) -> Result<Converter, ConvertError> {
        let mut config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => ConverterConfig::load_from_ron(&path)?,
            (None, None) => ConverterConfig::default(),
        };
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(overwrite) = self.overwrite {
            config.overwrite = overwrite;
        }

        Ok(Converter {
            options: config.format_options(),
            renderer: self
                .renderer
                .unwrap_or_else(|| Box::new(AsciiGridRenderer) as Box<dyn TableRenderer>),
            writer: OutputWriter::new(config.output_dir, config.overwrite),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let converter = Converter::builder().build().unwrap();
        assert_eq!(converter.output_dir(), Path::new("narrative_outputs"));
        assert_eq!(converter.options, FormatOptions::default());
    }

    #[test]
    fn builder_overrides_config() {
        let config = ConverterConfig {
            output_dir: PathBuf::from("from_config"),
            scorecard: false,
            ..ConverterConfig::default()
        };
        let converter = Converter::builder()
            .config(config)
            .output_dir("override")
            .build()
            .unwrap();
        assert_eq!(converter.output_dir(), Path::new("override"));
        assert!(!converter.options.scorecard);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = Converter::builder()
            .config_file("does/not/exist.ron")
            .build();
        assert!(matches!(result, Err(ConvertError::Config(_))));
    }

    #[test]
    fn folder_must_exist() {
        let converter = Converter::builder().build().unwrap();
        let err = converter
            .convert_folder(Path::new("no/such/folder"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotADirectory(_)));
    }
}
