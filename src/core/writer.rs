//! Output writer: one text file per match, named from the date and teams.
//!
//! Overwrite policy: with `overwrite` set (the default) an existing file is
//! replaced; otherwise the write fails with [`WriteError::AlreadyExists`].

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::record::MatchRecord;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} already exists and overwrite is disabled")]
    AlreadyExists(PathBuf),
}

#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
    overwrite: bool,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<first date>_<TeamA>_vs_<TeamB>.txt`.
    pub fn file_name(record: &MatchRecord) -> String {
        format!("{}.txt", match_stem(record))
    }

    /// `<first date>_<TeamA>_vs_<TeamB>_<tag>.txt`, for telling apart two
    /// matches that share a date and teams.
    pub fn tagged_file_name(record: &MatchRecord, tag: &str) -> String {
        format!("{}_{}.txt", match_stem(record), sanitize(tag))
    }

    /// Write `lines` to `file_name` inside the output directory.
    pub fn write(&self, file_name: &str, lines: &[String]) -> Result<PathBuf, WriteError> {
        let path = self.dir.join(file_name);
        std::fs::create_dir_all(&self.dir).map_err(|source| WriteError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&path).map_err(|source| {
            if source.kind() == ErrorKind::AlreadyExists {
                WriteError::AlreadyExists(path.clone())
            } else {
                WriteError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let mut text = lines.join("\n");
        text.push('\n');
        file.write_all(text.as_bytes())
            .map_err(|source| WriteError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

fn match_stem(record: &MatchRecord) -> String {
    let date = record
        .info
        .dates
        .first()
        .map(String::as_str)
        .unwrap_or("undated");
    format!(
        "{}_{}_vs_{}",
        sanitize(date),
        sanitize(record.home_team()),
        sanitize(record.away_team())
    )
}

fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' | ':' => '-',
            other => other,
        })
        .collect()
}
