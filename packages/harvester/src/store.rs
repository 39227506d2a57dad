//! On-disk partition and dataset files.
//!
//! Layout below the output directory:
//!
//! - `{source}/{token}.json`: one partition checkpoint
//! - `{source}.json`: the merged dataset for a source

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{HarvesterError, Result};
use crate::types::Dataset;

/// Reads and writes harvester JSON files below one output directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    pretty: bool,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: false,
        }
    }

    /// Write 4-space indented JSON instead of compact JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self, source: &str) -> PathBuf {
        self.root.join(source)
    }

    pub fn partition_path(&self, source: &str, token: &str) -> PathBuf {
        self.source_dir(source).join(format!("{token}.json"))
    }

    pub fn dataset_path(&self, source: &str) -> PathBuf {
        self.root.join(format!("{source}.json"))
    }

    /// Create the partition directory for a source if it does not exist yet.
    pub fn ensure_source_dir(&self, source: &str) -> Result<PathBuf> {
        let dir = self.source_dir(source);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Serialize a dataset to `path`.
    ///
    /// The bytes go to a temporary file in the same directory, which is then
    /// renamed over `path`. An interrupted write never leaves a partial file
    /// at `path`.
    pub fn write(&self, path: &Path, dataset: &Dataset) -> Result<()> {
        let bytes = if self.pretty {
            to_pretty_json(dataset)?
        } else {
            serde_json::to_vec(dataset)?
        };

        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Read a dataset from `path`; `None` when the file does not exist.
    pub fn read(&self, path: &Path) -> Result<Option<Dataset>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| HarvesterError::Dataset {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Delete a file; a file that is already gone is not an error.
    pub fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn to_pretty_json(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    dataset.serialize(&mut serializer)?;
    Ok(buf)
}
