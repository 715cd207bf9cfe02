use super::error::CatalogError;
use serde::{de::DeserializeOwned, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A JSON array persisted as one file and always replaced whole.
#[derive(Debug, Clone)]
pub(crate) struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist. A zero-length file reads as
    /// an empty snapshot.
    pub(crate) fn read<T: DeserializeOwned>(&self) -> Result<Option<Vec<T>>, CatalogError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CatalogError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Vec::new()));
        }

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|source| CatalogError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Writes `records` as pretty JSON to a temp file beside the target and
    /// renames it into place, so readers see either the old or the new file.
    pub(crate) fn write<T: Serialize>(&self, records: &[T]) -> Result<(), CatalogError> {
        let data = serde_json::to_vec_pretty(records)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let write_err = |source| CatalogError::Write {
            path: self.path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&data).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.path.display(), records = records.len(), "Snapshot written");
        Ok(())
    }
}
