//! File-backed slot store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::KeyValueStore;
use crate::error::StorageError;

/// A [`KeyValueStore`] keeping each slot in its own file.
///
/// Slot `planto:cart:v1` lives at `<dir>/planto_cart_v1.json`. Writes go to a
/// sibling temp file that is renamed over the target, so a crash mid-write
/// leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the data directory. It is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `slot`.
    #[must_use]
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(slot)))
    }
}

/// Map a slot name onto a portable file stem.
fn file_stem(slot: &str) -> String {
    slot.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn io_error(slot: &str) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        slot: slot.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(slot)(e)),
        }
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(io_error(slot))?;

        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(io_error(slot))?;
            file.write_all(value.as_bytes()).map_err(io_error(slot))?;
            file.sync_all().map_err(io_error(slot))?;
        }
        fs::rename(&tmp, &path).map_err(io_error(slot))?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote slot");
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<bool, StorageError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(slot)(e)),
        }
    }
}
