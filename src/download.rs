//! Download trigger: persists an encoded payload to the local filesystem.
//!
//! Writes go through a transient sibling temp file that is renamed into
//! place on success and removed on failure, so a failed export leaves no
//! partial file and no residue behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{self, Blob};
use crate::error::Result;

/// Saves blobs beneath a fixed output directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    dir: PathBuf,
}

impl Downloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decode a data-URL and save it under `file_name`.
    pub fn save_data_url(&self, file_name: &str, data_url: &str) -> Result<PathBuf> {
        let blob = codec::to_blob(data_url)?;
        self.save_blob(&blob, file_name)
    }

    /// Save a blob under `file_name`, atomically with respect to failure.
    pub fn save_blob(&self, blob: &Blob, file_name: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        let transient = self.dir.join(format!(".{file_name}.part"));

        if let Err(e) = fs::write(&transient, &blob.data) {
            let _ = fs::remove_file(&transient);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&transient, &path) {
            let _ = fs::remove_file(&transient);
            return Err(e.into());
        }
        Ok(path)
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new(".")
    }
}
