//! Atomic file writes using the write-temp-rename pattern.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Atomic file writer that uses write-temp-rename pattern
pub struct AtomicFileWriter {
    target_path: PathBuf,
    temp_path: PathBuf,
}

impl AtomicFileWriter {
    /// Create a new atomic file writer for the target path
    pub fn new(target_path: &Path) -> Result<Self> {
        let temp_path = Self::generate_temp_path(target_path)?;

        Ok(AtomicFileWriter {
            target_path: target_path.to_path_buf(),
            temp_path,
        })
    }

    /// Write content to the file atomically
    pub fn write_content(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.target_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&self.temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", self.temp_path.display()))?;

        fs::rename(&self.temp_path, &self.target_path).with_context(|| {
            format!("Failed to commit atomic write: {}", self.target_path.display())
        })
    }

    /// Write JSON data to the file atomically
    pub fn write_json<T: serde::Serialize>(&self, data: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(data)?;
        self.write_content(&content)
    }

    fn generate_temp_path(target: &Path) -> Result<PathBuf> {
        let parent = target
            .parent()
            .context("Target path has no parent directory")?;
        let filename = target
            .file_name()
            .context("Target path has no filename")?;

        let temp_name = format!("{}.tmp.{}", filename.to_string_lossy(), Uuid::new_v4());
        Ok(parent.join(temp_name))
    }
}

impl Drop for AtomicFileWriter {
    fn drop(&mut self) {
        // Leftover temp file means the rename never happened.
        if self.temp_path.exists() {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}
