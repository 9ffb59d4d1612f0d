//! Image storage directory.
//!
//! Images are written to a `.part` temp file and renamed into place, so an
//! interrupted write never leaves a truncated file under the final name.

mod dedup;

pub use dedup::{is_duplicate, ContentIndex};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `cat.png` → `cat.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// The directory fetched images accumulate in, across runs.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Opens the store, creating the directory (and parents) if missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("create storage directory {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Writes `bytes` under `filename`, replacing any existing file. Returns the final path.
    pub fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let final_path = self.target_path(filename);
        let temp = temp_path(&final_path);
        if let Err(e) = fs::write(&temp, bytes) {
            let _ = fs::remove_file(&temp);
            return Err(e).with_context(|| format!("write {}", temp.display()));
        }
        if let Err(e) = fs::rename(&temp, &final_path) {
            let _ = fs::remove_file(&temp);
            return Err(e).with_context(|| {
                format!("rename {} -> {}", temp.display(), final_path.display())
            });
        }
        Ok(final_path)
    }

    /// Regular files currently stored, sorted by name. Leftover `.part` files are skipped.
    pub fn stored_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("list {}", self.root.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("list {}", self.root.display()))?;
            let path = entry.path();
            match entry.file_type() {
                Ok(kind) if kind.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "skipping unreadable entry: {}", e);
                    continue;
                }
            }
            if path.to_string_lossy().ends_with(TEMP_SUFFIX) {
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }
}
