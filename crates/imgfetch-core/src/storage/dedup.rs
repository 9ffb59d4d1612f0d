//! Duplicate detection by content digest.

use anyhow::Result;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::ImageStore;
use crate::checksum;

/// Compares `candidate` with whatever file occupies `path`.
///
/// No file → not a duplicate. Otherwise duplicate iff the SHA-256 digests match.
pub fn is_duplicate(path: &Path, candidate: &[u8]) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let existing = checksum::sha256_path(path)?;
    Ok(existing == checksum::sha256_bytes(candidate))
}

/// Digest → stored filenames for every image in the store.
///
/// Built once from the directory and kept current as images are saved, so
/// identical content is recognized even under a different name.
#[derive(Debug, Default)]
pub struct ContentIndex {
    by_digest: HashMap<String, BTreeSet<String>>,
    by_name: HashMap<String, String>,
}

impl ContentIndex {
    /// Hashes every stored file.
    pub fn build(store: &ImageStore) -> Result<Self> {
        let index = Self::from_files(store.stored_files()?);
        tracing::debug!(
            root = %store.root().display(),
            entries = index.len(),
            "content index built"
        );
        Ok(index)
    }

    /// Indexes `paths`. A file that cannot be read is logged and left out.
    pub(crate) fn from_files(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut index = Self::default();
        for path in paths {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            match checksum::sha256_path(&path) {
                Ok(digest) => index.record(digest, name),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "not indexed: {:#}", e);
                }
            }
        }
        index
    }

    /// A stored image with this digest, if any. When several files hold the
    /// same content, the first name in sorted order is returned.
    pub fn lookup(&self, digest: &str) -> Option<&str> {
        self.by_digest
            .get(digest)
            .and_then(|names| names.iter().next())
            .map(String::as_str)
    }

    /// Records that `filename` now holds content with `digest`. The file's
    /// previous digest only loses this one name.
    pub fn record(&mut self, digest: String, filename: String) {
        if let Some(previous) = self.by_name.insert(filename.clone(), digest.clone()) {
            if let Some(names) = self.by_digest.get_mut(&previous) {
                names.remove(&filename);
                if names.is_empty() {
                    self.by_digest.remove(&previous);
                }
            }
        }
        self.by_digest.entry(digest).or_default().insert(filename);
    }

    /// Number of distinct digests.
    pub fn len(&self) -> usize {
        self.by_digest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_digest.is_empty()
    }
}
