//! Fetch → validate → name → dedup → save, one URL at a time.
//!
//! Every URL ends in exactly one [`Outcome`]. Failures are caught at the
//! per-URL boundary; the only fatal error is failing to prepare the storage
//! directory in [`ImagePipeline::open`], before any URL is touched.

mod locks;
mod outcome;
mod parallel;

pub use outcome::{Outcome, RunSummary};
pub use parallel::run_parallel;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::checksum;
use crate::config::{DedupPolicy, FetcherConfig};
use crate::fetch::Transport;
use crate::storage::{self, ContentIndex, ImageStore};
use crate::url_model::{self, FallbackName};

use locks::PathLocks;

/// Per-run settings, usually derived from [`FetcherConfig`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub storage_dir: PathBuf,
    pub timeout: Duration,
    pub fallback: FallbackName,
    pub dedup: DedupPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&FetcherConfig::default())
    }
}

impl PipelineOptions {
    pub fn from_config(cfg: &FetcherConfig) -> Self {
        Self {
            storage_dir: cfg.storage_dir.clone(),
            timeout: cfg.timeout(),
            fallback: FallbackName::new(&cfg.fallback_prefix, &cfg.fallback_extension),
            dedup: cfg.dedup,
        }
    }
}

pub struct ImagePipeline<T> {
    transport: T,
    store: ImageStore,
    options: PipelineOptions,
    slots: PathLocks,
    /// Present only under [`DedupPolicy::Content`].
    index: Option<Mutex<ContentIndex>>,
}

impl<T: Transport> ImagePipeline<T> {
    /// Prepares the storage directory (and the content index, if that policy is on).
    pub fn open(transport: T, options: PipelineOptions) -> Result<Self> {
        let store = ImageStore::open(&options.storage_dir)?;
        let index = match options.dedup {
            DedupPolicy::Filename => None,
            DedupPolicy::Content => Some(Mutex::new(ContentIndex::build(&store)?)),
        };
        tracing::debug!(
            root = %store.root().display(),
            dedup = ?options.dedup,
            timeout_secs = options.timeout.as_secs(),
            "pipeline ready"
        );
        Ok(Self {
            transport,
            store,
            options,
            slots: PathLocks::default(),
            index,
        })
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Processes `urls` in input order, calling `on_outcome` as each finishes.
    pub fn run<F>(&self, urls: &[String], mut on_outcome: F) -> Vec<Outcome>
    where
        F: FnMut(&Outcome),
    {
        urls.iter()
            .map(|url| {
                let outcome = self.process(url);
                on_outcome(&outcome);
                outcome
            })
            .collect()
    }

    /// Runs the whole decision procedure for one URL. Never fails.
    pub fn process(&self, url: &str) -> Outcome {
        let outcome = self.fetch_and_store(url);
        match &outcome {
            Outcome::Saved { path, .. } => {
                tracing::info!(url, path = %path.display(), "saved")
            }
            Outcome::NotAnImage { content_type, .. } => {
                tracing::info!(url, %content_type, "skipped: not an image")
            }
            Outcome::Duplicate { existing, .. } => {
                tracing::info!(url, %existing, "skipped: duplicate")
            }
            Outcome::TransportError { message, .. } => {
                tracing::warn!(url, %message, "fetch failed")
            }
            Outcome::Failed { message, .. } => tracing::warn!(url, %message, "failed"),
        }
        outcome
    }

    fn fetch_and_store(&self, url: &str) -> Outcome {
        let response = match self
            .transport
            .get(url, self.options.timeout)
            .and_then(|r| r.error_for_status(url))
        {
            Ok(r) => r,
            Err(e) => {
                return Outcome::TransportError {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        };

        if !response.is_image() {
            return Outcome::NotAnImage {
                url: url.to_string(),
                content_type: response.content_type,
            };
        }

        let filename = url_model::derive_filename(url, &self.options.fallback);
        match self.save(url, filename, &response.body) {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed {
                url: url.to_string(),
                message: format!("{:#}", e),
            },
        }
    }

    /// Duplicate check and write, serialized per target path.
    fn save(&self, url: &str, filename: String, body: &[u8]) -> Result<Outcome> {
        let target = self.store.target_path(&filename);
        let slot = self.slots.slot(&target);
        let _slot = slot.lock().unwrap_or_else(PoisonError::into_inner);

        match &self.index {
            None => self.save_by_filename(url, filename, &target, body),
            Some(index) => {
                let mut index = index.lock().unwrap_or_else(PoisonError::into_inner);
                self.save_by_content(&mut index, url, filename, &target, body)
            }
        }
    }

    fn save_by_filename(
        &self,
        url: &str,
        filename: String,
        target: &Path,
        body: &[u8],
    ) -> Result<Outcome> {
        if storage::is_duplicate(target, body)? {
            return Ok(Outcome::Duplicate {
                url: url.to_string(),
                existing: filename.clone(),
                filename,
            });
        }
        self.write(url, filename, target, body)
    }

    fn save_by_content(
        &self,
        index: &mut ContentIndex,
        url: &str,
        filename: String,
        target: &Path,
        body: &[u8],
    ) -> Result<Outcome> {
        let digest = checksum::sha256_bytes(body);
        if let Some(existing) = index.lookup(&digest) {
            return Ok(Outcome::Duplicate {
                url: url.to_string(),
                filename,
                existing: existing.to_string(),
            });
        }
        if storage::is_duplicate(target, body)? {
            index.record(digest, filename.clone());
            return Ok(Outcome::Duplicate {
                url: url.to_string(),
                existing: filename.clone(),
                filename,
            });
        }
        let outcome = self.write(url, filename.clone(), target, body)?;
        index.record(digest, filename);
        Ok(outcome)
    }

    fn write(&self, url: &str, filename: String, target: &Path, body: &[u8]) -> Result<Outcome> {
        if target.exists() {
            tracing::warn!(
                path = %target.display(),
                "replacing existing file with different content"
            );
        }
        let path = self.store.write(&filename, body)?;
        Ok(Outcome::Saved {
            url: url.to_string(),
            filename,
            path,
        })
    }
}
