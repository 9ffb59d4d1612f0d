//! Per-URL results and the run summary.

use std::fmt;
use std::path::PathBuf;

/// Terminal state of one URL.
///
/// `Display` renders the console status line(s) for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Written to `path`.
    Saved {
        url: String,
        filename: String,
        path: PathBuf,
    },
    /// Response `Content-Type` did not start with `image/`. Nothing written.
    NotAnImage { url: String, content_type: String },
    /// Same content is already stored as `existing`. Nothing written.
    Duplicate {
        url: String,
        filename: String,
        existing: String,
    },
    /// Network failure or non-2xx status.
    TransportError { url: String, message: String },
    /// Anything else (storage I/O, permissions).
    Failed { url: String, message: String },
}

impl Outcome {
    pub fn url(&self) -> &str {
        match self {
            Outcome::Saved { url, .. }
            | Outcome::NotAnImage { url, .. }
            | Outcome::Duplicate { url, .. }
            | Outcome::TransportError { url, .. }
            | Outcome::Failed { url, .. } => url,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved { .. })
    }

    /// True for the two error categories (skips are not errors).
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::TransportError { .. } | Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Saved { filename, path, .. } => {
                writeln!(f, "✓ Successfully fetched: {}", filename)?;
                write!(f, "✓ Image saved to {}", path.display())
            }
            Outcome::NotAnImage { url, content_type } => write!(
                f,
                "✗ Skipping {} (Not an image, Content-Type: {})",
                url, content_type
            ),
            Outcome::Duplicate {
                filename, existing, ..
            } => {
                if filename == existing {
                    write!(f, "✗ Skipping {} (Duplicate already exists)", filename)
                } else {
                    write!(f, "✗ Skipping {} (Duplicate of {})", filename, existing)
                }
            }
            Outcome::TransportError { url, message } => {
                write!(f, "✗ Connection error for {}: {}", url, message)
            }
            Outcome::Failed { url, message } => {
                write!(f, "✗ An error occurred for {}: {}", url, message)
            }
        }
    }
}

/// Outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub not_image: usize,
    pub duplicates: usize,
    pub transport_errors: usize,
    pub failures: usize,
}

impl RunSummary {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Saved { .. } => self.saved += 1,
            Outcome::NotAnImage { .. } => self.not_image += 1,
            Outcome::Duplicate { .. } => self.duplicates += 1,
            Outcome::TransportError { .. } => self.transport_errors += 1,
            Outcome::Failed { .. } => self.failures += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.saved + self.not_image + self.duplicates + self.transport_errors + self.failures
    }

    pub fn errors(&self) -> usize {
        self.transport_errors + self.failures
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} URL(s): {} saved, {} duplicate, {} not an image, {} error(s)",
            self.total(),
            self.saved,
            self.duplicates,
            self.not_image,
            self.errors()
        )
    }
}
