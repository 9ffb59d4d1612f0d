//! Filename derivation for stored images.
//!
//! The name comes from the last segment of the URL path when that segment
//! looks like a file (has an extension); otherwise a timestamped fallback
//! name is generated.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_filename_for_linux;

use sanitize::is_reserved_name;

use chrono::{Local, NaiveDateTime};

/// Timestamp layout of fallback names, second resolution.
const FALLBACK_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Shape of the generated name: `<prefix>_<YYYYMMDD>_<HHMMSS>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackName {
    pub prefix: String,
    pub extension: String,
}

impl Default for FallbackName {
    fn default() -> Self {
        Self {
            prefix: "giltech".to_string(),
            extension: "jpg".to_string(),
        }
    }
}

impl FallbackName {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// Renders the fallback name for `now`. Two calls within the same second
    /// produce the same name.
    pub fn render(&self, now: NaiveDateTime) -> String {
        format!(
            "{}_{}.{}",
            self.prefix,
            now.format(FALLBACK_TIME_FORMAT),
            self.extension
        )
    }
}

/// Derives the storage filename for `url` using the current local time for
/// the fallback.
///
/// # Examples
///
/// - `https://example.com/a/b/cat.png` → `cat.png`
/// - `https://example.com/nofile` → `giltech_20240101_120000.jpg`
pub fn derive_filename(url: &str, fallback: &FallbackName) -> String {
    derive_filename_at(url, fallback, Local::now().naive_local())
}

/// Like [`derive_filename`] with an explicit clock reading.
pub fn derive_filename_at(url: &str, fallback: &FallbackName, now: NaiveDateTime) -> String {
    last_path_segment(url)
        .filter(|segment| segment.contains('.'))
        .map(|segment| sanitize_filename_for_linux(&segment))
        .filter(|name| !is_reserved_name(name))
        .unwrap_or_else(|| fallback.render(now))
}
