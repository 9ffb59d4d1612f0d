//! Transport failure type.

use thiserror::Error;

/// A URL could not be fetched: network-level failure or non-2xx status.
///
/// The pipeline recovers from this per URL and moves on to the next one.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connection refused, timeout, TLS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The server answered with a non-2xx status.
    #[error("HTTP {code} for url: {url}")]
    Http { url: String, code: u32 },
}
