//! HTTP GET of image candidates.
//!
//! Uses the curl crate (libcurl) to fetch the full body and the final
//! `Content-Type`. The [`Transport`] trait is the seam the pipeline talks to,
//! so tests can substitute a stub.

mod error;
mod parse;

pub use error::FetchError;

use std::time::Duration;

/// Media type prefix every accepted response must carry.
pub const IMAGE_CONTENT_TYPE_PREFIX: &str = "image/";

/// Maximum redirects followed per request.
const MAX_REDIRECTS: u32 = 10;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status of the final response.
    pub status: u32,
    /// `Content-Type` of the final response, empty if absent.
    pub content_type: String,
    /// Full response body.
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`FetchError::Http`].
    pub fn error_for_status(self, url: &str) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Http {
                url: url.to_string(),
                code: self.status,
            })
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_content_type(&self.content_type)
    }
}

/// True iff the content type starts with the literal `image/` prefix.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with(IMAGE_CONTENT_TYPE_PREFIX)
}

/// Something that can perform a blocking GET.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError>;
}

/// libcurl-backed transport. One Easy handle per request, no retries.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    user_agent: Option<String>,
}

impl CurlTransport {
    pub fn new(user_agent: Option<String>) -> Self {
        Self { user_agent }
    }
}

impl Transport for CurlTransport {
    /// Follows redirects. `timeout` bounds both connecting and the whole transfer.
    /// Runs in the current thread; call from `spawn_blocking` if used from async code.
    fn get(&self, url: &str, timeout: Duration) -> Result<FetchResponse, FetchError> {
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(timeout)?;
        easy.timeout(timeout)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                headers.push(parse::header_line(data));
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let content_type = parse::content_type(&headers).unwrap_or_default();
        tracing::debug!(url, status, %content_type, bytes = body.len(), "GET finished");

        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}
