//! Filename extraction from URL path.

/// Returns the part of the URL path after its last `/`.
///
/// Returns `None` if the URL cannot be parsed or that part is empty
/// (root path or trailing slash). Query and fragment are not part of the path.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}
