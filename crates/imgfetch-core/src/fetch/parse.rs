//! Response header parsing.

/// One raw header line as text. Bytes that are not UTF-8 become U+FFFD
/// instead of losing the whole line.
pub(crate) fn header_line(data: &[u8]) -> String {
    String::from_utf8_lossy(data).trim_end().to_string()
}

/// Extracts the `Content-Type` of the final response from raw header lines.
///
/// With redirects followed, curl reports the headers of every hop; a status
/// line (`HTTP/...`) starts a new response, so anything collected before it
/// is discarded.
pub(crate) fn content_type(lines: &[String]) -> Option<String> {
    let mut content_type = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }
    content_type
}
