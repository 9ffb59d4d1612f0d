//! Linux-safe filename sanitization.

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`, one for one
/// - Limits length to 255 bytes (Linux NAME_MAX)
///
/// Everything else is kept as-is, so distinct names stay distinct.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let out: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out[..take].to_string()
    } else {
        out
    }
}

/// True for names that cannot be used as a file inside the storage directory.
pub(crate) fn is_reserved_name(name: &str) -> bool {
    name.is_empty() || name == "." || name == ".."
}
