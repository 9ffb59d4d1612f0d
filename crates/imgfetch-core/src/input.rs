//! URL list input: a comma-separated line, or a file of them.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Splits a line on `,`, trims each entry and drops empty ones.
pub fn parse_url_list(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads URLs from a file: one or more comma-separated URLs per line.
/// Blank lines and lines starting with `#` are ignored.
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(parse_url_list)
        .collect())
}
