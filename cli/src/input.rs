use std::fs;
use std::path::Path;

use anyhow::Context;

/// Reads a line-delimited list, trimming each line and skipping blanks.
pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_lines(&content))
}

pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
