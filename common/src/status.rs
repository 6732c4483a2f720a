//! Status code filtering.

use std::collections::BTreeSet;

use crate::error::StatusCodeError;

/// Decides which observed status codes are worth keeping.
///
/// An empty include set accepts every code; the exclude set always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    include: BTreeSet<u16>,
    exclude: BTreeSet<u16>,
}

impl StatusFilter {
    pub fn new(include: impl IntoIterator<Item = u16>, exclude: impl IntoIterator<Item = u16>) -> Self {
        Self {
            include: include.into_iter().collect(),
            exclude: exclude.into_iter().collect(),
        }
    }

    /// Builds a filter from two comma-separated lists such as `"200,301"`.
    pub fn parse(include: &str, exclude: &str) -> Result<Self, StatusCodeError> {
        Ok(Self::new(parse_codes(include)?, parse_codes(exclude)?))
    }

    pub fn matches(&self, code: u16) -> bool {
        if self.exclude.contains(&code) {
            return false;
        }
        self.include.is_empty() || self.include.contains(&code)
    }
}

/// Parses `"200, 301,,404"` into codes. Blank entries are skipped.
pub fn parse_codes(list: &str) -> Result<Vec<u16>, StatusCodeError> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u16>().map_err(|_| StatusCodeError(part.to_string())))
        .collect()
}
