//! Tolerant key/value text parsing.
//!
//! Query parameters and headers arrive as freeform text, one `key: value`
//! pair per line or comma-separated. Malformed fragments never fail the
//! caller; they are collected as [`KvIssue`]s so the caller can decide how
//! loudly to report them.

use thiserror::Error;

/// Insertion-ordered string mapping. A duplicate key keeps its original
/// position and takes the last value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvMap {
    entries: Vec<(String, String)>,
}

impl KvMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// First entry whose key matches ignoring ASCII case.
    #[must_use]
    pub fn get_ignore_ascii_case(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for KvMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = KvMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// A fragment the tokenizer could not turn into a pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KvIssue {
    #[error("Fragment '{fragment}' has no ':' delimiter.")]
    MissingDelimiter { fragment: String },
    #[error("Fragment '{fragment}' has an empty key.")]
    EmptyKey { fragment: String },
}

/// Tokenizes freeform `key: value` text into an ordered mapping.
///
/// Pairs are delimited by newlines or commas interchangeably; keys and
/// values are trimmed. Blank fragments are skipped silently, malformed ones
/// are returned as issues. Never fails: worst case is an empty map.
#[must_use]
pub fn parse_pairs(text: &str) -> (KvMap, Vec<KvIssue>) {
    let mut map = KvMap::new();
    let mut issues = Vec::new();

    for line in text.lines() {
        for fragment in line.split(',') {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            match fragment.split_once(':') {
                Some((key, value)) => {
                    let key = key.trim();
                    if key.is_empty() {
                        issues.push(KvIssue::EmptyKey {
                            fragment: fragment.to_owned(),
                        });
                        continue;
                    }
                    map.insert(key.to_owned(), value.trim().to_owned());
                }
                None => issues.push(KvIssue::MissingDelimiter {
                    fragment: fragment.to_owned(),
                }),
            }
        }
    }

    (map, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};

    fn expect_pair(map: &KvMap, key: &str, value: &str) -> AppResult<()> {
        match map.get(key) {
            Some(found) if found == value => Ok(()),
            Some(found) => Err(AppError::validation(format!(
                "key '{}': expected '{}', got '{}'",
                key, value, found
            ))),
            None => Err(AppError::validation(format!("missing key '{}'", key))),
        }
    }

    #[test]
    fn comma_and_newline_forms_agree() -> AppResult<()> {
        let (by_comma, comma_issues) = parse_pairs("userId: 1, limit: 3");
        let (by_line, line_issues) = parse_pairs("userId: 1\nlimit: 3");
        if by_comma != by_line {
            return Err(AppError::validation("delimiter choice changed the mapping"));
        }
        if !comma_issues.is_empty() || !line_issues.is_empty() {
            return Err(AppError::validation("well-formed input produced issues"));
        }
        expect_pair(&by_comma, "userId", "1")?;
        expect_pair(&by_comma, "limit", "3")
    }

    #[test]
    fn duplicate_key_keeps_position_takes_last_value() -> AppResult<()> {
        let (map, _) = parse_pairs("a: 1, b: 2, a: 3");
        expect_pair(&map, "a", "3")?;
        match map.entries().first() {
            Some((key, _)) if key == "a" => Ok(()),
            _ => Err(AppError::validation("duplicate key lost its position")),
        }
    }

    #[test]
    fn malformed_fragment_is_collected_not_fatal() -> AppResult<()> {
        let (map, issues) = parse_pairs("good: yes, nodelimiter, also: fine");
        expect_pair(&map, "good", "yes")?;
        expect_pair(&map, "also", "fine")?;
        match issues.as_slice() {
            [KvIssue::MissingDelimiter { fragment }] if fragment == "nodelimiter" => Ok(()),
            _ => Err(AppError::validation(format!(
                "unexpected issues: {:?}",
                issues
            ))),
        }
    }

    #[test]
    fn empty_key_is_an_issue() -> AppResult<()> {
        let (map, issues) = parse_pairs(": orphan");
        if !map.is_empty() {
            return Err(AppError::validation("empty key must not be inserted"));
        }
        match issues.as_slice() {
            [KvIssue::EmptyKey { .. }] => Ok(()),
            _ => Err(AppError::validation(format!(
                "unexpected issues: {:?}",
                issues
            ))),
        }
    }

    #[test]
    fn empty_input_yields_empty_map() -> AppResult<()> {
        let (map, issues) = parse_pairs("");
        if map.is_empty() && issues.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation("empty input must yield nothing"))
        }
    }

    #[test]
    fn value_may_contain_extra_colons() -> AppResult<()> {
        let (map, _) = parse_pairs("Referer: https://example.com/a");
        expect_pair(&map, "Referer", "https://example.com/a")
    }

    #[test]
    fn case_insensitive_lookup_finds_first_match() -> AppResult<()> {
        let (map, _) = parse_pairs("Content-Type: text/plain\nCONTENT-TYPE: ignored");
        match map.get_ignore_ascii_case("content-type") {
            Some("text/plain") => Ok(()),
            other => Err(AppError::validation(format!("unexpected: {:?}", other))),
        }
    }
}
