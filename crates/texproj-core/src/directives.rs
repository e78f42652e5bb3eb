//! Recognizers for the inclusion directive and the asset references

use regex::Regex;
use std::sync::LazyLock;

// Greedy on purpose: the captured path runs up to the last `}` on the line.
static INPUT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\input\{(.*)\}").expect("valid input pattern"));

static GRAPHICS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\includegraphics.*\{(.*)\}").expect("valid graphics pattern"));

static BIBLIOGRAPHY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\bibliography\{(.*)\}").expect("valid bibliography pattern"));

/// An asset referenced from a document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetReference<'a> {
    Graphics(&'a str),
    Bibliography(&'a str),
}

impl<'a> AssetReference<'a> {
    /// The referenced path, verbatim.
    pub fn path(&self) -> &'a str {
        match self {
            AssetReference::Graphics(path) | AssetReference::Bibliography(path) => path,
        }
    }
}

/// A line whose first non-blank character is `%`.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('%')
}

/// Path captured by the first `\input{...}` on the line, if any.
pub fn match_inclusion(line: &str) -> Option<&str> {
    capture(&INPUT_PATTERN, line)
}

/// Graphics first, then bibliography; the first kind that matches wins and
/// the line is not inspected further.
pub fn match_asset_reference(line: &str) -> Option<AssetReference<'_>> {
    if let Some(path) = capture(&GRAPHICS_PATTERN, line) {
        return Some(AssetReference::Graphics(path));
    }
    capture(&BIBLIOGRAPHY_PATTERN, line).map(AssetReference::Bibliography)
}

fn capture<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
