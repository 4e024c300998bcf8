//! Include directive scanner
//!
//! Line-oriented extraction of quoted `#include "..."` targets. Comment
//! handling is deliberately per-line: a `/* ... */` block spanning several
//! lines is not tracked, so an include inside such a block is still reported
//! unless its own line carries comment markers.

use regex::Regex;
use tracing::trace;

/// Remove comment text from a single line
///
/// Applied in order: cut at the first `//`, cut at the first `/*`, then drop
/// everything up to and including the first `*/` that is left.
pub fn strip_comments(line: &str) -> &str {
    let mut line = line;
    if let Some(idx) = line.find("//") {
        line = &line[..idx];
    }
    if let Some(idx) = line.find("/*") {
        line = &line[..idx];
    }
    if let Some(idx) = line.find("*/") {
        line = &line[idx + 2..];
    }
    line
}

/// Split text on `\n`, `\r\n` and a lone `\r`
///
/// Headers with classic Mac line endings would otherwise collapse into a
/// single line and lose every include after the first one.
pub fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}

/// A quoted include found in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Text between the quotes
    pub target: String,
    /// Line number (1-based)
    pub line: u32,
}

/// Finds quoted include directives in C/C++ source text
pub struct IncludeScanner {
    pattern: Regex,
}

impl IncludeScanner {
    pub fn new() -> Self {
        Self {
            // Anchored at the start only, greedy up to the last quote
            pattern: Regex::new(r#"^#include\s+"(.*)""#).expect("include pattern is valid"),
        }
    }

    /// Extract the include target of one line, if it has one
    pub fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = strip_comments(line).trim();
        let target = self.pattern.captures(line)?.get(1)?.as_str();
        if target.contains('<') {
            trace!("Ignoring include with angle bracket: {}", target);
            return None;
        }
        Some(target)
    }

    /// Scan a whole source text
    pub fn scan(&self, source: &str) -> Vec<IncludeDirective> {
        split_lines(source)
            .enumerate()
            .filter_map(|(idx, line)| {
                self.match_line(line).map(|target| IncludeDirective {
                    target: target.to_string(),
                    line: idx as u32 + 1,
                })
            })
            .collect()
    }
}

impl Default for IncludeScanner {
    fn default() -> Self {
        Self::new()
    }
}
