//! Core type definitions

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::location::Location;

/// Headers discovered during one run, in discovery order
///
/// Doubles as the visited set of the traversal: a path that has been
/// inserted is never scanned again.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    order: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl HeaderSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning `false` if it was already present
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.order.push(path);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.order
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

impl Serialize for HeaderSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.order)
    }
}

/// An include target that no include root could satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    /// Quoted argument of the directive
    pub include: String,
    /// Where the directive was found
    pub location: Location,
    /// Candidate built from the last include root tried
    pub candidate: PathBuf,
}

impl std::fmt::Display for Unresolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Not found path: {}", self.candidate.display())
    }
}

/// A header copied into the renamed tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Bytes written, zero for a dry run
    pub bytes: u64,
}

/// Outcome of materializing a header set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    /// Files copied (or planned, for a dry run)
    pub copied: Vec<CopiedFile>,
    /// Paths whose mapping is the identity
    pub skipped: Vec<PathBuf>,
    pub dry_run: bool,
}

impl MaterializeReport {
    pub fn total_bytes(&self) -> u64 {
        self.copied.iter().map(|c| c.bytes).sum()
    }
}

/// Everything a full run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub headers: HeaderSet,
    pub unresolved: Vec<Unresolved>,
    pub materialized: Option<MaterializeReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_set_dedup_keeps_first_position() {
        let mut set = HeaderSet::new();
        assert!(set.insert("lib/a.h"));
        assert!(set.insert("lib/b.h"));
        assert!(!set.insert("lib/a.h"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), &[PathBuf::from("lib/a.h"), PathBuf::from("lib/b.h")]);
    }

    #[test]
    fn test_header_set_component_equality() {
        let mut set = HeaderSet::new();
        set.insert("lib//a.h");
        assert!(set.contains(Path::new("lib/a.h")));
    }

    #[test]
    fn test_header_set_serializes_as_list() {
        let set: HeaderSet = ["x/a.h", "x/b.h"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["x/a.h","x/b.h"]"#);
    }

    #[test]
    fn test_unresolved_display() {
        let unresolved = Unresolved {
            include: "missing.h".into(),
            location: Location::new("lib/a.h", 3),
            candidate: PathBuf::from("lib/missing.h"),
        };
        assert_eq!(unresolved.to_string(), "Not found path: lib/missing.h");
    }
}
