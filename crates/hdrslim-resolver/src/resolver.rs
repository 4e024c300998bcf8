//! Include Resolver
//!
//! Depth-first walk over quoted includes, searching an ordered list of
//! include roots for every target.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use hdrslim_core::config::{Config, RootPolicy};
use hdrslim_core::{Error, HeaderSet, Location, Result, Unresolved};

use crate::paths::normalize_path;
use crate::scan::IncludeScanner;

/// Resolves the transitive quoted-include closure of header files
pub struct IncludeResolver {
    /// Include search roots, tried in order
    include_roots: Vec<PathBuf>,
    policy: RootPolicy,
    normalize: bool,
    scanner: IncludeScanner,
}

impl IncludeResolver {
    /// Create a resolver over the given roots with default settings
    pub fn new(include_roots: Vec<PathBuf>) -> Self {
        Self {
            include_roots,
            policy: RootPolicy::default(),
            normalize: true,
            scanner: IncludeScanner::new(),
        }
    }

    /// Create a resolver from a configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.include_roots.clone())
            .with_policy(config.resolver.policy)
            .with_normalization(config.resolver.normalize_paths)
    }

    pub fn with_policy(mut self, policy: RootPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Path under which `include` would be looked up in `root`
    pub fn candidate(&self, root: &Path, include: &str) -> PathBuf {
        self.key(&root.join(include))
    }

    fn key(&self, path: &Path) -> PathBuf {
        if self.normalize {
            normalize_path(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Seed the traversal with entry points and resolve each of them
    ///
    /// An entry point already discovered through an earlier one is not
    /// scanned a second time.
    pub fn resolve_entry_points(
        &self,
        entry_points: &[PathBuf],
        visited: &mut HeaderSet,
    ) -> Result<Vec<Unresolved>> {
        let mut unresolved = Vec::new();
        for entry in entry_points {
            let entry = self.key(entry);
            if !visited.insert(entry.clone()) {
                debug!("Entry point {:?} already visited", entry);
                continue;
            }
            self.scan_file(&entry, visited, &mut unresolved)?;
        }
        Ok(unresolved)
    }

    /// Scan `source` and every header it transitively includes
    ///
    /// Newly found headers are added to `visited`; `source` itself is not.
    /// Returns the include targets that no root could satisfy.
    pub fn resolve(&self, source: &Path, visited: &mut HeaderSet) -> Result<Vec<Unresolved>> {
        let mut unresolved = Vec::new();
        self.scan_file(source, visited, &mut unresolved)?;
        Ok(unresolved)
    }

    fn scan_file(
        &self,
        source: &Path,
        visited: &mut HeaderSet,
        unresolved: &mut Vec<Unresolved>,
    ) -> Result<()> {
        let bytes = std::fs::read(source).map_err(|e| Error::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        for directive in self.scanner.scan(&content) {
            let mut found = false;
            let mut last_candidate = None;

            for root in &self.include_roots {
                let candidate = self.candidate(root, &directive.target);

                if visited.contains(&candidate) {
                    found = true;
                    break;
                }

                if candidate.is_file() {
                    found = true;
                    debug!("Resolved {} in {:?}", directive.target, root);
                    visited.insert(candidate.clone());
                    self.scan_file(&candidate, visited, unresolved)?;
                    if self.policy == RootPolicy::FirstMatch {
                        break;
                    }
                }

                last_candidate = Some(candidate);
            }

            if !found {
                let candidate =
                    last_candidate.unwrap_or_else(|| PathBuf::from(&directive.target));
                let record = Unresolved {
                    include: directive.target,
                    location: Location::new(source, directive.line),
                    candidate,
                };
                warn!(
                    "Unresolved include \"{}\" at {} (last tried {})",
                    record.include,
                    record.location,
                    record.candidate.display()
                );
                unresolved.push(record);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_cycle_terminates() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        let a = write(&lib, "a.h", "#include \"b.h\"\n");
        let b = write(&lib, "b.h", "#include \"a.h\"\n");

        let resolver = IncludeResolver::new(vec![lib.clone()]);
        let mut visited = HeaderSet::new();
        let unresolved = resolver.resolve_entry_points(&[a.clone()], &mut visited).unwrap();

        assert!(unresolved.is_empty());
        assert_eq!(visited.as_slice(), &[a, b]);
    }

    #[test]
    fn test_shared_header_scanned_once() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        let a = write(&lib, "a.h", "#include \"common.h\"\n#include \"b.h\"\n");
        write(&lib, "b.h", "#include \"common.h\"\n");
        write(&lib, "common.h", "#include \"gone.h\"\n");

        let resolver = IncludeResolver::new(vec![lib.clone()]);
        let mut visited = HeaderSet::new();
        let unresolved = resolver.resolve_entry_points(&[a], &mut visited).unwrap();

        // common.h is scanned a single time, so its miss is reported once
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].include, "gone.h");
        assert_eq!(unresolved[0].location, Location::new(lib.join("common.h"), 1));
        assert_eq!(visited.len(), 3);
    }

    #[test]
    fn test_later_roots_are_still_searched() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        let entry = write(temp.path(), "entry.h", "#include \"dup.h\"\n");
        write(&first, "dup.h", "");
        write(&second, "dup.h", "#include \"only_in_second_chain.h\"\n");

        let resolver = IncludeResolver::new(vec![first.clone(), second.clone()]);
        let mut visited = HeaderSet::new();
        let unresolved = resolver.resolve(&entry, &mut visited).unwrap();

        // The first root's copy is discovered first
        assert_eq!(visited.as_slice(), &[first.join("dup.h"), second.join("dup.h")]);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].include, "only_in_second_chain.h");
        assert_eq!(unresolved[0].location, Location::new(second.join("dup.h"), 1));
    }

    #[test]
    fn test_first_match_policy_stops_at_first_root() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        let entry = write(temp.path(), "entry.h", "#include \"dup.h\"\n");
        write(&first, "dup.h", "");
        write(&second, "dup.h", "#include \"only_in_second_chain.h\"\n");

        let resolver = IncludeResolver::new(vec![first.clone(), second])
            .with_policy(RootPolicy::FirstMatch);
        let mut visited = HeaderSet::new();
        let unresolved = resolver.resolve(&entry, &mut visited).unwrap();

        assert_eq!(visited.as_slice(), &[first.join("dup.h")]);
        assert!(unresolved.is_empty());
    }

    #[test]
    fn test_unresolved_reports_last_candidate_only() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        let entry = write(temp.path(), "entry.h", "// header\n#include \"missing.h\"\n");

        let resolver = IncludeResolver::new(vec![first, second.clone()]);
        let mut visited = HeaderSet::new();
        let unresolved = resolver.resolve(&entry, &mut visited).unwrap();

        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].candidate, second.join("missing.h"));
        assert_eq!(unresolved[0].location.line, 2);
        assert!(visited.is_empty());
    }

    #[test]
    fn test_no_roots_reports_bare_include() {
        let temp = TempDir::new().unwrap();
        let entry = write(temp.path(), "entry.h", "#include \"x.h\"\n");

        let resolver = IncludeResolver::new(Vec::new());
        let unresolved = resolver.resolve(&entry, &mut HeaderSet::new()).unwrap();

        assert_eq!(unresolved[0].candidate, PathBuf::from("x.h"));
    }

    #[test]
    fn test_parent_dir_includes_are_normalized() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        let entry = write(&lib, "a.h", "#include \"sub/../b.h\"\n#include \"b.h\"\n");
        write(&lib, "sub/keep.h", "");
        write(&lib, "b.h", "");

        let resolver = IncludeResolver::new(vec![lib.clone()]);
        let mut visited = HeaderSet::new();
        resolver.resolve(&entry, &mut visited).unwrap();

        assert_eq!(visited.as_slice(), &[lib.join("b.h")]);
    }

    #[test]
    fn test_unreadable_entry_point_is_fatal() {
        let temp = TempDir::new().unwrap();
        let resolver = IncludeResolver::new(vec![temp.path().to_path_buf()]);
        let err = resolver
            .resolve_entry_points(&[temp.path().join("nope.h")], &mut HeaderSet::new())
            .unwrap_err();

        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_repeated_entry_point_is_not_rescanned() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        let a = write(&lib, "a.h", "#include \"b.h\"\n");
        let b = write(&lib, "b.h", "#include \"missing.h\"\n");

        let resolver = IncludeResolver::new(vec![lib]);
        let mut visited = HeaderSet::new();
        let unresolved = resolver.resolve_entry_points(&[a, b], &mut visited).unwrap();

        assert_eq!(unresolved.len(), 1);
        assert_eq!(visited.len(), 2);
    }
}
