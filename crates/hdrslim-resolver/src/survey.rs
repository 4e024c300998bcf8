//! Header tree survey
//!
//! Counts every header under the include roots, to compare the full tree
//! with the slimmed closure.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::paths::normalize_path;

/// Extensions counted as headers by default
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "inc"];

/// Size of the header tree below a set of roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSurvey {
    pub headers: usize,
    pub bytes: u64,
}

/// Walk the roots and count header files, each file counted once
///
/// Nested roots (`tensorflow/` and `tensorflow/tensorflow/`) overlap, so
/// files are deduplicated by normalized path.
pub fn survey_roots(roots: &[PathBuf], extensions: &[&str]) -> TreeSurvey {
    let mut seen = HashSet::new();
    let mut survey = TreeSurvey::default();

    for root in roots {
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| has_extension(e.path(), extensions))
        {
            if !seen.insert(normalize_path(entry.path())) {
                continue;
            }
            survey.headers += 1;
            survey.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
        debug!("Surveyed {:?}: {} headers so far", root, survey.headers);
    }

    survey
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_nested_roots_counted_once() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path().join("tensorflow");
        let inner = outer.join("tensorflow");
        fs::create_dir_all(inner.join("lite")).unwrap();
        fs::write(outer.join("top.h"), "12345").unwrap();
        fs::write(inner.join("lite/model.h"), "123").unwrap();
        fs::write(inner.join("lite/model.cc"), "ignored").unwrap();

        let survey = survey_roots(&[outer, inner], HEADER_EXTENSIONS);

        assert_eq!(survey, TreeSurvey { headers: 2, bytes: 8 });
    }

    #[test]
    fn test_missing_root_is_empty() {
        let survey = survey_roots(&[PathBuf::from("/nonexistent/hdrslim")], HEADER_EXTENSIONS);
        assert_eq!(survey, TreeSurvey::default());
    }
}
