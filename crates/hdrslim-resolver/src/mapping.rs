//! Output path mapping

use std::path::{Path, PathBuf};

use hdrslim_core::config::RenameConfig;

/// Maps a source header path into the renamed destination tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    token: String,
    alias: String,
}

impl PathMapping {
    pub fn new(token: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            alias: alias.into(),
        }
    }

    pub fn from_config(rename: &RenameConfig) -> Self {
        Self::new(rename.token.clone(), rename.alias.clone())
    }

    /// Replace the first occurrence of the token in `path`
    ///
    /// Paths that are not valid UTF-8 are returned unchanged.
    pub fn map(&self, path: &Path) -> PathBuf {
        match path.to_str() {
            Some(text) if !self.token.is_empty() => {
                PathBuf::from(text.replacen(&self.token, &self.alias, 1))
            }
            _ => path.to_path_buf(),
        }
    }

    /// Destination for `path`, or `None` when the mapping is the identity
    pub fn destination(&self, path: &Path) -> Option<PathBuf> {
        let mapped = self.map(path);
        if mapped.as_path() == path {
            None
        } else {
            Some(mapped)
        }
    }
}
