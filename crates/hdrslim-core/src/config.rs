//! Configuration types
//!
//! Every field has a default matching the TensorFlow Lite header grab the
//! tool was first written for, so an empty YAML document is a valid config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// hdrslim configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories searched, in order, for quoted include targets
    pub include_roots: Vec<PathBuf>,

    /// Headers that seed the traversal
    pub entry_points: Vec<PathBuf>,

    /// Destination renaming
    pub rename: RenameConfig,

    /// Resolver configuration
    pub resolver: ResolverConfig,

    /// Materializer configuration
    pub materializer: MaterializerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_roots: vec!["tensorflow/".into(), "tensorflow/tensorflow/".into()],
            entry_points: vec![
                "tensorflow/tensorflow/lite/interpreter.h".into(),
                "tensorflow/tensorflow/lite/optional_debug_tools.h".into(),
                "tensorflow/tensorflow/lite/model.h".into(),
                "tensorflow/tensorflow/lite/kernels/register.h".into(),
                "tensorflow/tensorflow/lite/c/common.h".into(),
            ],
            rename: RenameConfig::default(),
            resolver: ResolverConfig::default(),
            materializer: MaterializerConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document, treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the invariants the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.rename.token.is_empty() {
            return Err(Error::Config("rename token must not be empty".into()));
        }
        Ok(())
    }
}

/// Rename token substitution applied to every discovered header path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Text searched for in the source path (first occurrence only)
    pub token: String,

    /// Replacement text
    pub alias: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            token: "tensorflow".into(),
            alias: "tf".into(),
        }
    }
}

/// How include roots are tried once one of them has matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    /// Keep trying the remaining roots and collect every existing candidate
    #[default]
    AllRoots,
    /// Stop at the first root containing the header
    FirstMatch,
}

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Root search policy
    pub policy: RootPolicy,

    /// Lexically collapse `.` and `..` in candidate paths
    pub normalize_paths: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            policy: RootPolicy::AllRoots,
            normalize_paths: true,
        }
    }
}

/// Materializer configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializerConfig {
    /// Copy files on the rayon thread pool
    pub parallel: bool,

    /// Compute the copy plan without touching the filesystem
    pub dry_run: bool,
}
