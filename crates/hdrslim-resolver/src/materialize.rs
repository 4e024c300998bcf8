//! Tree Materializer
//!
//! Copies every discovered header whose mapped path differs from its source
//! path. Iterations are independent, so the copy can run on the rayon pool.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use hdrslim_core::config::Config;
use hdrslim_core::{CopiedFile, Error, HeaderSet, MaterializeReport, Result};

use crate::mapping::PathMapping;

/// Copies a header set into the renamed tree
pub struct TreeMaterializer {
    mapping: PathMapping,
    parallel: bool,
    dry_run: bool,
}

impl TreeMaterializer {
    pub fn new(mapping: PathMapping) -> Self {
        Self {
            mapping,
            parallel: false,
            dry_run: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(PathMapping::from_config(&config.rename))
            .with_parallel(config.materializer.parallel)
            .with_dry_run(config.materializer.dry_run)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Split headers into (source, destination) pairs and identity paths
    pub fn plan(&self, headers: &HeaderSet) -> (Vec<(PathBuf, PathBuf)>, Vec<PathBuf>) {
        let mut copies = Vec::new();
        let mut skipped = Vec::new();
        for header in headers {
            match self.mapping.destination(header) {
                Some(dest) => copies.push((header.clone(), dest)),
                None => skipped.push(header.clone()),
            }
        }
        (copies, skipped)
    }

    /// Copy every mapped header, overwriting existing destinations
    pub fn materialize(&self, headers: &HeaderSet) -> Result<MaterializeReport> {
        let (copies, skipped) = self.plan(headers);

        let copied = if self.dry_run {
            copies
                .into_iter()
                .map(|(source, destination)| CopiedFile {
                    source,
                    destination,
                    bytes: 0,
                })
                .collect()
        } else if self.parallel {
            copies
                .par_iter()
                .map(|(source, destination)| copy_header(source, destination))
                .collect::<Result<Vec<_>>>()?
        } else {
            copies
                .iter()
                .map(|(source, destination)| copy_header(source, destination))
                .collect::<Result<Vec<_>>>()?
        };

        info!(
            "Materialized {} headers ({} skipped{})",
            copied.len(),
            skipped.len(),
            if self.dry_run { ", dry run" } else { "" }
        );

        Ok(MaterializeReport {
            copied,
            skipped,
            dry_run: self.dry_run,
        })
    }
}

fn copy_header(source: &Path, destination: &Path) -> Result<CopiedFile> {
    let copy_error = |e| Error::Copy {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: e,
    };

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(copy_error)?;
        }
    }
    let bytes = fs::copy(source, destination).map_err(copy_error)?;
    debug!("Copied {:?} -> {:?}", source, destination);

    Ok(CopiedFile {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        bytes,
    })
}
