//! Resolve-then-materialize pipeline

use tracing::info;

use hdrslim_core::{Config, HeaderSet, MaterializeReport, PipelineReport, Result, Unresolved};

use crate::materialize::TreeMaterializer;
use crate::resolver::IncludeResolver;

/// A configured run over one header tree
pub struct Pipeline {
    config: Config,
    resolver: IncludeResolver,
    materializer: TreeMaterializer,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: IncludeResolver::from_config(&config),
            materializer: TreeMaterializer::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Discover the header closure of the configured entry points
    pub fn resolve(&self) -> Result<(HeaderSet, Vec<Unresolved>)> {
        let mut headers = HeaderSet::new();
        let unresolved = self
            .resolver
            .resolve_entry_points(&self.config.entry_points, &mut headers)?;

        info!(
            "Resolved {} headers from {} entry points ({} unresolved)",
            headers.len(),
            self.config.entry_points.len(),
            unresolved.len()
        );
        Ok((headers, unresolved))
    }

    /// Resolution only, no files copied
    pub fn resolve_only(&self) -> Result<PipelineReport> {
        let (headers, unresolved) = self.resolve()?;
        Ok(PipelineReport {
            headers,
            unresolved,
            materialized: None,
        })
    }

    /// Copy an already resolved closure into the renamed tree
    pub fn materialize(&self, headers: &HeaderSet) -> Result<MaterializeReport> {
        self.materializer.materialize(headers)
    }

    /// Resolve and copy the closure into the renamed tree
    pub fn run(&self) -> Result<PipelineReport> {
        let (headers, unresolved) = self.resolve()?;
        let materialized = self.materialize(&headers)?;
        Ok(PipelineReport {
            headers,
            unresolved,
            materialized: Some(materialized),
        })
    }
}
