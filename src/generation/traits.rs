//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::path::Path;

use crate::generation::{Artifact, GenerationError, TemplateSource, TemplateSpec};

/// Loads generic template files
#[async_trait]
pub trait TemplateLoader: Send + Sync {
    /// Read one template from `dir`; `suffix` names its outputs
    async fn load(
        &self,
        dir: &Path,
        spec: &TemplateSpec,
        suffix: String,
    ) -> Result<TemplateSource, GenerationError>;
}

/// Service for writing generated artifacts to the output destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts, stopping at the first failure
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), GenerationError>;
}
