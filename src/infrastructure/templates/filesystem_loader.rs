//! Filesystem-based template loader
//!
//! Templates live in a single directory, typically next to the sources they
//! specialize, so outputs are written back into that same directory.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use crate::generation::{GenerationError, TemplateLoader, TemplateSource, TemplateSpec};

/// Template loader that reads template files from a directory
pub struct FileSystemTemplateLoader;

impl FileSystemTemplateLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemTemplateLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateLoader for FileSystemTemplateLoader {
    async fn load(
        &self,
        dir: &Path,
        spec: &TemplateSpec,
        suffix: String,
    ) -> Result<TemplateSource, GenerationError> {
        let path = dir.join(&spec.source);

        let content = fs::read_to_string(&path).await.map_err(|e| {
            GenerationError::TemplateLoad(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(TemplateSource {
            name: spec.source.clone(),
            path,
            content,
            suffix,
        })
    }
}
