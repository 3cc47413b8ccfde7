//! Filesystem-based output service implementation
//!
//! Each artifact is written to a hidden sibling file first and renamed over
//! the destination, so a failed write never leaves a truncated source behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::generation::{Artifact, GenerationError, OutputService};

/// Output service that writes artifacts to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }

    async fn write_atomic(&self, path: &Path, content: &str) -> Result<(), GenerationError> {
        let staging = staging_path(path);

        if let Err(e) = write_file(&staging, content).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e);
        }

        fs::rename(&staging, path).await.map_err(|e| {
            GenerationError::Output(format!(
                "Failed to move {} into place: {}",
                path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

/// `dir/.IntBuffer.kt.<uuid>.tmp` for `dir/IntBuffer.kt`
fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
}

async fn write_file(path: &Path, content: &str) -> Result<(), GenerationError> {
    let mut file = fs::File::create(path).await.map_err(|e| {
        GenerationError::Output(format!("Failed to create file {}: {}", path.display(), e))
    })?;

    file.write_all(content.as_bytes()).await.map_err(|e| {
        GenerationError::Output(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    file.sync_all().await.map_err(|e| {
        GenerationError::Output(format!("Failed to flush file {}: {}", path.display(), e))
    })?;
    Ok(())
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<(), GenerationError> {
        for artifact in artifacts {
            self.write_atomic(&artifact.path, &artifact.content)
                .await
                .inspect_err(|e| {
                    tracing::error!(path = %artifact.path.display(), error = %e, "Write failed");
                })?;
            tracing::info!(
                path = %artifact.path.display(),
                type_name = %artifact.type_name,
                "Wrote artifact"
            );
        }
        Ok(())
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}
