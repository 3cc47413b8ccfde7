//! Output service implementations

pub mod filesystem_output;

pub use filesystem_output::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Artifact, GenerationError, OutputService};
    use tempfile::TempDir;

    fn artifact(path: std::path::PathBuf, content: &str) -> Artifact {
        Artifact {
            path,
            content: content.to_string(),
            template: "FloatBuffer.kt".to_string(),
            type_name: "Int".to_string(),
        }
    }

    #[tokio::test]
    async fn test_filesystem_output_write_artifacts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();

        let artifacts = vec![
            artifact(temp_dir.path().join("IntBuffer.kt"), "class IntBuffer\n"),
            artifact(temp_dir.path().join("IntDeque.kt"), "class IntDeque\n"),
        ];

        let result = output_service.write_artifacts(&artifacts).await;
        assert!(result.is_ok());

        let content = std::fs::read_to_string(temp_dir.path().join("IntBuffer.kt"))
            .expect("Failed to read IntBuffer.kt");
        assert_eq!(content, "class IntBuffer\n");
        assert!(temp_dir.path().join("IntDeque.kt").exists());

        // No staging files are left behind
        let entries = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[tokio::test]
    async fn test_filesystem_output_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("LongBuffer.kt");
        std::fs::write(&path, "stale content that is longer than the new one\n").unwrap();

        let output_service = FileSystemOutputService::new();
        output_service
            .write_artifacts(&[artifact(path.clone(), "class LongBuffer\n")])
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class LongBuffer\n");
    }

    #[tokio::test]
    async fn test_filesystem_output_stops_at_first_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();

        let artifacts = vec![
            artifact(temp_dir.path().join("missing/IntBuffer.kt"), "class IntBuffer\n"),
            artifact(temp_dir.path().join("IntDeque.kt"), "class IntDeque\n"),
        ];

        let result = output_service.write_artifacts(&artifacts).await;
        assert!(matches!(result, Err(GenerationError::Output(_))));
        assert!(!temp_dir.path().join("IntDeque.kt").exists());
    }
}
