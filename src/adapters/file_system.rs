use std::path::Path;

use crate::ports::file_system::{FileSystem, FileSystemError, FileSystemResult};

/// File system adapter backed by `tokio::fs`
#[derive(Debug, Default, Clone)]
pub struct FileSystemAdapter;

impl FileSystemAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for FileSystemAdapter {
    async fn read_file(&self, path: &Path) -> FileSystemResult<Vec<u8>> {
        if path.as_os_str().is_empty() {
            return Err(FileSystemError::InvalidPath("empty path".to_string()));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(FileSystemError::IoError)?;
        if metadata.is_dir() {
            return Err(FileSystemError::InvalidPath(format!(
                "{} is a directory",
                path.display()
            )));
        }

        tokio::fs::read(path).await.map_err(FileSystemError::IoError)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("redirects.yaml");
        tokio::fs::write(&path, "- path: /a\n  url: /b\n")
            .await
            .unwrap();

        let fs = FileSystemAdapter::new();
        let content = fs.read_file(&path).await.unwrap();

        assert_eq!(content, b"- path: /a\n  url: /b\n");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let fs = FileSystemAdapter::new();

        let result = fs.read_file(&temp_dir.path().join("nope.json")).await;
        match result {
            Err(FileSystemError::IoError(e)) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let fs = FileSystemAdapter::new();

        let result = fs.read_file(temp_dir.path()).await;
        assert!(matches!(result, Err(FileSystemError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_empty_path_is_rejected() {
        let fs = FileSystemAdapter::new();
        let result = fs.read_file(Path::new("")).await;
        assert!(matches!(result, Err(FileSystemError::InvalidPath(_))));
    }
}
