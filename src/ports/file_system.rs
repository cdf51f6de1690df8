use std::path::Path;

use thiserror::Error;

/// Error type for file system operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FileSystemError {
    /// Error when encountering an IO issue
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error when path is invalid
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result type for file system operations
pub type FileSystemResult<T> = Result<T, FileSystemError>;

/// FileSystem defines the port (interface) for reading redirect files
pub trait FileSystem: Send + Sync + 'static {
    /// Read a whole file into memory
    ///
    /// # Arguments
    /// * `path` - Location of the file to read
    ///
    /// # Returns
    /// A future that resolves to the raw file bytes or an error. Partial reads
    /// are reported as errors, never as truncated content.
    fn read_file(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = FileSystemResult<Vec<u8>>> + Send;
}
