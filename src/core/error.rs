use std::fmt;

use thiserror::Error;

use crate::ports::file_system::FileSystemError;

/// Wire format of a redirect file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => f.write_str("YAML"),
            ConfigFormat::Json => f.write_str("JSON"),
        }
    }
}

/// Construction-time failure of a file-backed stage.
///
/// Neither kind is retried. Lookups never produce errors; a miss is ordinary
/// delegation to the fallback stage.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StageError {
    /// The redirect file could not be opened or fully read.
    #[error("failed to read {format} redirect file '{path}': {source}")]
    Read {
        format: ConfigFormat,
        path: String,
        #[source]
        source: FileSystemError,
    },

    /// The content is not valid syntax for its format or has the wrong shape.
    #[error("failed to parse {format} redirects: {source}")]
    Parse {
        format: ConfigFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl StageError {
    pub fn format(&self) -> ConfigFormat {
        match self {
            StageError::Read { format, .. } | StageError::Parse { format, .. } => *format,
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, StageError::Read { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, StageError::Parse { .. })
    }
}

pub type StageResult<T> = Result<T, StageError>;
