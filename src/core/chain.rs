//! Assembly of the standard redirect chain.
//!
//! Stages are built innermost first, so each outer stage takes ownership of
//! the chain built so far as its fallback:
//!
//! ```text
//! request -> JSON (optional) -> YAML (optional) -> static -> terminal
//! ```
use std::path::PathBuf;

use crate::{
    core::{
        error::StageResult,
        mapping::{PathUrlEntry, build_mapping},
        resolver::{DEFAULT_RESPONSE, ResolverStage, StageSource},
        stages::{load_json_stage, load_yaml_stage},
    },
    ports::file_system::FileSystem,
};

/// Inputs for [`ChainBuilder::build`].
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    static_entries: Vec<PathUrlEntry>,
    yaml_file: Option<PathBuf>,
    json_file: Option<PathBuf>,
    default_response: String,
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self {
            static_entries: Vec::new(),
            yaml_file: None,
            json_file: None,
            default_response: DEFAULT_RESPONSE.to_string(),
        }
    }
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn static_entries(mut self, entries: impl IntoIterator<Item = PathUrlEntry>) -> Self {
        self.static_entries = entries.into_iter().collect();
        self
    }

    pub fn yaml_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.yaml_file = path.map(Into::into);
        self
    }

    pub fn json_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.json_file = path.map(Into::into);
        self
    }

    pub fn default_response(mut self, body: impl Into<String>) -> Self {
        self.default_response = body.into();
        self
    }

    /// Build the chain, reading any configured files through `fs`.
    ///
    /// The first read or parse failure aborts construction; no partially
    /// built chain is returned.
    pub async fn build<F: FileSystem>(&self, fs: &F) -> StageResult<ResolverStage> {
        let terminal = ResolverStage::terminal(self.default_response.clone());
        let mut chain = ResolverStage::map(
            StageSource::Static,
            build_mapping(&self.static_entries),
            terminal,
        );

        if let Some(path) = &self.yaml_file {
            chain = load_yaml_stage(fs, path, chain).await?;
        }
        if let Some(path) = &self.json_file {
            chain = load_json_stage(fs, path, chain).await?;
        }

        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path};

    use super::*;
    use crate::{
        core::{error::ConfigFormat, resolver::Resolution},
        ports::file_system::{FileSystemError, FileSystemResult},
    };

    /// In-memory file system keyed by path.
    #[derive(Default)]
    struct MemoryFileSystem {
        files: HashMap<PathBuf, Vec<u8>>,
    }

    impl MemoryFileSystem {
        fn with_file(mut self, path: &str, content: &str) -> Self {
            self.files
                .insert(PathBuf::from(path), content.as_bytes().to_vec());
            self
        }
    }

    impl FileSystem for MemoryFileSystem {
        async fn read_file(&self, path: &Path) -> FileSystemResult<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                FileSystemError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such file",
                ))
            })
        }
    }

    fn static_entries() -> Vec<PathUrlEntry> {
        vec![
            PathUrlEntry::new("/shared", "https://static.example.com/shared"),
            PathUrlEntry::new("/static-only", "https://static.example.com"),
        ]
    }

    #[tokio::test]
    async fn test_static_only_chain() {
        let chain = ChainBuilder::new()
            .static_entries(static_entries())
            .build(&MemoryFileSystem::default())
            .await
            .unwrap();

        assert_eq!(chain.depth(), 2);
        assert_eq!(
            chain.resolve("/static-only").redirect_url(),
            Some("https://static.example.com")
        );
        match chain.resolve("/unknown") {
            Resolution::Terminal(terminal) => assert_eq!(terminal.body(), DEFAULT_RESPONSE),
            other => panic!("expected terminal, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_json_then_yaml_then_static() {
        let fs = MemoryFileSystem::default()
            .with_file(
                "r.yaml",
                "- path: /shared\n  url: https://yaml.example.com/shared\n- path: /yaml-only\n  url: https://yaml.example.com\n",
            )
            .with_file(
                "r.json",
                r#"{"redirects":[{"path":"/shared","url":"https://json.example.com/shared"}]}"#,
            );

        let chain = ChainBuilder::new()
            .static_entries(static_entries())
            .yaml_file(Some("r.yaml"))
            .json_file(Some("r.json"))
            .build(&fs)
            .await
            .unwrap();

        assert_eq!(chain.depth(), 4);
        assert_eq!(
            chain.resolve("/shared"),
            Resolution::Redirect {
                url: "https://json.example.com/shared",
                source: StageSource::Json,
            }
        );
        assert_eq!(
            chain.resolve("/yaml-only"),
            Resolution::Redirect {
                url: "https://yaml.example.com",
                source: StageSource::Yaml,
            }
        );
        assert_eq!(
            chain.resolve("/static-only"),
            Resolution::Redirect {
                url: "https://static.example.com",
                source: StageSource::Static,
            }
        );
    }

    #[tokio::test]
    async fn test_missing_yaml_file_is_read_error() {
        let err = ChainBuilder::new()
            .yaml_file(Some("missing.yaml"))
            .build(&MemoryFileSystem::default())
            .await
            .unwrap_err();

        assert!(err.is_read());
        assert_eq!(err.format(), ConfigFormat::Yaml);
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[tokio::test]
    async fn test_missing_json_file_is_read_error() {
        let err = ChainBuilder::new()
            .json_file(Some("missing.json"))
            .build(&MemoryFileSystem::default())
            .await
            .unwrap_err();

        assert!(err.is_read());
        assert_eq!(err.format(), ConfigFormat::Json);
    }

    #[tokio::test]
    async fn test_bad_yaml_aborts_even_with_valid_json() {
        let fs = MemoryFileSystem::default()
            .with_file("bad.yaml", "- path: /a\n  url: {unclosed\n")
            .with_file("ok.json", r#"{"redirects":[]}"#);

        let err = ChainBuilder::new()
            .yaml_file(Some("bad.yaml"))
            .json_file(Some("ok.json"))
            .build(&fs)
            .await
            .unwrap_err();

        assert!(err.is_parse());
        assert_eq!(err.format(), ConfigFormat::Yaml);
    }

    #[tokio::test]
    async fn test_custom_default_response() {
        let chain = ChainBuilder::new()
            .default_response("nothing here")
            .build(&MemoryFileSystem::default())
            .await
            .unwrap();

        match chain.resolve("/") {
            Resolution::Terminal(terminal) => assert_eq!(terminal.body(), "nothing here"),
            other => panic!("expected terminal, got {other:?}"),
        }
    }
}
