//! File-backed stage construction.
//!
//! YAML and JSON redirect files use two unrelated layouts. They only share the
//! resulting [`PathUrlEntry`] list:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://example.com/demo
//! ```
//!
//! ```json
//! { "redirects": [ { "path": "/some-path", "url": "https://example.com/demo" } ] }
//! ```
//!
//! Records missing `path` or `url` load with empty strings. A record with an
//! empty `url` delegates at lookup time instead of redirecting.
use std::path::Path;

use serde::Deserialize;

use crate::{
    core::{
        error::{ConfigFormat, StageError, StageResult},
        mapping::{PathUrlEntry, build_mapping, null_as_default},
        resolver::{ResolverStage, StageSource},
    },
    ports::file_system::FileSystem,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonRedirects {
    #[serde(deserialize_with = "null_as_default")]
    redirects: Vec<PathUrlEntry>,
}

/// Decode a YAML redirect document: a top-level sequence of `{path, url}`.
///
/// A document with no content at all, or a bare null, yields no entries.
pub fn parse_yaml_entries(content: &[u8]) -> StageResult<Vec<PathUrlEntry>> {
    if is_blank_yaml(content) {
        return Ok(Vec::new());
    }
    serde_yaml::from_slice::<Option<Vec<PathUrlEntry>>>(content)
        .map(Option::unwrap_or_default)
        .map_err(|e| StageError::Parse {
            format: ConfigFormat::Yaml,
            source: Box::new(e),
        })
}

/// Decode a JSON redirect document: `{"redirects": [{path, url}, ...]}`.
pub fn parse_json_entries(content: &[u8]) -> StageResult<Vec<PathUrlEntry>> {
    serde_json::from_slice::<JsonRedirects>(content)
        .map(|doc| doc.redirects)
        .map_err(|e| StageError::Parse {
            format: ConfigFormat::Json,
            source: Box::new(e),
        })
}

/// Build a YAML-backed map stage in front of `fallback`.
pub fn build_yaml_stage(content: &[u8], fallback: ResolverStage) -> StageResult<ResolverStage> {
    let entries = parse_yaml_entries(content)?;
    Ok(ResolverStage::map(
        StageSource::Yaml,
        build_mapping(&entries),
        fallback,
    ))
}

/// Build a JSON-backed map stage in front of `fallback`.
pub fn build_json_stage(content: &[u8], fallback: ResolverStage) -> StageResult<ResolverStage> {
    let entries = parse_json_entries(content)?;
    Ok(ResolverStage::map(
        StageSource::Json,
        build_mapping(&entries),
        fallback,
    ))
}

/// Read `path` through `fs` and build a YAML stage from it.
pub async fn load_yaml_stage<F: FileSystem>(
    fs: &F,
    path: &Path,
    fallback: ResolverStage,
) -> StageResult<ResolverStage> {
    let content = read(fs, path, ConfigFormat::Yaml).await?;
    build_yaml_stage(&content, fallback)
}

/// Read `path` through `fs` and build a JSON stage from it.
pub async fn load_json_stage<F: FileSystem>(
    fs: &F,
    path: &Path,
    fallback: ResolverStage,
) -> StageResult<ResolverStage> {
    let content = read(fs, path, ConfigFormat::Json).await?;
    build_json_stage(&content, fallback)
}

async fn read<F: FileSystem>(fs: &F, path: &Path, format: ConfigFormat) -> StageResult<Vec<u8>> {
    fs.read_file(path).await.map_err(|source| StageError::Read {
        format,
        path: path.display().to_string(),
        source,
    })
}

// Only whitespace and comment lines.
fn is_blank_yaml(content: &[u8]) -> bool {
    content
        .split(|b| *b == b'\n')
        .map(|line| line.trim_ascii())
        .all(|line| line.is_empty() || line.starts_with(b"#"))
}
