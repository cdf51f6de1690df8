//! urlshort - path-based HTTP redirects from layered lookup tables.
//!
//! Every request path is resolved against a chain of stages. Each stage holds
//! an exact-match table of path to destination URL and owns the stage it falls
//! back to when it has no answer:
//!
//! ```text
//! JSON file (optional) -> YAML file (optional) -> inline table -> default response
//! ```
//!
//! A hit produces `308 Permanent Redirect` with the URL in `Location`. A path
//! that no table answers reaches the terminal stage, which serves a fixed body.
//!
//! # Quick Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use urlshort::{ChainBuilder, FileSystemAdapter, PathUrlEntry, RedirectHandler};
//!
//! # #[tokio::main] async fn main() -> eyre::Result<()> {
//! let chain = ChainBuilder::new()
//!     .static_entries([PathUrlEntry::new("/gh", "https://github.com")])
//!     .yaml_file(Some("redirects.yaml"))
//!     .build(&FileSystemAdapter::new())
//!     .await?;
//! let app = RedirectHandler::new(Arc::new(chain)).into_router();
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(()) }
//! ```
//!
//! # Matching
//! Paths are compared exactly as received. Case, trailing slashes and
//! percent-encoding all matter, and there is no prefix or wildcard matching.
//! A table entry whose URL is the empty string behaves as if it were absent.
//!
//! # Architecture
//! `core` is pure: it builds and walks the chain and never performs I/O or
//! logs. Reading redirect files goes through the [`ports::file_system::FileSystem`]
//! port, implemented by [`FileSystemAdapter`]. The HTTP surface lives in
//! [`adapters::http_handler`].
//!
//! # Error Handling
//! Chain construction returns [`core::StageError`], distinguishing unreadable
//! files from malformed ones. Application-level APIs return `eyre::Result<T>`
//! with context attached using `WrapErr`.
pub mod config;
pub mod ports;
pub mod tracing_setup;
pub mod utils;

pub mod adapters;
pub mod core;

// Re-export the specific types needed by the binary crate
pub use crate::{
    adapters::{FileSystemAdapter, RedirectHandler},
    core::{ChainBuilder, PathUrlEntry, Resolution, ResolverStage, StageError},
    utils::GracefulShutdown,
};
