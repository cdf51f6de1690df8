//! Layered redirect resolution.
//!
//! A chain is a [`ResolverStage`] value: zero or more [`MapStage`] layers, each
//! owning its fallback, ending in a single [`TerminalStage`]. The chain is
//! immutable once built and can be shared across request tasks behind an
//! `Arc` without locking.
//!
//! Resolution walks outermost to innermost. A stage answers with
//! [`Action::Redirect`] when its table holds a non-empty URL for the exact
//! request path, and with [`Action::Delegate`] otherwise, handing the path to
//! its fallback. The terminal stage never delegates.
use std::fmt;

use crate::core::mapping::RedirectMapping;

/// Body served by the terminal stage when no configuration overrides it.
pub const DEFAULT_RESPONSE: &str = "Hello, world!\n";

/// Which configuration layer a map stage was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageSource {
    Static,
    Yaml,
    Json,
}

impl fmt::Display for StageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageSource::Static => f.write_str("static"),
            StageSource::Yaml => f.write_str("yaml"),
            StageSource::Json => f.write_str("json"),
        }
    }
}

/// Outcome of a single stage lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Permanent redirect to the given URL.
    Redirect(&'a str),
    /// No usable entry here; consult the fallback.
    Delegate,
}

/// Outcome of resolving a path against a whole chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Redirect { url: &'a str, source: StageSource },
    Terminal(&'a TerminalStage),
}

impl<'a> Resolution<'a> {
    pub fn redirect_url(&self) -> Option<&'a str> {
        match self {
            Resolution::Redirect { url, .. } => Some(*url),
            Resolution::Terminal(_) => None,
        }
    }
}

/// Innermost stage: always answers with a fixed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalStage {
    body: String,
}

impl TerminalStage {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Default for TerminalStage {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE)
    }
}

/// A redirect table plus the stage consulted when it has no answer.
#[derive(Debug)]
pub struct MapStage {
    source: StageSource,
    mapping: RedirectMapping,
    fallback: Box<ResolverStage>,
}

impl MapStage {
    pub fn new(source: StageSource, mapping: RedirectMapping, fallback: ResolverStage) -> Self {
        Self {
            source,
            mapping,
            fallback: Box::new(fallback),
        }
    }

    /// Look the exact path up in this stage only.
    pub fn action(&self, path: &str) -> Action<'_> {
        match self.mapping.lookup(path) {
            Some(url) => Action::Redirect(url),
            None => Action::Delegate,
        }
    }

    pub fn source(&self) -> StageSource {
        self.source
    }

    pub fn mapping(&self) -> &RedirectMapping {
        &self.mapping
    }

    pub fn fallback(&self) -> &ResolverStage {
        &self.fallback
    }
}

#[derive(Debug)]
pub enum ResolverStage {
    Map(MapStage),
    Terminal(TerminalStage),
}

impl ResolverStage {
    pub fn terminal(body: impl Into<String>) -> Self {
        ResolverStage::Terminal(TerminalStage::new(body))
    }

    /// Wrap `fallback` in a new outer map stage.
    pub fn map(source: StageSource, mapping: RedirectMapping, fallback: ResolverStage) -> Self {
        ResolverStage::Map(MapStage::new(source, mapping, fallback))
    }

    /// Resolve a request path against this stage and everything behind it.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        let mut stage = self;
        loop {
            match stage {
                ResolverStage::Map(map) => match map.action(path) {
                    Action::Redirect(url) => {
                        return Resolution::Redirect {
                            url,
                            source: map.source,
                        };
                    }
                    Action::Delegate => stage = map.fallback(),
                },
                ResolverStage::Terminal(terminal) => return Resolution::Terminal(terminal),
            }
        }
    }

    /// Stages from outermost to the terminal.
    pub fn stages(&self) -> Stages<'_> {
        Stages { next: Some(self) }
    }

    /// Number of stages including the terminal one.
    pub fn depth(&self) -> usize {
        self.stages().count()
    }
}

impl Default for ResolverStage {
    fn default() -> Self {
        ResolverStage::Terminal(TerminalStage::default())
    }
}

/// Iterator returned by [`ResolverStage::stages`].
pub struct Stages<'a> {
    next: Option<&'a ResolverStage>,
}

impl<'a> Iterator for Stages<'a> {
    type Item = &'a ResolverStage;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = match current {
            ResolverStage::Map(map) => Some(map.fallback()),
            ResolverStage::Terminal(_) => None,
        };
        Some(current)
    }
}
