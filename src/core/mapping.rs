//! Exact-path redirect tables.
//!
//! A [`RedirectMapping`] is built once from an ordered list of [`PathUrlEntry`]
//! records and is read-only afterwards. Keys are compared byte for byte: no
//! case folding, trailing-slash trimming or percent-decoding is applied.
use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One redirect rule as loaded from configuration.
///
/// Both fields default to the empty string when absent or null in the source
/// document. An empty `url` never redirects; see [`RedirectMapping::lookup`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathUrlEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Read an explicit null (`~`, `null`, or an empty YAML value) as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl PathUrlEntry {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Path to destination URL table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectMapping {
    entries: HashMap<String, String>,
}

impl RedirectMapping {
    /// Number of distinct paths, including ones mapped to an empty URL.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw lookup. Returns empty values as stored.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Lookup used by the resolver: an empty URL counts as no entry.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.get(path).filter(|url| !url.is_empty())
    }

    /// Iterate over `(path, url)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> FromIterator<&'a PathUrlEntry> for RedirectMapping {
    fn from_iter<I: IntoIterator<Item = &'a PathUrlEntry>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for entry in iter {
            // Later duplicates overwrite earlier ones.
            entries.insert(entry.path.clone(), entry.url.clone());
        }
        Self { entries }
    }
}

/// Build a mapping from entries in order. The last entry for a path wins.
pub fn build_mapping(entries: &[PathUrlEntry]) -> RedirectMapping {
    entries.iter().collect()
}
