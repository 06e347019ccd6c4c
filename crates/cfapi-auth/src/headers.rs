//! Header name/value mapping shared by auth providers and the adapter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping of header name to header value.
///
/// Names are unique ignoring ASCII case: setting `AUTHORIZATION` replaces
/// `Authorization`, and the most recent spelling is kept. Iteration is
/// sorted by name so the rendered header block is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let existing = self
            .0
            .keys()
            .find(|k| k.eq_ignore_ascii_case(&name))
            .cloned();
        let old = existing.and_then(|k| self.0.remove(&k));
        self.0.insert(name, value.into());
        old
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a header by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Look up a header ignoring ASCII case.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether a header with this name is present, ignoring ASCII case.
    pub fn contains(&self, name: &str) -> bool {
        self.get_ignore_case(name).is_some()
    }

    /// Merge `other` into `self`. Values from `other` win on name clashes.
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in &other.0 {
            self.insert(name.clone(), value.clone());
        }
    }

    /// Return a new mapping with `other` merged over `self`.
    pub fn merged(&self, other: &Headers) -> Headers {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render each entry as a `Name: Value` line.
    pub fn lines(&self) -> Vec<String> {
        self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for Headers {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Headers> for BTreeMap<String, String> {
    fn from(headers: Headers) -> Self {
        headers.0
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
