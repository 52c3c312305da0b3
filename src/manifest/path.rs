//! Dotted-path lookups into a parsed manifest
//!
//! Works like Clojure's `get-in`: each segment indexes a mapping by key or,
//! when the current node is a sequence, by its integer value. Any dead end
//! yields `None` rather than an error so callers decide whether absence
//! matters.

use serde_yaml_ng::Value;
use std::fmt;

use crate::{GenerateError, Result};

/// A path into a manifest such as `properties.etcd.machines.0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPath {
    segments: Vec<String>,
}

impl ManifestPath {
    /// Build a path from its segments
    pub fn new<S: AsRef<str>>(segments: &[S]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Parse a dotted path
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Extend this path with one more segment
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ManifestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for ManifestPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

/// Walk `path` from `root`, returning `None` at the first dead end
///
/// An explicit YAML `null` is treated the same as an absent key.
pub fn lookup<'a>(root: &'a Value, path: &ManifestPath) -> Option<&'a Value> {
    let mut current = untag(root);
    for segment in &path.segments {
        current = match current {
            Value::Mapping(map) => untag(map.get(segment.as_str())?),
            Value::Sequence(seq) => untag(seq.get(segment.parse::<usize>().ok()?)?),
            _ => return None,
        };
    }
    match current {
        Value::Null => None,
        value => Some(value),
    }
}

fn untag(mut value: &Value) -> &Value {
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

/// Render a scalar node as text
///
/// Strings pass through untouched; numbers and booleans use their natural
/// textual form. Containers and null have no scalar form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Look up a scalar that may be absent
///
/// Absence is `Ok(None)`; a container where a scalar belongs is an error.
pub fn optional_scalar(root: &Value, path: &ManifestPath) -> Result<Option<String>> {
    match lookup(root, path) {
        None => Ok(None),
        Some(value) => scalar_to_string(value)
            .map(Some)
            .ok_or_else(|| GenerateError::InvalidField {
                path: path.to_string(),
                expected: "a scalar value",
            }),
    }
}

/// Look up a scalar that must be present
pub fn required_scalar(root: &Value, path: &ManifestPath) -> Result<String> {
    optional_scalar(root, path)?.ok_or_else(|| GenerateError::missing(path.to_string()))
}

/// Look up a sequence of scalars that must be present
pub fn required_scalar_list(root: &Value, path: &ManifestPath) -> Result<Vec<String>> {
    let value = lookup(root, path).ok_or_else(|| GenerateError::missing(path.to_string()))?;
    let Value::Sequence(items) = value else {
        return Err(GenerateError::InvalidField {
            path: path.to_string(),
            expected: "a list",
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            scalar_to_string(item).ok_or_else(|| GenerateError::InvalidField {
                path: path.join(i.to_string()).to_string(),
                expected: "a scalar value",
            })
        })
        .collect()
}

/// Look up a sequence that may be absent, yielding its items
pub fn optional_sequence<'a>(root: &'a Value, path: &ManifestPath) -> &'a [Value] {
    match lookup(root, path) {
        Some(Value::Sequence(items)) => items.as_slice(),
        _ => &[],
    }
}
