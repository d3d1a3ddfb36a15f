//! Nested series tree sharing one time axis
//!
//! A tree maps metric names either to terminal [`SeriesRecord`]s or to further
//! trees. The reserved root keys `timeStamp` and `gameTime` hold the axis
//! records every other array record is index-aligned against. Inner key sets
//! (rooms, sources) are dynamic, so every listing helper sorts its output
//! instead of relying on map order.

use crate::chart_config::AxisKind;
use crate::data_types::SeriesRecord;
use crate::errors::{SeriesError, SeriesResult};
use crate::series_error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Path segment matching every key at its level
pub const WILDCARD: &str = "*";

/// Dotted path of keys from the tree root to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MetricPath(Vec<String>);

impl MetricPath {
    /// Split a dotted path such as `roomData.W1N1.controllerProgress`
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }
        Self(path.split('.').map(str::to_string).collect())
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New path one level deeper
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn has_wildcard(&self) -> bool {
        self.0.iter().any(|segment| segment == WILDCARD)
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for MetricPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for MetricPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for MetricPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<MetricPath> for String {
    fn from(path: MetricPath) -> Self {
        path.to_string()
    }
}

impl From<&[&str]> for MetricPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}

/// Either a terminal record or a nested category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesNode {
    Record(SeriesRecord),
    Branch(SeriesTree),
}

impl SeriesNode {
    pub fn as_record(&self) -> Option<&SeriesRecord> {
        match self {
            SeriesNode::Record(record) => Some(record),
            SeriesNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&SeriesTree> {
        match self {
            SeriesNode::Branch(tree) => Some(tree),
            SeriesNode::Record(_) => None,
        }
    }
}

impl From<SeriesRecord> for SeriesNode {
    fn from(record: SeriesRecord) -> Self {
        SeriesNode::Record(record)
    }
}

impl From<SeriesTree> for SeriesNode {
    fn from(tree: SeriesTree) -> Self {
        SeriesNode::Branch(tree)
    }
}

/// Mapping of metric name to record or nested tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesTree {
    nodes: HashMap<String, SeriesNode>,
}

impl SeriesTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion used while assembling a snapshot
    pub fn with(mut self, key: impl Into<String>, node: impl Into<SeriesNode>) -> Self {
        self.insert(key, node);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<SeriesNode>) {
        self.nodes.insert(key.into(), node.into());
    }

    pub fn get(&self, key: &str) -> Option<&SeriesNode> {
        self.nodes.get(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sorted keys of this level
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Walk `path` down to whatever node it names
    pub fn resolve_node(&self, path: &MetricPath) -> SeriesResult<&SeriesNode> {
        let not_found = || SeriesError::PathNotFound {
            path: path.to_string(),
        };

        let (first, rest) = path.segments().split_first().ok_or_else(not_found)?;
        let mut node = self.nodes.get(first).ok_or_else(not_found)?;

        for segment in rest {
            node = match node {
                SeriesNode::Branch(tree) => tree.nodes.get(segment).ok_or_else(not_found)?,
                SeriesNode::Record(_) => return Err(not_found()),
            };
        }

        Ok(node)
    }

    /// Resolve `path` to a terminal record
    pub fn resolve(&self, path: &MetricPath) -> SeriesResult<&SeriesRecord> {
        self.resolve_node(path)?
            .as_record()
            .ok_or_else(|| series_error!(NotARecord { path: path.to_string() }))
    }

    /// Sorted child keys of the nested tree at `path`; the empty path lists
    /// the root
    pub fn children(&self, path: &MetricPath) -> SeriesResult<Vec<&str>> {
        if path.is_empty() {
            return Ok(self.keys());
        }

        self.resolve_node(path)?
            .as_branch()
            .map(SeriesTree::keys)
            .ok_or_else(|| series_error!(NotABranch { path: path.to_string() }))
    }

    /// Expand `*` segments against the keys present in this tree
    ///
    /// Only paths that exist are returned, sorted. A pattern without
    /// wildcards yields itself when it resolves.
    pub fn expand(&self, pattern: &MetricPath) -> Vec<MetricPath> {
        let mut matches = Vec::new();
        if !pattern.is_empty() {
            self.expand_into(pattern.segments(), MetricPath::default(), &mut matches);
        }
        matches.sort();
        matches
    }

    fn expand_into(&self, segments: &[String], prefix: MetricPath, out: &mut Vec<MetricPath>) {
        let Some((segment, rest)) = segments.split_first() else {
            return;
        };

        let candidates: Vec<(&String, &SeriesNode)> = if segment == WILDCARD {
            self.nodes.iter().collect()
        } else {
            self.nodes.get_key_value(segment).into_iter().collect()
        };

        for (key, node) in candidates {
            let path = prefix.child(key);
            if rest.is_empty() {
                out.push(path);
            } else if let SeriesNode::Branch(tree) = node {
                tree.expand_into(rest, path, out);
            }
        }
    }

    /// Every terminal record with its full path, sorted by path
    pub fn records(&self) -> Vec<(MetricPath, &SeriesRecord)> {
        let mut records = Vec::new();
        self.collect_records(MetricPath::default(), &mut records);
        records.sort_by(|a, b| a.0.cmp(&b.0));
        records
    }

    fn collect_records<'a>(
        &'a self,
        prefix: MetricPath,
        out: &mut Vec<(MetricPath, &'a SeriesRecord)>,
    ) {
        for (key, node) in &self.nodes {
            let path = prefix.child(key);
            match node {
                SeriesNode::Record(record) => out.push((path, record)),
                SeriesNode::Branch(tree) => tree.collect_records(path, out),
            }
        }
    }

    /// Root axis record for `kind`
    pub fn axis(&self, kind: AxisKind) -> SeriesResult<&SeriesRecord> {
        self.nodes
            .get(kind.key())
            .and_then(SeriesNode::as_record)
            .ok_or_else(|| series_error!(MissingAxis { key: kind.key() }))
    }

    /// Canonical sample count, taken from `timeStamp` or else `gameTime`
    pub fn sample_count(&self) -> SeriesResult<usize> {
        self.axis(AxisKind::Time)
            .or_else(|_| self.axis(AxisKind::Tick))?
            .decoded_len()
    }

    /// Check that every array record decodes to the canonical sample count
    ///
    /// Number and string snapshots are not index-aligned and are skipped.
    pub fn validate(&self) -> SeriesResult<()> {
        let expected = self.sample_count()?;
        let mut errors = Vec::new();

        for (path, record) in self.records() {
            if !record.is_array() {
                continue;
            }
            match record.decoded_len() {
                Ok(actual) if actual == expected => {}
                Ok(actual) => errors.push(format!(
                    "{path}: {}",
                    SeriesError::LengthMismatch { expected, actual }
                )),
                Err(err) => errors.push(format!("{path}: {err}")),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SeriesError::Validation { errors })
        }
    }
}
