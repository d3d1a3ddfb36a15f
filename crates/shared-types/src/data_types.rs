//! Common data types used across the system

use crate::errors::SeriesResult;
use crate::series_error;
use serde::{Deserialize, Serialize};

/// One chart sample: x on the selected axis, y or a gap
pub type Point = (f64, Option<f64>);

/// Ordered samples ready for plotting
pub type Series = Vec<Point>;

/// Raw payload of a series record
///
/// Arrays hold the recorded history. Numbers and strings are one-off
/// snapshots that callers display directly instead of plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Array(Vec<Option<f64>>),
    Number(f64),
    Text(String),
}

impl SeriesData {
    pub fn as_array(&self) -> Option<&[Option<f64>]> {
        match self {
            SeriesData::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SeriesData::Array(_) => "array",
            SeriesData::Number(_) => "number",
            SeriesData::Text(_) => "string",
        }
    }
}

/// Run-length correction over the encoded data array
///
/// The encoded value at `index` stands for `size` identical literal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Mutation {
    pub index: usize,
    pub size: usize,
}

impl Mutation {
    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }
}

impl From<(usize, usize)> for Mutation {
    fn from((index, size): (usize, usize)) -> Self {
        Self { index, size }
    }
}

impl From<Mutation> for (usize, usize) {
    fn from(mutation: Mutation) -> Self {
        (mutation.index, mutation.size)
    }
}

/// Check a mutation list against an encoded array of `encoded_len` values
/// and return the decoded length
pub fn decoded_length(encoded_len: usize, mutations: &[Mutation]) -> SeriesResult<usize> {
    let mut total = encoded_len;
    let mut previous: Option<usize> = None;

    for mutation in mutations {
        if mutation.index >= encoded_len {
            return Err(series_error!(MalformedMutations {
                message: format!(
                    "index {} out of bounds for {} encoded values",
                    mutation.index, encoded_len
                )
            }));
        }
        if let Some(prev) = previous {
            if mutation.index <= prev {
                return Err(series_error!(MalformedMutations {
                    message: format!("index {} does not follow index {}", mutation.index, prev)
                }));
            }
        }
        if mutation.size == 0 {
            return Err(series_error!(MalformedMutations {
                message: format!("zero-sized run at index {}", mutation.index)
            }));
        }

        total = total.checked_add(mutation.size - 1).ok_or_else(|| {
            series_error!(MalformedMutations {
                message: format!("run of {} at index {} overflows", mutation.size, mutation.index)
            })
        })?;
        previous = Some(mutation.index);
    }

    Ok(total)
}

/// One metric's recorded history plus decoding metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub data: SeriesData,
    #[serde(rename = "type")]
    pub kind: String,
    pub depth: u32,
    /// Values are multiplied by 10^exp before use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutations: Option<Vec<Mutation>>,
}

impl SeriesRecord {
    pub fn new(data: SeriesData, kind: impl Into<String>, depth: u32) -> Self {
        Self {
            data,
            kind: kind.into(),
            depth,
            exp: None,
            mutations: None,
        }
    }

    pub fn array(kind: impl Into<String>, depth: u32, values: Vec<Option<f64>>) -> Self {
        Self::new(SeriesData::Array(values), kind, depth)
    }

    /// Axis-style record where every sample is present
    pub fn axis(kind: impl Into<String>, values: &[f64]) -> Self {
        Self::array(kind, 0, values.iter().copied().map(Some).collect())
    }

    pub fn with_exp(mut self, exp: i32) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn with_mutations(mut self, mutations: Vec<Mutation>) -> Self {
        self.mutations = Some(mutations);
        self
    }

    pub fn exp(&self) -> i32 {
        self.exp.unwrap_or(0)
    }

    pub fn mutations(&self) -> &[Mutation] {
        self.mutations.as_deref().unwrap_or(&[])
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data, SeriesData::Array(_))
    }

    /// Number of literal samples once mutations are resolved
    pub fn decoded_len(&self) -> SeriesResult<usize> {
        let values = self
            .data
            .as_array()
            .ok_or_else(|| {
                series_error!(InvalidFormat {
                    expected: "array",
                    actual: self.data.kind()
                })
            })?;
        decoded_length(values.len(), self.mutations())
    }
}
