//! Run-length support for mutation-encoded series
//!
//! Records may ship their `data` array compressed: each `(index, size)`
//! mutation marks an encoded value that stands for `size` identical literal
//! values. Decoding must be lossless, so runs are detected by bit pattern and
//! nulls compress like any other value.

use stats_charts_shared::{decoded_length, series_error, Mutation, SeriesResult};

/// Encoder configuration
#[derive(Debug, Clone, Copy)]
pub struct RunLengthConfig {
    /// Shortest run worth a mutation entry
    pub min_run: usize,
}

impl Default for RunLengthConfig {
    fn default() -> Self {
        Self { min_run: 2 }
    }
}

/// Literal values plus the mutations needed to rebuild them
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedValues {
    pub data: Vec<Option<f64>>,
    pub mutations: Vec<Mutation>,
}

/// Run-length encoder/decoder
pub struct RunLengthCodec {
    config: RunLengthConfig,
}

impl Default for RunLengthCodec {
    fn default() -> Self {
        Self::new(RunLengthConfig::default())
    }
}

impl RunLengthCodec {
    pub fn new(config: RunLengthConfig) -> Self {
        Self { config }
    }

    /// Collapse runs of identical values into single encoded entries
    pub fn encode(&self, values: &[Option<f64>]) -> EncodedValues {
        let min_run = self.config.min_run.max(2);
        let mut data = Vec::with_capacity(values.len());
        let mut mutations = Vec::new();

        let mut start = 0;
        while start < values.len() {
            let value = values[start];
            let mut end = start + 1;
            while end < values.len() && same_bits(values[end], value) {
                end += 1;
            }

            let run = end - start;
            if run >= min_run {
                mutations.push(Mutation::new(data.len(), run));
                data.push(value);
            } else {
                data.extend_from_slice(&values[start..end]);
            }
            start = end;
        }

        EncodedValues { data, mutations }
    }
}

/// Expand `data` according to `mutations`
///
/// Fails when the mutation list is out of order, out of bounds, contains an
/// empty run, or expands to more values than can be allocated.
pub fn decode_runs(data: &[Option<f64>], mutations: &[Mutation]) -> SeriesResult<Vec<Option<f64>>> {
    if mutations.is_empty() {
        return Ok(data.to_vec());
    }

    let total = decoded_length(data.len(), mutations)?;
    let mut output: Vec<Option<f64>> = Vec::new();
    output.try_reserve_exact(total).map_err(|err| {
        series_error!(MalformedMutations {
            message: format!("cannot expand to {} values: {}", total, err)
        })
    })?;
    let mut runs = mutations.iter().peekable();

    for (index, value) in data.iter().enumerate() {
        match runs.peek() {
            Some(run) if run.index == index => {
                output.extend(std::iter::repeat(*value).take(run.size));
                runs.next();
            }
            _ => output.push(*value),
        }
    }

    debug_assert_eq!(output.len(), total);
    Ok(output)
}

fn same_bits(a: Option<f64>, b: Option<f64>) -> bool {
    a.map(f64::to_bits) == b.map(f64::to_bits)
}
