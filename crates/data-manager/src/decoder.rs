//! Decoding series records into plottable `(x, y)` arrays

use crate::compression::decode_runs;
use log::trace;
use stats_charts_shared::{series_error, Point, Series, SeriesError, SeriesRecord, SeriesResult};

/// Literal, exponent-scaled values of an array record
///
/// Mutations are expanded before scaling; nulls stay null.
pub fn decode_values(record: &SeriesRecord) -> SeriesResult<Vec<Option<f64>>> {
    let raw = record.data.as_array().ok_or_else(|| {
        series_error!(InvalidFormat {
            expected: "array",
            actual: record.data.kind()
        })
    })?;

    let literal = decode_runs(raw, record.mutations())?;
    let exp = record.exp();
    if exp == 0 {
        return Ok(literal);
    }

    trace!("scaling {} values by 10^{}", literal.len(), exp);
    Ok(literal
        .into_iter()
        .map(|value| value.map(|y| scale(y, exp)))
        .collect())
}

/// Values of an axis record; every sample must be present
pub fn decode_axis(record: &SeriesRecord) -> SeriesResult<Vec<f64>> {
    decode_values(record)?
        .into_iter()
        .enumerate()
        .map(|(index, value)| value.ok_or(SeriesError::AxisValueMissing { index }))
        .collect()
}

/// Pair each decoded value with the axis value at the same index
pub fn decode_series(record: &SeriesRecord, axis: &SeriesRecord) -> SeriesResult<Series> {
    let xs = decode_axis(axis)?;
    check_length(record, xs.len())?;
    let ys = decode_values(record)?;
    zip_axis(&xs, &ys)
}

/// Compare the decoded length of `record` with the axis length without
/// expanding any runs
pub fn check_length(record: &SeriesRecord, expected: usize) -> SeriesResult<()> {
    let actual = record.decoded_len()?;
    if actual != expected {
        return Err(SeriesError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Build a series from already decoded axis and values
pub fn zip_axis(xs: &[f64], ys: &[Option<f64>]) -> SeriesResult<Series> {
    if xs.len() != ys.len() {
        return Err(SeriesError::LengthMismatch {
            expected: xs.len(),
            actual: ys.len(),
        });
    }

    Ok(xs.iter().copied().zip(ys.iter().copied()).collect::<Vec<Point>>())
}

// Dividing for negative exponents keeps values like 12e-1 exact.
fn scale(value: f64, exp: i32) -> f64 {
    if exp < 0 {
        value / 10f64.powi(-exp)
    } else {
        value * 10f64.powi(exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stats_charts_shared::{Mutation, SeriesData};

    fn axis(values: &[f64]) -> SeriesRecord {
        SeriesRecord::axis("time", values)
    }

    #[test]
    fn test_decode_series_pairs_with_axis() {
        let record = SeriesRecord::array("number", 1, vec![Some(1.0), None, Some(3.0)]);
        let series = decode_series(&record, &axis(&[10.0, 20.0, 30.0])).unwrap();

        assert_eq!(series, vec![(10.0, Some(1.0)), (20.0, None), (30.0, Some(3.0))]);
    }

    #[test]
    fn test_exponent_scaling() {
        let up = SeriesRecord::array("number", 1, vec![Some(3.0), None]).with_exp(2);
        let down = SeriesRecord::array("number", 1, vec![Some(12.0)]).with_exp(-1);

        assert_eq!(decode_values(&up).unwrap(), vec![Some(300.0), None]);
        assert_eq!(decode_values(&down).unwrap(), vec![Some(1.2)]);
    }

    #[test]
    fn test_mutations_resolved_before_scaling() {
        let record = SeriesRecord::array("number", 1, vec![Some(2.0), None])
            .with_exp(1)
            .with_mutations(vec![Mutation::new(0, 2), Mutation::new(1, 2)]);

        let series = decode_series(&record, &axis(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(
            series,
            vec![(1.0, Some(20.0)), (2.0, Some(20.0)), (3.0, None), (4.0, None)]
        );
    }

    #[test]
    fn test_encoded_axis() {
        let tick_axis = SeriesRecord::axis("tick", &[5.0, 6.0]).with_mutations(vec![Mutation::new(1, 3)]);
        assert_eq!(decode_axis(&tick_axis).unwrap(), vec![5.0, 6.0, 6.0, 6.0]);
    }

    #[test]
    fn test_length_mismatch_is_reported() {
        let record = SeriesRecord::array("number", 1, vec![Some(1.0), Some(2.0)]);
        let result = decode_series(&record, &axis(&[1.0, 2.0, 3.0]));

        assert_eq!(
            result.unwrap_err(),
            SeriesError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_oversized_runs_fail_before_expanding() {
        let record = SeriesRecord::array("number", 1, vec![Some(1.0), Some(2.0)])
            .with_mutations(vec![Mutation::new(1, 1 << 40)]);

        let result = decode_series(&record, &axis(&[1.0, 2.0, 3.0]));
        assert_eq!(
            result.unwrap_err(),
            SeriesError::LengthMismatch {
                expected: 3,
                actual: (1 << 40) + 1
            }
        );
    }

    #[test]
    fn test_scalar_records_cannot_be_plotted() {
        let record = SeriesRecord::new(SeriesData::Number(4.0), "number", 1);
        let result = decode_series(&record, &axis(&[1.0]));

        assert!(matches!(result, Err(SeriesError::InvalidFormat { .. })));
    }

    #[test]
    fn test_axis_gap_is_reported() {
        let broken = SeriesRecord::array("time", 0, vec![Some(1.0), None]);
        assert_eq!(
            decode_axis(&broken).unwrap_err(),
            SeriesError::AxisValueMissing { index: 1 }
        );
    }
}
