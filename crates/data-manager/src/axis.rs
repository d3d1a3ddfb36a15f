//! Swapping a series onto an alternate x-axis

use log::debug;
use stats_charts_shared::{Point, Series};

/// Replace x-values index-wise with `replacement`
///
/// When the lengths differ the alternate axis is not populated for this
/// snapshot yet and the series comes back unchanged.
pub fn remap_axis(series: &[Point], replacement: &[f64]) -> Series {
    if replacement.len() != series.len() {
        debug!(
            "skipping axis remap: {} replacement values for {} samples",
            replacement.len(),
            series.len()
        );
        return series.to_vec();
    }

    series
        .iter()
        .zip(replacement)
        .map(|(&(_, y), &x)| (x, y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Series {
        vec![(1000.0, Some(1.0)), (2000.0, None), (3000.0, Some(3.0))]
    }

    #[test]
    fn test_remap_keeps_values() {
        let remapped = remap_axis(&series(), &[7.0, 8.0, 9.0]);
        assert_eq!(remapped, vec![(7.0, Some(1.0)), (8.0, None), (9.0, Some(3.0))]);
    }

    #[test]
    fn test_remap_falls_back_on_length_mismatch() {
        assert_eq!(remap_axis(&series(), &[7.0, 8.0]), series());
        assert_eq!(remap_axis(&series(), &[]), series());
    }

    #[test]
    fn test_remap_empty_series() {
        assert!(remap_axis(&[], &[]).is_empty());
    }
}
