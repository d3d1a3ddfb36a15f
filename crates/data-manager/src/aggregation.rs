//! Sliding-window aggregation for chart smoothing
//!
//! Every output sample `i` combines the non-null inputs whose x lies in the
//! half-open window `(x_i - interval, x_i]`. Inputs must be sorted by x, which
//! holds for captured snapshots because samples are appended in order. Both
//! window edges only ever move forward. Totals grow incrementally and are
//! rebuilt from the window whenever a non-null sample leaves it, which keeps
//! every output equal to a fresh sum over its window.

use crate::axis::remap_axis;
use log::{debug, trace};
use stats_charts_shared::{AggregationMode, Point, Series};

/// Combine each sample with the samples of its trailing window
///
/// Passthrough mode, an absent or non-positive interval, and an empty series
/// all return the input unchanged. A window without any non-null sample
/// yields `None` in every mode.
pub fn aggregate(series: &[Point], interval: Option<f64>, mode: AggregationMode) -> Series {
    let (Some(reducer), Some(interval)) = (Reducer::for_mode(mode), active_interval(interval))
    else {
        return series.to_vec();
    };
    if series.is_empty() {
        return Vec::new();
    }

    trace!(
        "aggregating {} samples over interval {} ({})",
        series.len(),
        interval,
        mode
    );
    reduce_windows(series, interval, reducer)
}

/// Aggregate with windows measured on `window_x` while keeping the series' own
/// x-values in the output
///
/// This lets a chart plotted against wall-clock time smooth over a fixed
/// number of ticks. If `window_x` does not line up with the series the
/// series' own x-values are used for the windows.
pub fn aggregate_on_axis(
    series: &[Point],
    interval: Option<f64>,
    mode: AggregationMode,
    window_x: &[f64],
) -> Series {
    if window_x.len() != series.len() {
        debug!(
            "window axis has {} values for {} samples, using plotted axis",
            window_x.len(),
            series.len()
        );
        return aggregate(series, interval, mode);
    }

    let windowed = aggregate(&remap_axis(series, window_x), interval, mode);
    series
        .iter()
        .zip(windowed)
        .map(|(&(x, _), (_, y))| (x, y))
        .collect()
}

fn active_interval(interval: Option<f64>) -> Option<f64> {
    interval.filter(|interval| *interval > 0.0)
}

#[derive(Debug, Clone, Copy)]
enum Reducer {
    Sum,
    Average,
}

impl Reducer {
    fn for_mode(mode: AggregationMode) -> Option<Self> {
        match mode {
            AggregationMode::Sum => Some(Reducer::Sum),
            AggregationMode::Average => Some(Reducer::Average),
            AggregationMode::Passthrough => None,
        }
    }
}

/// Totals over the non-null samples currently inside the window
///
/// The sum is always the in-order sum of exactly those samples. Samples are
/// only ever added on the right; when one leaves on the left the total is
/// rebuilt from the remaining window, so large or non-finite values that have
/// left cannot leak into later windows.
#[derive(Debug, Default)]
struct WindowTotals {
    sum: f64,
    count: usize,
}

impl WindowTotals {
    fn enter(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn refill(&mut self, window: &[Point]) {
        *self = Self::default();
        for &(_, value) in window {
            self.enter(value);
        }
    }

    fn value(&self, reducer: Reducer) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(match reducer {
            Reducer::Sum => self.sum,
            Reducer::Average => self.sum / self.count as f64,
        })
    }
}

fn reduce_windows(series: &[Point], interval: f64, reducer: Reducer) -> Series {
    let len = series.len();
    let mut output = Vec::with_capacity(len);
    let mut totals = WindowTotals::default();
    let mut left = 0;
    let mut right = 0;

    for (i, &(x, _)) in series.iter().enumerate() {
        let window_start = x - interval;

        let mut evicted = false;
        while left < i && series[left].0 <= window_start {
            evicted |= series[left].1.is_some();
            left += 1;
        }
        if evicted {
            totals.refill(&series[left..right]);
        }

        // Pull in everything up to and including x, ties after i as well.
        while right < len && (right <= i || series[right].0 <= x) {
            totals.enter(series[right].1);
            right += 1;
        }

        output.push((x, totals.value(reducer)));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn brute_force(series: &[Point], interval: f64, mode: AggregationMode) -> Series {
        series
            .iter()
            .map(|&(x, _)| {
                let window_start = x - interval;
                let values: Vec<f64> = series
                    .iter()
                    .filter(|(xj, _)| *xj > window_start && *xj <= x)
                    .filter_map(|(_, y)| *y)
                    .collect();
                if values.is_empty() {
                    return (x, None);
                }
                let sum = values.iter().fold(0.0, |acc, y| acc + y);
                match mode {
                    AggregationMode::Average => (x, Some(sum / values.len() as f64)),
                    _ => (x, Some(sum)),
                }
            })
            .collect()
    }

    fn random_series(rng: &mut SmallRng, len: usize) -> Series {
        let mut x = rng.gen_range(-50..50) as f64;
        (0..len)
            .map(|_| {
                // Steps of zero produce duplicate x values.
                x += rng.gen_range(0..4) as f64 * 0.5;
                // Mixed magnitudes make cancellation errors visible.
                let y = if rng.gen_bool(0.3) {
                    None
                } else {
                    let magnitude = 10f64.powi(rng.gen_range(-3..18));
                    Some(rng.gen_range(-1.0..1.0) * magnitude)
                };
                (x, y)
            })
            .collect()
    }

    #[test]
    fn test_identity_cases() {
        let series = vec![(0.0, Some(1.0)), (1.0, None), (2.0, Some(3.0))];

        for interval in [None, Some(0.0), Some(5.0), Some(-1.0), Some(f64::NAN)] {
            assert_eq!(aggregate(&series, interval, AggregationMode::Passthrough), series);
        }
        for mode in [AggregationMode::Sum, AggregationMode::Average] {
            assert_eq!(aggregate(&series, None, mode), series);
            assert_eq!(aggregate(&series, Some(0.0), mode), series);
            assert!(aggregate(&[], Some(3.0), mode).is_empty());
        }
    }

    #[test]
    fn test_average_of_constant_series() {
        let series = vec![(0.0, Some(10.0)), (1.0, Some(10.0)), (2.0, Some(10.0))];
        assert_eq!(aggregate(&series, Some(2.0), AggregationMode::Average), series);
    }

    #[test]
    fn test_sum_and_average_skip_nulls() {
        let series = vec![(0.0, Some(2.0)), (1.0, Some(4.0)), (2.0, None), (3.0, Some(6.0))];

        let sum = aggregate(&series, Some(3.0), AggregationMode::Sum);
        assert_eq!(
            sum,
            vec![(0.0, Some(2.0)), (1.0, Some(6.0)), (2.0, Some(6.0)), (3.0, Some(10.0))]
        );

        let average = aggregate(&series, Some(3.0), AggregationMode::Average);
        assert_eq!(
            average,
            vec![(0.0, Some(2.0)), (1.0, Some(3.0)), (2.0, Some(3.0)), (3.0, Some(5.0))]
        );
    }

    #[test]
    fn test_empty_windows_are_gaps_not_zero() {
        let series = vec![(0.0, None), (1.0, None), (5.0, Some(1.0)), (9.0, None)];

        for mode in [AggregationMode::Sum, AggregationMode::Average] {
            let result = aggregate(&series, Some(2.0), mode);
            assert_eq!(
                result,
                vec![(0.0, None), (1.0, None), (5.0, Some(1.0)), (9.0, None)]
            );
        }
    }

    #[test]
    fn test_known_zero_is_not_a_gap() {
        let series = vec![(0.0, Some(0.0)), (1.0, None)];
        let result = aggregate(&series, Some(1.0), AggregationMode::Sum);
        assert_eq!(result, vec![(0.0, Some(0.0)), (1.0, None)]);
    }

    #[test]
    fn test_duplicate_x_share_a_window() {
        let series = vec![(0.0, Some(1.0)), (1.0, Some(2.0)), (1.0, Some(3.0)), (2.0, Some(4.0))];

        let sum = aggregate(&series, Some(1.0), AggregationMode::Sum);
        assert_eq!(
            sum,
            vec![(0.0, Some(1.0)), (1.0, Some(5.0)), (1.0, Some(5.0)), (2.0, Some(4.0))]
        );

        let average = aggregate(&series, Some(1.0), AggregationMode::Average);
        assert_eq!(average[1], (1.0, Some(2.5)));
        assert_eq!(average[2], (1.0, Some(2.5)));
    }

    #[test]
    fn test_interval_wider_than_range_expands() {
        let series = vec![(0.0, Some(1.0)), (1.0, Some(2.0)), (2.0, None), (3.0, Some(3.0))];
        let sum = aggregate(&series, Some(1000.0), AggregationMode::Sum);

        assert_eq!(
            sum,
            vec![(0.0, Some(1.0)), (1.0, Some(3.0)), (2.0, Some(3.0)), (3.0, Some(6.0))]
        );
    }

    #[test]
    fn test_large_values_do_not_linger_after_leaving() {
        let series = vec![(0.0, Some(1e17)), (1.0, Some(1.0)), (2.0, Some(1.0))];

        let sum = aggregate(&series, Some(1.5), AggregationMode::Sum);
        assert_eq!(sum, vec![(0.0, Some(1e17)), (1.0, Some(1e17 + 1.0)), (2.0, Some(2.0))]);

        let average = aggregate(&series, Some(1.5), AggregationMode::Average);
        assert_eq!(average[2], (2.0, Some(1.0)));
    }

    #[test]
    fn test_non_finite_values_only_affect_their_windows() {
        let series = vec![(0.0, Some(f64::INFINITY)), (1.0, Some(1.5)), (2.0, Some(2.25))];
        let sum = aggregate(&series, Some(1.5), AggregationMode::Sum);
        assert_eq!(
            sum,
            vec![(0.0, Some(f64::INFINITY)), (1.0, Some(f64::INFINITY)), (2.0, Some(3.75))]
        );

        let series = vec![(0.0, Some(f64::NAN)), (1.0, Some(1.0)), (2.0, Some(0.5)), (3.0, None)];
        let average = aggregate(&series, Some(1.5), AggregationMode::Average);
        assert!(average[0].1.unwrap().is_nan());
        assert!(average[1].1.unwrap().is_nan());
        assert_eq!(average[2], (2.0, Some(0.75)));
        assert_eq!(average[3], (3.0, Some(0.5)));
    }

    #[test]
    fn test_matches_brute_force_on_random_series() {
        let mut rng = SmallRng::seed_from_u64(0x5eed_c0de);

        for _ in 0..200 {
            let len = rng.gen_range(0..80);
            let series = random_series(&mut rng, len);
            let interval = rng.gen_range(1..20) as f64 * 0.5;

            for mode in [AggregationMode::Sum, AggregationMode::Average] {
                let windowed = aggregate(&series, Some(interval), mode);
                assert_eq!(windowed.len(), series.len());
                assert_eq!(windowed, brute_force(&series, interval, mode));
            }
        }
    }

    #[test]
    fn test_aggregate_on_tick_axis_keeps_time_axis() {
        // Ticks advance unevenly relative to wall-clock time.
        let series = vec![
            (1000.0, Some(1.0)),
            (2000.0, Some(2.0)),
            (3000.0, Some(3.0)),
            (4000.0, Some(4.0)),
        ];
        let ticks = [10.0, 11.0, 15.0, 16.0];

        let result = aggregate_on_axis(&series, Some(2.0), AggregationMode::Sum, &ticks);
        assert_eq!(
            result,
            vec![
                (1000.0, Some(1.0)),
                (2000.0, Some(3.0)),
                (3000.0, Some(3.0)),
                (4000.0, Some(7.0)),
            ]
        );
    }

    #[test]
    fn test_aggregate_on_axis_falls_back_to_own_axis() {
        let series = vec![(0.0, Some(1.0)), (1.0, Some(2.0))];

        let result = aggregate_on_axis(&series, Some(5.0), AggregationMode::Sum, &[1.0]);
        assert_eq!(result, vec![(0.0, Some(1.0)), (1.0, Some(3.0))]);
    }
}
