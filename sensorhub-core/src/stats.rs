//! Per-channel running statistics
//!
//! Every accepted reading updates two views of a channel:
//! - lifetime `min`/`max`, compared against every value ever seen, so they
//!   only ever widen
//! - windowed `window_min`/`window_max`/`window_avg`, recomputed from the
//!   current history buffer contents with a full rescan
//!
//! The lifetime `avg` is defined to equal the windowed average. Together with
//! the O(H) rescan this is the reference behavior of the system: H is small
//! and updates arrive every few seconds, so the rescan stays simple and
//! exact instead of carrying incremental state.

use crate::history::HistoryBuffer;

/// Lifetime and windowed min/max/avg for one measurement channel
///
/// Only meaningful once at least one sample has been recorded; the hub gates
/// access on a non-empty history.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelStats {
    /// Smallest value since the channel started
    pub min: f32,
    /// Largest value since the channel started
    pub max: f32,
    /// Average; tracks the windowed average
    pub avg: f32,
    /// Smallest value in the current history window
    pub window_min: f32,
    /// Largest value in the current history window
    pub window_max: f32,
    /// Arithmetic mean of the current history window
    pub window_avg: f32,
}

impl ChannelStats {
    /// Zeroed statistics, awaiting the first sample
    pub const fn new() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            avg: 0.0,
            window_min: 0.0,
            window_max: 0.0,
            window_avg: 0.0,
        }
    }

    /// Fold in a freshly recorded value
    ///
    /// `history` must already contain `value` as its newest entry.
    pub(crate) fn record<const N: usize>(&mut self, value: f32, history: &HistoryBuffer<N>) {
        if history.len() == 1 {
            // First sample seeds everything
            *self = Self {
                min: value,
                max: value,
                avg: value,
                window_min: value,
                window_max: value,
                window_avg: value,
            };
            return;
        }

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        let mut sum = 0.0f32;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for v in history.iter() {
            sum += v;
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }

        self.window_min = min;
        self.window_max = max;
        self.window_avg = sum / history.len() as f32;
        self.avg = self.window_avg;
    }
}

impl Default for ChannelStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(values: &[f32]) -> (ChannelStats, HistoryBuffer<4>) {
        let mut stats = ChannelStats::new();
        let mut history = HistoryBuffer::<4>::new();
        for &v in values {
            history.push(v);
            stats.record(v, &history);
        }
        (stats, history)
    }

    #[test]
    fn first_sample_seeds_all_fields() {
        let (stats, _) = feed(&[42.0]);
        assert_eq!(stats.min, 42.0);
        assert_eq!(stats.max, 42.0);
        assert_eq!(stats.avg, 42.0);
        assert_eq!(stats.window_min, 42.0);
        assert_eq!(stats.window_max, 42.0);
        assert_eq!(stats.window_avg, 42.0);
    }

    #[test]
    fn hand_computed_sequence() {
        let (stats, _) = feed(&[10.0, 20.0, 30.0]);
        assert_eq!(stats.window_min, 10.0);
        assert_eq!(stats.window_max, 30.0);
        assert_eq!(stats.window_avg, 20.0);
        assert_eq!(stats.avg, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
    }

    #[test]
    fn lifetime_survives_window_eviction() {
        // 100 falls out of the 4-deep window but lifetime max keeps it
        let (stats, history) = feed(&[100.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(history.is_full());
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.window_max, 5.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.window_min, 2.0);
    }

    #[test]
    fn average_tracks_window_only() {
        let (stats, _) = feed(&[100.0, 2.0, 2.0, 2.0, 2.0]);
        // 100 is gone from the window, so the average ignores it
        assert_eq!(stats.window_avg, 2.0);
        assert_eq!(stats.avg, 2.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn window_aggregates_match_reference(values in prop::collection::vec(-1e4f32..1e4, 1..60)) {
                let mut stats = ChannelStats::new();
                let mut history = HistoryBuffer::<8>::new();
                for &v in &values {
                    history.push(v);
                    stats.record(v, &history);
                }

                let window: Vec<f32> = values
                    .iter()
                    .copied()
                    .skip(values.len().saturating_sub(8))
                    .collect();

                let expect_min = window.iter().copied().fold(f32::INFINITY, f32::min);
                let expect_max = window.iter().copied().fold(f32::NEG_INFINITY, f32::max);

                prop_assert_eq!(stats.window_min, expect_min);
                prop_assert_eq!(stats.window_max, expect_max);
                prop_assert_eq!(stats.avg, stats.window_avg);
            }

            #[test]
            fn lifetime_bounds_are_monotonic(values in prop::collection::vec(-1e4f32..1e4, 1..60)) {
                let mut stats = ChannelStats::new();
                let mut history = HistoryBuffer::<8>::new();
                let mut widest = (f32::INFINITY, f32::NEG_INFINITY);
                for &v in &values {
                    history.push(v);
                    stats.record(v, &history);
                    widest = (widest.0.min(v), widest.1.max(v));
                    prop_assert_eq!(stats.min, widest.0);
                    prop_assert_eq!(stats.max, widest.1);
                }
            }
        }
    }
}
