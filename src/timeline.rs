//! Cumulative frame timing and time-to-frame lookup.

use crate::DurationTable;

/// Cumulative end times of every frame in a sequence.
///
/// `intervals()[i]` is the time at which frame `i` ends, that is the sum of
/// the durations of frames `0..=i`.
///
/// ## Example
///
/// ```rust
/// use sprite_anim::{Durations, Timeline};
///
/// let table = Durations::from(vec![0.25, 1.0, 0.5]).normalize(3).unwrap();
/// let timeline = Timeline::build(table);
/// assert_eq!(timeline.intervals(), &[0.25, 1.25, 1.75]);
/// assert_eq!(timeline.total_duration(), 1.75);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    durations: DurationTable,
    intervals: Vec<f64>,
    total_duration: f64,
}

impl Timeline {
    /// Accumulate a duration table in index order.
    pub fn build(durations: DurationTable) -> Self {
        let mut total = 0.0;
        let intervals = durations
            .as_slice()
            .iter()
            .map(|d| {
                total += d;
                total
            })
            .collect();

        Self {
            durations,
            intervals,
            total_duration: total,
        }
    }

    /// The per-frame durations this timeline was built from.
    #[inline]
    pub fn durations(&self) -> &DurationTable {
        &self.durations
    }

    /// Cumulative end time of each frame.
    #[inline]
    pub fn intervals(&self) -> &[f64] {
        &self.intervals
    }

    /// Length of one full cycle.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if the timeline has no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Frame index for a time within the cycle. See [`seek`].
    #[inline]
    pub fn seek(&self, timer: f64) -> usize {
        seek(&self.intervals, timer)
    }
}

/// Find the frame index for `timer`.
///
/// Returns the largest `i` with `timer > intervals[i]`. When `timer` does not
/// exceed any boundary (it lies within the first frame, or exactly on its
/// end) the last index is returned instead of `0`, so a cycle that has just
/// started shows its final frame.
///
/// ```rust
/// use sprite_anim::seek;
///
/// let intervals = [0.25, 0.5, 0.75];
/// assert_eq!(seek(&intervals, 0.6), 1);
/// assert_eq!(seek(&intervals, 0.5), 0);
/// assert_eq!(seek(&intervals, 0.1), 2);
/// ```
pub fn seek(intervals: &[f64], timer: f64) -> usize {
    match intervals.iter().rposition(|&end| timer > end) {
        Some(i) => i,
        None => intervals.len().saturating_sub(1),
    }
}
