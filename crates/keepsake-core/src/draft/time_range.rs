use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Closed time range in unix seconds.
///
/// Inverted ranges are accepted on input and normalized defensively wherever
/// a duration or overlap is computed — only the filter stage (with
/// `require_valid_time`) rejects them outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Return the range with `from <= to`, swapping the bounds if inverted.
    pub fn normalized(self) -> Self {
        if self.to < self.from {
            Self {
                from: self.to,
                to: self.from,
            }
        } else {
            self
        }
    }

    pub fn duration_secs(self) -> i64 {
        let n = self.normalized();
        n.to - n.from
    }

    /// Min/max envelope of two ranges.
    pub fn envelope(self, other: Self) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        Self {
            from: a.from.min(b.from),
            to: a.to.max(b.to),
        }
    }

    /// Temporal intersection-over-union of two ranges, in [0.0, 1.0].
    /// Degenerate unions (zero length) yield 0.0.
    pub fn iou(self, other: Self) -> f64 {
        let a = self.normalized();
        let b = other.normalized();
        let inter = (a.to.min(b.to) - a.from.max(b.from)).max(0);
        let union = (a.to.max(b.to) - a.from.min(b.from)).max(0);
        if union == 0 {
            return 0.0;
        }
        inter as f64 / union as f64
    }

    pub fn start_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.normalized().from, 0)
    }

    pub fn end_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.normalized().to, 0)
    }

    /// Validity gate used by the filter stage: bounds positive, not
    /// inverted, and the start year at or after `min_year`.
    pub fn is_valid(self, min_year: i32) -> bool {
        if self.from <= 0 || self.to < self.from {
            return false;
        }
        match DateTime::from_timestamp(self.from, 0) {
            Some(dt) => dt.year() >= min_year,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_swaps_inverted_bounds() {
        let r = TimeRange::new(200, 100).normalized();
        assert_eq!((r.from, r.to), (100, 200));
        assert_eq!(TimeRange::new(200, 100).duration_secs(), 100);
    }

    #[test]
    fn iou_of_identical_ranges_is_one() {
        let r = TimeRange::new(1000, 2000);
        assert!((r.iou(r) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn iou_of_disjoint_ranges_is_zero() {
        let a = TimeRange::new(0, 100);
        let b = TimeRange::new(200, 300);
        assert_eq!(a.iou(b), 0.0);
    }

    #[test]
    fn iou_half_overlap() {
        let a = TimeRange::new(0, 100);
        let b = TimeRange::new(50, 150);
        // intersection 50, union 150.
        assert!((a.iou(b) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn envelope_spans_both() {
        let e = TimeRange::new(100, 200).envelope(TimeRange::new(50, 150));
        assert_eq!((e.from, e.to), (50, 200));
    }

    #[test]
    fn validity_rejects_inverted_and_ancient() {
        assert!(!TimeRange::new(2000, 1000).is_valid(1990));
        assert!(!TimeRange::new(0, 100).is_valid(1990));
        // 1980-ish timestamp fails a 1990 floor.
        assert!(!TimeRange::new(315_532_800, 315_600_000).is_valid(1990));
        // 2021-01-01 passes.
        assert!(TimeRange::new(1_609_459_200, 1_609_545_600).is_valid(1990));
    }
}
