use crate::coalescer::IntervalCoalescer;
use crate::interval::Interval;

/// Intervals as given, possibly overlapping, in input order.
///
/// Containment queries scan the intervals linearly and never coalesce
/// them. Use [RawRanges::coalesce] to build the disjoint set.
#[derive(Clone, Eq, PartialEq, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RawRanges(Vec<Interval>);

impl RawRanges {
    pub fn new() -> Self {
        RawRanges(Vec::new())
    }

    /// Append an interval. Duplicates are kept.
    pub fn push(&mut self, interval: Interval) {
        self.0.push(interval);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Interval> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.0
    }

    /// Returns true if at least one interval contains `point`.
    pub fn contains(&self, point: i64) -> bool {
        self.0.iter().any(|interval| interval.contains(point))
    }

    /// Count the points contained in at least one interval.
    ///
    /// Points are counted as many times as they're given.
    pub fn count_contained(&self, points: impl IntoIterator<Item = i64>) -> usize {
        points
            .into_iter()
            .filter(|point| self.contains(*point))
            .count()
    }

    /// Insert all intervals, in order, into a new [IntervalCoalescer].
    pub fn coalesce(&self) -> IntervalCoalescer {
        IntervalCoalescer::from_intervals(self.iter())
    }
}

impl From<Vec<Interval>> for RawRanges {
    fn from(value: Vec<Interval>) -> Self {
        RawRanges(value)
    }
}

impl FromIterator<Interval> for RawRanges {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        RawRanges(iter.into_iter().collect())
    }
}

impl Extend<Interval> for RawRanges {
    fn extend<T: IntoIterator<Item = Interval>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
