//! A set of disjoint closed intervals, built by incremental insertion.
//!
//! [IntervalCoalescer] ingests [Interval]s one at a time. Any stored
//! interval sharing an integer with the inserted one is replaced,
//! together with it, by their envelope. Between two calls, no two stored
//! intervals overlap, so the covered length is just the sum of the
//! stored lengths.
//!
//! # Examples
//!
//! ```rust
//! use coalesce_types::{Interval, IntervalCoalescer};
//!
//! let mut set = IntervalCoalescer::new();
//! set.insert(Interval::new(10, 14)?);
//! set.insert(Interval::new(16, 20)?);
//! set.insert(Interval::new(12, 18)?);
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![Interval::new(10, 20)?]);
//! assert_eq!(set.total_covered_length(), 11);
//! # Ok::<(), coalesce_types::IntervalError>(())
//! ```

use crate::interval::{Interval, IntervalError};
use std::collections::BTreeMap;
use std::fmt;

/// A minimal set of pairwise-disjoint closed intervals.
///
/// Touching intervals, such as `[1, 5]` and `[6, 10]`, share no integer
/// and are kept as separate entries.
#[derive(Clone, Eq, PartialEq, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<Interval>", from = "Vec<Interval>")]
pub struct IntervalCoalescer {
    // Key is the lower bound, value the upper bound. Since intervals are
    // disjoint, upper bounds are sorted the same way as lower bounds.
    intervals: BTreeMap<i64, i64>,
}

impl IntervalCoalescer {
    /// Creates an empty set.
    pub fn new() -> Self {
        IntervalCoalescer {
            intervals: BTreeMap::new(),
        }
    }

    /// Creates and fills a set.
    pub fn from_intervals(into_iter: impl IntoIterator<Item = Interval>) -> Self {
        let mut set = IntervalCoalescer::new();
        for interval in into_iter.into_iter() {
            set.insert(interval);
        }
        set
    }

    /// Adds an interval, merging it with every stored interval it overlaps.
    ///
    /// The overlapping intervals are removed and replaced by a single
    /// interval spanning the lowest lower bound to the highest upper
    /// bound of `range` and the removed intervals. Inserting an interval
    /// already covered by a stored one leaves the set unchanged.
    pub fn insert(&mut self, range: Interval) {
        let mut low = range.low();
        let mut high = range.high();

        // Walk back from the last interval starting at or before
        // range.high(); the first one ending before range.low() and all
        // intervals before it don't overlap.
        let overlapping = self
            .intervals
            .range(..=range.high())
            .rev()
            .take_while(|&(_, &end)| end >= range.low())
            .map(|(&start, _)| start)
            .collect::<Vec<_>>();
        for start in overlapping {
            if let Some(end) = self.intervals.remove(&start) {
                low = low.min(start);
                high = high.max(end);
            }
        }

        self.intervals.insert(low, high);
    }

    /// Checks the bounds, then inserts `[low, high]`.
    ///
    /// A malformed interval is rejected and the set is left untouched.
    pub fn insert_bounds(&mut self, low: i64, high: i64) -> Result<(), IntervalError> {
        self.insert(Interval::new(low, high)?);

        Ok(())
    }

    /// Number of distinct integers covered by the inserted intervals.
    pub fn total_covered_length(&self) -> u128 {
        self.iter().map(|interval| interval.len()).sum()
    }

    /// Returns true if there are no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns the number of stored, disjoint intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns an iterator over the stored intervals, sorted by lower bound.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.intervals.iter(),
        }
    }

    /// Returns the stored interval containing `point`, if any.
    pub fn interval_containing(&self, point: i64) -> Option<Interval> {
        let (&low, &high) = self.intervals.range(..=point).next_back()?;
        if point <= high {
            Some(Interval::new_unchecked(low, high))
        } else {
            None
        }
    }

    /// Returns true if `point` is covered by any stored interval.
    pub fn contains(&self, point: i64) -> bool {
        self.interval_containing(point).is_some()
    }

    /// Adds all intervals from `other` to `self`.
    ///
    /// This is how independently built sets are combined: each interval
    /// of `other` goes through [IntervalCoalescer::insert].
    pub fn merge(&mut self, other: IntervalCoalescer) {
        for interval in other {
            self.insert(interval);
        }
    }

    /// Returns the union of two sets.
    pub fn union(&self, other: &IntervalCoalescer) -> IntervalCoalescer {
        let mut result = self.clone();
        for interval in other.iter() {
            result.insert(interval);
        }
        result
    }
}

impl FromIterator<Interval> for IntervalCoalescer {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        IntervalCoalescer::from_intervals(iter)
    }
}

impl Extend<Interval> for IntervalCoalescer {
    fn extend<T: IntoIterator<Item = Interval>>(&mut self, iter: T) {
        for interval in iter {
            self.insert(interval);
        }
    }
}

impl From<Vec<Interval>> for IntervalCoalescer {
    fn from(value: Vec<Interval>) -> Self {
        IntervalCoalescer::from_intervals(value)
    }
}

impl From<IntervalCoalescer> for Vec<Interval> {
    fn from(value: IntervalCoalescer) -> Self {
        value.into_iter().collect()
    }
}

impl IntoIterator for IntervalCoalescer {
    type Item = Interval;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.intervals.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a IntervalCoalescer {
    type Item = Interval;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the intervals of an [IntervalCoalescer].
#[derive(Clone)]
pub struct Iter<'a> {
    inner: std::collections::btree_map::Iter<'a, i64, i64>,
}

impl Iterator for Iter<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(&low, &high)| Interval::new_unchecked(low, high))
    }
}

/// Owning iterator over the intervals of an [IntervalCoalescer].
pub struct IntoIter {
    inner: std::collections::btree_map::IntoIter<i64, i64>,
}

impl Iterator for IntoIter {
    type Item = Interval;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(low, high)| Interval::new_unchecked(low, high))
    }
}

impl fmt::Display for IntervalCoalescer {
    /// Formats as a comma-separated list of intervals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        f.write_str("{")?;
        for interval in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{interval}")?;
            first = false;
        }
        f.write_str("}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn interval(low: i64, high: i64) -> Interval {
        Interval::new(low, high).unwrap()
    }

    fn assert_disjoint(set: &IntervalCoalescer) {
        let intervals = set.iter().collect::<Vec<_>>();
        for (i, a) in intervals.iter().enumerate() {
            for b in &intervals[i + 1..] {
                assert!(!a.overlaps(b), "{a} overlaps {b} in {set}");
            }
        }
    }

    /// Count the integers of the union by enumerating them.
    fn brute_force_union(intervals: &[Interval]) -> u128 {
        let mut points = BTreeSet::new();
        for interval in intervals {
            points.extend(interval.low()..=interval.high());
        }
        points.len() as u128
    }

    fn permutations(items: &[Interval]) -> Vec<Vec<Interval>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut result = vec![];
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let first = rest.remove(i);
            for mut perm in permutations(&rest) {
                perm.insert(0, first);
                result.push(perm);
            }
        }
        result
    }

    #[test]
    fn empty() {
        let set = IntervalCoalescer::new();
        assert!(set.is_empty());
        assert_eq!(0, set.len());
        assert_eq!(0, set.total_covered_length());
        assert_eq!("{}", set.to_string());
    }

    #[test]
    fn insert_disjoint() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(10, 14));
        set.insert(interval(3, 5));
        set.insert(interval(-20, -10));

        assert_eq!(
            vec![interval(-20, -10), interval(3, 5), interval(10, 14)],
            set.iter().collect::<Vec<_>>()
        );
        assert_eq!(11 + 3 + 5, set.total_covered_length());
    }

    #[test]
    fn touching_intervals_stay_separate() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(1, 5));
        set.insert(interval(6, 10));

        assert_eq!(2, set.len());
        assert_eq!(
            vec![interval(1, 5), interval(6, 10)],
            set.iter().collect::<Vec<_>>()
        );
        assert_eq!(10, set.total_covered_length());
    }

    #[test]
    fn shared_endpoint_merges() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(1, 5));
        set.insert(interval(5, 10));

        assert_eq!(vec![interval(1, 10)], set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn chained_merge() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(10, 14));
        set.insert(interval(16, 20));
        set.insert(interval(12, 18));

        assert_eq!(vec![interval(10, 20)], set.iter().collect::<Vec<_>>());
        assert_eq!(11, set.total_covered_length());
    }

    #[test]
    fn bridge_many() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(0, 1));
        set.insert(interval(3, 4));
        set.insert(interval(6, 7));
        set.insert(interval(9, 10));
        set.insert(interval(20, 30));
        set.insert(interval(1, 9));

        assert_eq!(
            vec![interval(0, 10), interval(20, 30)],
            set.iter().collect::<Vec<_>>()
        );
        assert_eq!(22, set.total_covered_length());
    }

    #[test]
    fn insert_covered_interval_is_idempotent() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(10, 20));
        set.insert(interval(30, 40));
        let before = set.clone();

        set.insert(interval(12, 15));
        assert_eq!(before, set);
        set.insert(interval(10, 20));
        assert_eq!(before, set);
        set.insert(interval(40, 40));
        assert_eq!(before, set);
    }

    #[test]
    fn insert_envelops_existing() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(12, 15));
        set.insert(interval(17, 18));
        set.insert(interval(10, 20));

        assert_eq!(vec![interval(10, 20)], set.iter().collect::<Vec<_>>());
    }

    #[test]
    fn insert_bounds() {
        let mut set = IntervalCoalescer::new();
        assert_eq!(Ok(()), set.insert_bounds(3, 5));
        assert_eq!(
            Err(IntervalError::Malformed { low: 9, high: 2 }),
            set.insert_bounds(9, 2)
        );
        assert_eq!(Ok(()), set.insert_bounds(7, 7));

        // The malformed interval was not stored, nor swapped.
        assert_eq!(
            vec![interval(3, 5), interval(7, 7)],
            set.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn large_bounds() {
        let mut set = IntervalCoalescer::new();
        set.insert(interval(1_000_000_000, 9_999_999_999));
        set.insert(interval(5_000_000_000, 12_000_000_000));
        set.insert(interval(-12_000_000_000, -11_000_000_000));

        assert_eq!(11_000_000_001 + 1_000_000_001, set.total_covered_length());

        set.insert(interval(i64::MIN, i64::MAX));
        assert_eq!(1, set.len());
        assert_eq!(1u128 << 64, set.total_covered_length());
    }

    #[test]
    fn disjoint_after_every_insert() {
        let inputs = [
            interval(5, 9),
            interval(20, 25),
            interval(-3, 2),
            interval(8, 21),
            interval(30, 30),
            interval(3, 4),
            interval(26, 29),
            interval(-10, -4),
            interval(0, 50),
        ];
        let mut set = IntervalCoalescer::new();
        for (i, range) in inputs.iter().enumerate() {
            set.insert(*range);
            assert_disjoint(&set);
            assert_eq!(
                brute_force_union(&inputs[..=i]),
                set.total_covered_length(),
                "after inserting {range}"
            );
        }
    }

    #[test]
    fn coverage_matches_brute_force() {
        let cases: Vec<Vec<Interval>> = vec![
            vec![],
            vec![interval(0, 0)],
            vec![interval(3, 5), interval(10, 14), interval(16, 20), interval(12, 18)],
            vec![interval(1, 5), interval(6, 10), interval(11, 11)],
            vec![interval(1, 100), interval(2, 3), interval(50, 150), interval(-5, 0)],
            vec![interval(-7, -7), interval(-7, -6), interval(-8, -7), interval(7, 8)],
        ];
        for case in cases {
            let set = IntervalCoalescer::from_intervals(case.clone());
            assert_disjoint(&set);
            assert_eq!(brute_force_union(&case), set.total_covered_length());
        }
    }

    #[test]
    fn order_independence() {
        let inputs = [
            interval(10, 14),
            interval(16, 20),
            interval(12, 18),
            interval(3, 5),
            interval(6, 6),
            interval(4, 7),
        ];
        let expected = IntervalCoalescer::from_intervals(inputs);
        assert_eq!(
            vec![interval(3, 7), interval(10, 20)],
            expected.iter().collect::<Vec<_>>()
        );

        for perm in permutations(&inputs) {
            let set = IntervalCoalescer::from_intervals(perm.iter().copied());
            assert_eq!(expected, set, "for insertion order {perm:?}");
            assert_eq!(16, set.total_covered_length());
        }
    }

    #[test]
    fn total_covered_length_is_repeatable() {
        let set = IntervalCoalescer::from_intervals([interval(3, 5), interval(10, 20)]);
        assert_eq!(14, set.total_covered_length());
        assert_eq!(14, set.total_covered_length());
    }

    #[test]
    fn interval_containing() {
        let set = IntervalCoalescer::from_intervals([interval(3, 5), interval(10, 20)]);

        assert_eq!(None, set.interval_containing(2));
        assert_eq!(Some(interval(3, 5)), set.interval_containing(3));
        assert_eq!(Some(interval(3, 5)), set.interval_containing(5));
        assert_eq!(None, set.interval_containing(6));
        assert_eq!(None, set.interval_containing(9));
        assert_eq!(Some(interval(10, 20)), set.interval_containing(17));
        assert_eq!(None, set.interval_containing(21));

        assert!(set.contains(11));
        assert!(!set.contains(8));
        assert!(!IntervalCoalescer::new().contains(0));
    }

    #[test]
    fn merge_shards() {
        let inputs = [
            interval(3, 5),
            interval(10, 14),
            interval(16, 20),
            interval(12, 18),
            interval(25, 27),
            interval(21, 24),
        ];
        let single = IntervalCoalescer::from_intervals(inputs);

        let mut even = IntervalCoalescer::new();
        let mut odd = IntervalCoalescer::new();
        for (i, range) in inputs.iter().enumerate() {
            if i % 2 == 0 {
                even.insert(*range);
            } else {
                odd.insert(*range);
            }
        }

        assert_eq!(single, even.union(&odd));
        assert_eq!(single, odd.union(&even));

        even.merge(odd);
        assert_disjoint(&even);
        assert_eq!(single, even);
    }

    #[test]
    fn extend() {
        let mut set = IntervalCoalescer::from_intervals([interval(0, 5)]);
        set.extend([interval(3, 8), interval(12, 20)]);

        assert_eq!(
            vec![interval(0, 8), interval(12, 20)],
            set.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn collect() {
        let set: IntervalCoalescer = [interval(12, 18), interval(10, 14)].into_iter().collect();
        assert_eq!(vec![interval(10, 18)], set.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn display() {
        let set = IntervalCoalescer::from_intervals([interval(10, 20), interval(3, 5)]);
        assert_eq!("{[3, 5], [10, 20]}", set.to_string());
    }

    #[test]
    fn deserialize_coalesces() -> anyhow::Result<()> {
        #[derive(serde::Deserialize)]
        struct Doc {
            intervals: IntervalCoalescer,
        }

        let doc: Doc = toml::from_str(
            r#"
            intervals = [
              { low = 10, high = 14 },
              { low = 12, high = 18 },
              { low = 3, high = 5 },
            ]
            "#,
        )?;
        assert_eq!(
            vec![interval(3, 5), interval(10, 18)],
            doc.intervals.iter().collect::<Vec<_>>()
        );

        Ok(())
    }
}
