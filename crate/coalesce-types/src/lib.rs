//! Closed integer intervals and their coalescing set.
//!
//! - [Interval]: a validated closed range `[low, high]`.
//! - [IntervalCoalescer]: a minimal set of disjoint intervals, built by
//!   incremental insertion, that reports the number of integers covered
//!   without enumerating them.
//! - [RawRanges]: the unmerged input ranges, for point containment.

mod coalescer;
mod interval;
mod raw;

pub use coalescer::{IntervalCoalescer, IntoIter, Iter};
pub use interval::{Interval, IntervalError};
pub use raw::RawRanges;
