//! Inclusive integer ranges.
//!
//! A [`Range`] is the building block of a [`Domain`][crate::domain::Domain]:
//! a domain is stored as an ordered list of disjoint ranges.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use num_bigint::BigUint;

/// A non-empty inclusive range `[min, max]` of non-negative integers.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Range {
    min: BigUint,
    max: BigUint,
}

impl Range {
    /// Creates the range `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn new(min: impl Into<BigUint>, max: impl Into<BigUint>) -> Self {
        let min = min.into();
        let max = max.into();
        assert!(min <= max, "Range bounds are out of order: [{}, {}]", min, max);
        Self { min, max }
    }

    /// Creates the single-value range `[value, value]`.
    pub fn singleton(value: impl Into<BigUint>) -> Self {
        let value = value.into();
        Self {
            min: value.clone(),
            max: value,
        }
    }

    pub fn min(&self) -> &BigUint {
        &self.min
    }

    pub fn max(&self) -> &BigUint {
        &self.max
    }

    /// Number of values in the range.
    pub fn size(&self) -> BigUint {
        &self.max - &self.min + 1u32
    }

    pub fn is_singular(&self) -> bool {
        self.min == self.max
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Checks whether `other` is a subrange of this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    pub fn contains_value(&self, value: &BigUint) -> bool {
        &self.min <= value && value <= &self.max
    }

    /// Checks whether the ranges overlap or touch each other (`[1, 3]` and `[4, 6]`).
    pub fn is_mergeable(&self, other: &Range) -> bool {
        self.min <= &other.max + 1u32 && other.min <= &self.max + 1u32
    }

    pub fn intersect(&self, other: &Range) -> Option<Range> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Range {
            min: (&self.min).max(&other.min).clone(),
            max: (&self.max).min(&other.max).clone(),
        })
    }

    /// Returns the smallest range covering both ranges, if their union is a range.
    pub fn merge(&self, other: &Range) -> Option<Range> {
        if !self.is_mergeable(other) {
            return None;
        }
        Some(Range {
            min: (&self.min).min(&other.min).clone(),
            max: (&self.max).max(&other.max).clone(),
        })
    }

    /// Set difference `self \ other`: zero, one or two ranges, in ascending order.
    pub fn minus(&self, other: &Range) -> Vec<Range> {
        if !self.overlaps(other) {
            return vec![self.clone()];
        }

        let mut result = Vec::with_capacity(2);
        if self.min < other.min {
            result.push(Range {
                min: self.min.clone(),
                max: &other.min - 1u32,
            });
        }
        if other.max < self.max {
            result.push(Range {
                min: &other.max + 1u32,
                max: self.max.clone(),
            });
        }
        result
    }

    /// Splits possibly overlapping ranges into disjoint ones.
    ///
    /// The result is the coarsest ascending list of disjoint ranges such that every
    /// input range is exactly a union of output ranges. Gaps not covered by any
    /// input range are not part of the result.
    ///
    /// ```
    /// use fd_solver::range::Range;
    ///
    /// let parts = Range::divide(&[Range::new(0u32, 5u32), Range::new(3u32, 9u32)]);
    /// assert_eq!(
    ///     parts,
    ///     vec![Range::new(0u32, 2u32), Range::new(3u32, 5u32), Range::new(6u32, 9u32)]
    /// );
    /// ```
    pub fn divide<'a>(ranges: impl IntoIterator<Item = &'a Range>) -> Vec<Range> {
        let ranges: Vec<&Range> = ranges.into_iter().collect();

        // Every range starts a new part at `min` and at `max + 1`.
        let mut cuts = BTreeSet::new();
        for range in &ranges {
            cuts.insert(range.min.clone());
            cuts.insert(&range.max + 1u32);
        }

        let cuts: Vec<BigUint> = cuts.into_iter().collect();
        let mut result = Vec::new();
        for window in cuts.windows(2) {
            let part = Range {
                min: window[0].clone(),
                max: &window[1] - 1u32,
            };
            if ranges.iter().any(|range| range.contains(&part)) {
                result.push(part);
            }
        }
        result
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
