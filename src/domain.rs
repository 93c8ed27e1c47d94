//! Finite integer domains.
//!
//! A [`Domain`] is the set of values still considered possible for a variable.
//! It is stored as an ascending list of disjoint, non-adjacent [`Range`]s, so that
//! wide variables (e.g. 64-bit addresses) stay cheap to represent and to narrow.
//!
//! # Example
//!
//! ```
//! use fd_solver::domain::Domain;
//! use num_bigint::BigUint;
//!
//! let mut d = Domain::full(4); // {0, ..., 15}
//! d.exclude(&Domain::singleton(3u32));
//! assert_eq!(d.to_string(), "{[0, 2], [4, 15]}");
//! assert_eq!(d.size(), BigUint::from(15u32));
//!
//! let values: Vec<u32> = d.iter().take(4).map(|v| u32::try_from(&v).unwrap()).collect();
//! assert_eq!(values, vec![0, 1, 2, 4]);
//! ```

use std::fmt::{Display, Formatter};

use num_bigint::BigUint;

use crate::range::Range;

/// A finite set of non-negative integers.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Domain {
    /// Ascending, disjoint and non-adjacent ranges.
    ranges: Vec<Range>,
}

impl Domain {
    /// Creates the empty domain.
    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Creates the domain `[0, 2^width - 1]`.
    pub fn full(width: u32) -> Self {
        let max = (BigUint::from(1u32) << width) - 1u32;
        Self::from(Range::new(BigUint::ZERO, max))
    }

    /// Creates the single-value domain `{value}`.
    pub fn singleton(value: impl Into<BigUint>) -> Self {
        Self::from(Range::singleton(value))
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Returns the number of values in the domain.
    pub fn size(&self) -> BigUint {
        self.ranges.iter().map(Range::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Checks whether the domain consists of exactly one value.
    pub fn is_singular(&self) -> bool {
        self.ranges.len() == 1 && self.ranges[0].is_singular()
    }

    /// Returns the smallest value, or `None` for the empty domain.
    pub fn min(&self) -> Option<&BigUint> {
        self.ranges.first().map(Range::min)
    }

    /// Returns the largest value, or `None` for the empty domain.
    pub fn max(&self) -> Option<&BigUint> {
        self.ranges.last().map(Range::max)
    }

    pub fn contains_value(&self, value: &BigUint) -> bool {
        self.find(value).is_some()
    }

    /// Checks whether `other` is a subset of this domain.
    pub fn contains(&self, other: &Domain) -> bool {
        // Ranges are non-adjacent, so every subrange lies inside a single range.
        other.ranges.iter().all(|range| match self.find(range.min()) {
            Some(i) => self.ranges[i].contains(range),
            None => false,
        })
    }

    /// Checks whether the domains have at least one common value.
    pub fn overlaps(&self, other: &Domain) -> bool {
        let (mut i, mut j) = (0, 0);

        while i < self.ranges.len() && j < other.ranges.len() {
            let a = &self.ranges[i];
            let b = &other.ranges[j];

            if a.overlaps(b) {
                return true;
            }
            if a.max() < b.min() {
                i += 1;
            } else {
                j += 1;
            }
        }

        false
    }

    /// Replaces the content of this domain with the content of `other`.
    pub fn set(&mut self, other: &Domain) {
        self.ranges.clone_from(&other.ranges);
    }

    /// Adds the values of `range` to the domain.
    pub fn include(&mut self, range: &Range) {
        // Position of the first range that does not end before `range` (or touch it).
        let start = self
            .ranges
            .partition_point(|current| !current.is_mergeable(range) && current.max() < range.min());

        let mut merged = range.clone();
        let mut end = start;
        while end < self.ranges.len() {
            match merged.merge(&self.ranges[end]) {
                Some(union) => merged = union,
                None => break,
            }
            end += 1;
        }

        self.ranges.splice(start..end, [merged]);
    }

    /// Adds all values of `other` to the domain.
    pub fn include_domain(&mut self, other: &Domain) {
        for range in &other.ranges {
            self.include(range);
        }
    }

    /// Restricts the domain to the values also contained in `other`.
    pub fn intersect(&mut self, other: &Domain) {
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.ranges.len() && j < other.ranges.len() {
            let a = &self.ranges[i];
            let b = &other.ranges[j];

            if let Some(common) = a.intersect(b) {
                result.push(common);
            }
            if a.max() <= b.max() {
                i += 1;
            } else {
                j += 1;
            }
        }

        self.ranges = result;
    }

    /// Removes the values contained in `other` from the domain.
    pub fn exclude(&mut self, other: &Domain) {
        for excluded in &other.ranges {
            if self.ranges.is_empty() {
                return;
            }
            self.ranges = self
                .ranges
                .iter()
                .flat_map(|current| current.minus(excluded))
                .collect();
        }
    }

    /// Returns an ascending iterator over the values of the domain.
    ///
    /// The iterator is lazy: iterating over a domain of a 64-bit variable only
    /// materializes the values actually requested.
    pub fn iter(&self) -> DomainIter<'_> {
        DomainIter {
            ranges: &self.ranges,
            index: 0,
            next: self.ranges.first().map(|range| range.min().clone()),
        }
    }

    /// Index of the range holding `value`.
    fn find(&self, value: &BigUint) -> Option<usize> {
        let i = self.ranges.partition_point(|range| range.max() < value);
        (i < self.ranges.len() && self.ranges[i].contains_value(value)).then_some(i)
    }
}

impl From<Range> for Domain {
    fn from(range: Range) -> Self {
        Self {
            ranges: vec![range],
        }
    }
}

impl<'a> IntoIterator for &'a Domain {
    type Item = BigUint;
    type IntoIter = DomainIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
        }
        write!(f, "}}")
    }
}

/// Iterator over the values of a [`Domain`], in ascending order.
pub struct DomainIter<'a> {
    ranges: &'a [Range],
    index: usize,
    next: Option<BigUint>,
}

impl Iterator for DomainIter<'_> {
    type Item = BigUint;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.next.take()?;

        if &value < self.ranges[self.index].max() {
            self.next = Some(&value + 1u32);
        } else {
            self.index += 1;
            self.next = self.ranges.get(self.index).map(|range| range.min().clone());
        }

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dom(ranges: &[(u32, u32)]) -> Domain {
        let mut d = Domain::empty();
        for &(min, max) in ranges {
            d.include(&Range::new(min, max));
        }
        d
    }

    fn values(d: &Domain) -> Vec<u64> {
        d.iter().map(|v| u64::try_from(&v).unwrap()).collect()
    }

    #[test]
    fn test_full() {
        let d = Domain::full(4);
        assert_eq!(d.size(), BigUint::from(16u32));
        assert_eq!(d.min(), Some(&BigUint::ZERO));
        assert_eq!(d.max(), Some(&BigUint::from(15u32)));
        assert!(!d.is_singular());
    }

    #[test]
    fn test_full_wide_size() {
        let d = Domain::full(128);
        assert_eq!(d.size(), BigUint::from(1u32) << 128u32);
    }

    #[test]
    fn test_singleton() {
        let d = Domain::singleton(7u32);
        assert!(d.is_singular());
        assert_eq!(d.size(), BigUint::from(1u32));
        assert_eq!(values(&d), vec![7]);
    }

    #[test]
    fn test_empty() {
        let d = Domain::empty();
        assert!(d.is_empty());
        assert!(!d.is_singular());
        assert_eq!(d.size(), BigUint::ZERO);
        assert_eq!(d.iter().next(), None);
        assert_eq!(d.to_string(), "{}");
    }

    #[test]
    fn test_include_merges() {
        let d = dom(&[(10, 12), (0, 3), (5, 6)]);
        assert_eq!(d.to_string(), "{[0, 3], [5, 6], [10, 12]}");

        // Adjacent ranges are merged into one.
        let d = dom(&[(0, 3), (4, 6)]);
        assert_eq!(d.ranges(), &[Range::new(0u32, 6u32)]);

        // A range bridging several others swallows them.
        let d = dom(&[(0, 1), (4, 5), (8, 9), (2, 7)]);
        assert_eq!(d.ranges(), &[Range::new(0u32, 9u32)]);

        let mut d = dom(&[(0, 1), (8, 9)]);
        d.include_domain(&dom(&[(3, 4), (20, 20)]));
        assert_eq!(d.to_string(), "{[0, 1], [3, 4], [8, 9], [20, 20]}");
    }

    #[test]
    fn test_intersect() {
        let mut d = dom(&[(0, 5), (10, 15)]);
        d.intersect(&dom(&[(3, 11), (14, 20)]));
        assert_eq!(d.to_string(), "{[3, 5], [10, 11], [14, 15]}");

        let mut d = dom(&[(0, 5)]);
        d.intersect(&dom(&[(6, 9)]));
        assert!(d.is_empty());
    }

    #[test]
    fn test_exclude() {
        let mut d = Domain::full(4);
        d.exclude(&dom(&[(2, 3), (8, 8)]));
        assert_eq!(d.to_string(), "{[0, 1], [4, 7], [9, 15]}");

        d.exclude(&Domain::full(4));
        assert!(d.is_empty());

        // Excluding values outside the domain is a no-op.
        let mut d = Domain::full(2);
        d.exclude(&Domain::singleton(100u32));
        assert_eq!(d, Domain::full(2));
    }

    #[test]
    fn test_overlaps() {
        let a = dom(&[(0, 2), (10, 12)]);
        let b = dom(&[(3, 9), (12, 20)]);
        let c = dom(&[(3, 9), (13, 20)]);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&Domain::empty()));

        // `overlaps` does not mutate.
        assert_eq!(a, dom(&[(0, 2), (10, 12)]));
    }

    #[test]
    fn test_contains() {
        let a = dom(&[(0, 5), (10, 15)]);
        assert!(a.contains(&dom(&[(1, 2), (11, 15)])));
        assert!(!a.contains(&dom(&[(4, 10)])));
        assert!(a.contains(&Domain::empty()));
        assert!(a.contains_value(&BigUint::from(10u32)));
        assert!(!a.contains_value(&BigUint::from(7u32)));
    }

    #[test]
    fn test_set() {
        let mut a = Domain::full(8);
        let b = dom(&[(1, 1), (3, 3)]);
        a.set(&b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_iter_ascending_and_restartable() {
        let d = dom(&[(7, 8), (0, 1), (4, 4)]);
        assert_eq!(values(&d), vec![0, 1, 4, 7, 8]);
        assert_eq!(values(&d), vec![0, 1, 4, 7, 8]);

        let mut n = 0;
        for _ in &d {
            n += 1;
        }
        assert_eq!(n, 5);
    }

    #[test]
    fn test_iter_is_lazy() {
        let d = Domain::full(64);
        let first: Vec<u64> = d.iter().take(3).map(|v| u64::try_from(&v).unwrap()).collect();
        assert_eq!(first, vec![0, 1, 2]);
    }
}
