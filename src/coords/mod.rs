//! Coordinate ranges and strands
//!
//! All coordinates in this crate are **1-based inclusive**, matching the
//! GFF coordinates the viewer is fed with:
//!
//! | Type | Basis | Notes |
//! |------|-------|-------|
//! | [`Range`] | 1-based | `min` and `max` are both inside the range |
//! | reference residue strings | 0-based | index = coordinate - reference `min` |
//!
//! A range that is "not yet known" is an `Option<Range>::None`.
//!
//! # Examples
//!
//! ```
//! use ferro_align::coords::Range;
//!
//! let exon = Range::new(100, 200);
//! let cds = Range::new(120, 180);
//!
//! assert_eq!(exon.len(), 101);
//! assert!(exon.contains_range(&cds));
//!
//! // Set arithmetic gives the flanking UTR pieces
//! let utrs = exon.subtract(&cds);
//! assert_eq!(utrs, vec![Range::new(100, 119), Range::new(181, 200)]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed interval of 1-based coordinates with `min <= max`
///
/// Not `Ord`, so `min()`/`max()` always resolve to the accessors. Sort with
/// `sort_by_key(|r| (r.min(), r.max()))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeRecord")]
pub struct Range {
    min: i64,
    max: i64,
}

/// Serialized form of a [`Range`]; bounds are normalized on the way in
#[derive(Deserialize)]
struct RangeRecord {
    min: i64,
    max: i64,
}

impl From<RangeRecord> for Range {
    fn from(record: RangeRecord) -> Self {
        Range::new(record.min, record.max)
    }
}

impl Range {
    /// Create a range, swapping the bounds if they are given in reverse order
    #[inline]
    pub fn new(a: i64, b: i64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// A range covering a single coordinate
    #[inline]
    pub fn point(pos: i64) -> Self {
        Self { min: pos, max: pos }
    }

    /// Create a range only if `min <= max`
    ///
    /// Used when a computed range may be empty, e.g. the gap between two
    /// touching exons.
    #[inline]
    pub fn checked(min: i64, max: i64) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of coordinates in the range
    #[inline]
    pub fn len(&self) -> i64 {
        self.max - self.min + 1
    }

    /// A range always holds at least one coordinate
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a coordinate is within this range
    #[inline]
    pub fn contains(&self, pos: i64) -> bool {
        pos >= self.min && pos <= self.max
    }

    /// Check if `other` lies entirely within this range
    #[inline]
    pub fn contains_range(&self, other: &Range) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// Check if the two ranges share at least one coordinate
    #[inline]
    pub fn overlaps(&self, other: &Range) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Overlapping, or touching with no coordinate in between
    #[inline]
    pub fn touches(&self, other: &Range) -> bool {
        self.min <= other.max.saturating_add(1) && other.min <= self.max.saturating_add(1)
    }

    /// Smallest range covering both
    pub fn union(&self, other: &Range) -> Range {
        Range {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Shared coordinates, if any
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        Range::checked(self.min.max(other.min), self.max.min(other.max))
    }

    /// Coordinates of `self` not covered by `other`
    ///
    /// Returns zero, one or two pieces in ascending order.
    pub fn subtract(&self, other: &Range) -> Vec<Range> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2);
        if let Some(left) = Range::checked(self.min, other.min - 1) {
            pieces.push(left);
        }
        if let Some(right) = Range::checked(other.max + 1, self.max) {
            pieces.push(right);
        }
        pieces
    }

    /// Subtract several ranges in turn
    pub fn subtract_all<'a>(&self, others: impl IntoIterator<Item = &'a Range>) -> Vec<Range> {
        let mut pieces = vec![*self];
        for other in others {
            pieces = pieces.iter().flat_map(|p| p.subtract(other)).collect();
        }
        pieces
    }

    /// Clamp to `bounds`, returning `None` if nothing is left
    pub fn clamp_to(&self, bounds: &Range) -> Option<Range> {
        self.intersect(bounds)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// Smallest range covering every range in the iterator
pub fn union_all<'a>(ranges: impl IntoIterator<Item = &'a Range>) -> Option<Range> {
    ranges
        .into_iter()
        .fold(None, |acc: Option<Range>, r| match acc {
            Some(a) => Some(a.union(r)),
            None => Some(*r),
        })
}

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    pub fn is_forward(&self) -> bool {
        matches!(self, Strand::Forward)
    }

    pub fn opposite(&self) -> Strand {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// Strand selection for extent queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrandFilter {
    Only(Strand),
    #[default]
    Any,
}

impl StrandFilter {
    #[inline]
    pub fn accepts(&self, strand: Strand) -> bool {
        match self {
            StrandFilter::Only(s) => *s == strand,
            StrandFilter::Any => true,
        }
    }
}

impl From<Strand> for StrandFilter {
    fn from(strand: Strand) -> Self {
        StrandFilter::Only(strand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_order() {
        let r = Range::new(200, 100);
        assert_eq!(r.min(), 100);
        assert_eq!(r.max(), 200);
    }

    #[test]
    fn test_len_and_contains() {
        let r = Range::new(10, 19);
        assert_eq!(r.len(), 10);
        assert!(r.contains(10));
        assert!(r.contains(19));
        assert!(!r.contains(20));
        assert_eq!(Range::point(5).len(), 1);
    }

    #[test]
    fn test_deserialize_normalizes_order() {
        let r: Range = serde_json::from_str(r#"{"min":9,"max":2}"#).unwrap();
        assert_eq!(r.min(), 2);
        assert_eq!(r.max(), 9);
    }

    #[test]
    fn test_accessors_on_owned_range() {
        let owned = Range::new(3, 7);
        let first: i64 = owned.min();
        let last: i64 = Range::new(3, 7).max();
        assert_eq!(owned.max() - first, 4);
        assert_eq!(last, 7);
    }

    #[test]
    fn test_checked_rejects_empty() {
        assert!(Range::checked(201, 200).is_none());
        assert_eq!(Range::checked(200, 200), Some(Range::point(200)));
    }

    #[test]
    fn test_overlaps_and_touches() {
        let a = Range::new(100, 200);
        assert!(a.overlaps(&Range::new(200, 300)));
        assert!(!a.overlaps(&Range::new(201, 300)));
        assert!(a.touches(&Range::new(201, 300)));
        assert!(!a.touches(&Range::new(202, 300)));
    }

    #[test]
    fn test_subtract_middle() {
        let pieces = Range::new(100, 200).subtract(&Range::new(120, 180));
        assert_eq!(pieces, vec![Range::new(100, 119), Range::new(181, 200)]);
    }

    #[test]
    fn test_subtract_one_side() {
        let pieces = Range::new(100, 200).subtract(&Range::new(100, 150));
        assert_eq!(pieces, vec![Range::new(151, 200)]);
    }

    #[test]
    fn test_subtract_covering() {
        assert!(Range::new(100, 200).subtract(&Range::new(50, 250)).is_empty());
    }

    #[test]
    fn test_subtract_disjoint() {
        let r = Range::new(100, 200);
        assert_eq!(r.subtract(&Range::new(300, 400)), vec![r]);
    }

    #[test]
    fn test_subtract_all() {
        let exon = Range::new(1, 100);
        let utrs = [Range::new(1, 10), Range::new(91, 100)];
        assert_eq!(exon.subtract_all(&utrs), vec![Range::new(11, 90)]);
    }

    #[test]
    fn test_union_all() {
        let ranges = [Range::new(5, 10), Range::new(1, 3), Range::new(8, 20)];
        assert_eq!(union_all(&ranges), Some(Range::new(1, 20)));
        assert_eq!(union_all(&[] as &[Range]), None);
    }

    #[test]
    fn test_intersect() {
        let a = Range::new(1, 10);
        assert_eq!(a.intersect(&Range::new(5, 20)), Some(Range::new(5, 10)));
        assert_eq!(a.intersect(&Range::new(11, 20)), None);
    }

    #[test]
    fn test_strand_filter() {
        assert!(StrandFilter::Any.accepts(Strand::Reverse));
        assert!(StrandFilter::from(Strand::Forward).accepts(Strand::Forward));
        assert!(!StrandFilter::Only(Strand::Forward).accepts(Strand::Reverse));
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
        assert_eq!(Strand::Forward.opposite(), Strand::Reverse);
    }
}
