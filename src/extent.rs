//! Reference extent of a set of features

use crate::coords::{Range, StrandFilter};
use crate::feature::Feature;

/// Lowest start (`want_min`) or highest end of the features on the
/// selected strand
///
/// Returns `None` when no feature passes the strand filter.
pub fn extent<'a>(
    features: impl IntoIterator<Item = &'a Feature>,
    want_min: bool,
    strand_filter: StrandFilter,
) -> Option<i64> {
    let coords = features
        .into_iter()
        .filter(|f| strand_filter.accepts(f.reference_strand))
        .map(|f| {
            if want_min {
                f.reference_range.min()
            } else {
                f.reference_range.max()
            }
        });

    if want_min {
        coords.min()
    } else {
        coords.max()
    }
}

/// Both ends of the extent in one pass
pub fn extent_range<'a>(
    features: impl IntoIterator<Item = &'a Feature>,
    strand_filter: StrandFilter,
) -> Option<Range> {
    features
        .into_iter()
        .filter(|f| strand_filter.accepts(f.reference_strand))
        .fold(None, |acc: Option<Range>, f| match acc {
            Some(r) => Some(r.union(&f.reference_range)),
            None => Some(f.reference_range),
        })
}
