//! Feature arena
//!
//! The store owns every [`Feature`]. Features are appended and never moved,
//! so a [`FeatureId`] stays valid until [`FeatureStore::clear`].

use super::{Feature, FeatureId, FeatureKind};
use crate::error::AlignError;

/// Owner of all features, with per-kind lists in insertion order
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
    by_kind: [Vec<FeatureId>; FeatureKind::COUNT],
    max_len: i64,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature and return its id
    pub fn insert(&mut self, feature: Feature) -> FeatureId {
        let id = FeatureId(self.features.len());
        self.max_len = self.max_len.max(feature.reference_range.len());
        self.by_kind[feature.kind.ordinal()].push(id);
        self.features.push(feature);
        id
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id.index())
    }

    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        self.features.get_mut(id.index())
    }

    /// Like [`FeatureStore::get`] but reports unknown ids as an error
    pub fn try_get(&self, id: FeatureId) -> Result<&Feature, AlignError> {
        self.get(id).ok_or(AlignError::UnknownFeature {
            what: "feature",
            id: id.index(),
        })
    }

    /// Features of one kind in insertion order
    ///
    /// The iterator borrows the store and can be recreated at any time.
    pub fn by_kind(&self, kind: FeatureKind) -> impl Iterator<Item = (FeatureId, &Feature)> + '_ {
        self.by_kind[kind.ordinal()]
            .iter()
            .map(move |&id| (id, &self.features[id.index()]))
    }

    /// Ids of one kind in insertion order
    pub fn ids_of_kind(&self, kind: FeatureKind) -> &[FeatureId] {
        &self.by_kind[kind.ordinal()]
    }

    /// All features in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> + '_ {
        self.features
            .iter()
            .enumerate()
            .map(|(i, f)| (FeatureId(i), f))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn count_of_kind(&self, kind: FeatureKind) -> usize {
        self.by_kind[kind.ordinal()].len()
    }

    /// Longest reference range seen so far
    ///
    /// Bounds how far back a window query has to look in a list sorted by
    /// start coordinate.
    pub fn max_len(&self) -> i64 {
        self.max_len
    }

    /// Drop every feature
    pub fn clear(&mut self) {
        self.features.clear();
        for list in self.by_kind.iter_mut() {
            list.clear();
        }
        self.max_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Range, Strand};

    fn feature(kind: FeatureKind, min: i64, max: i64) -> Feature {
        Feature::new(kind, Range::new(min, max), Strand::Forward)
    }

    #[test]
    fn test_insert_returns_sequential_ids() {
        let mut store = FeatureStore::new();
        let a = store.insert(feature(FeatureKind::Exon, 1, 10));
        let b = store.insert(feature(FeatureKind::Match, 5, 8));
        assert_eq!(a, FeatureId(0));
        assert_eq!(b, FeatureId(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_by_kind_in_insertion_order() {
        let mut store = FeatureStore::new();
        store.insert(feature(FeatureKind::Match, 50, 60));
        store.insert(feature(FeatureKind::Exon, 1, 10));
        store.insert(feature(FeatureKind::Match, 10, 20));

        let matches: Vec<i64> = store
            .by_kind(FeatureKind::Match)
            .map(|(_, f)| f.reference_range.min())
            .collect();
        assert_eq!(matches, vec![50, 10]);

        // restartable
        assert_eq!(store.by_kind(FeatureKind::Match).count(), 2);
        assert_eq!(store.by_kind(FeatureKind::Intron).count(), 0);
    }

    #[test]
    fn test_max_len_tracks_longest() {
        let mut store = FeatureStore::new();
        store.insert(feature(FeatureKind::Match, 1, 10));
        store.insert(feature(FeatureKind::Match, 100, 399));
        store.insert(feature(FeatureKind::Match, 5, 6));
        assert_eq!(store.max_len(), 300);
    }

    #[test]
    fn test_clear() {
        let mut store = FeatureStore::new();
        store.insert(feature(FeatureKind::Exon, 1, 10));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.count_of_kind(FeatureKind::Exon), 0);
        assert_eq!(store.max_len(), 0);
    }

    #[test]
    fn test_try_get_unknown() {
        let store = FeatureStore::new();
        assert!(store.try_get(FeatureId(3)).is_err());
    }
}
