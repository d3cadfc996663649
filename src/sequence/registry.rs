//! Sequence lookup and feature membership

use super::{AggregateId, AggregateKind, SequenceAggregate};
use crate::coords::{Range, Strand};
use crate::error::AlignError;
use crate::feature::{FeatureId, FeatureStore};
use std::collections::HashMap;

/// Owner of all sequences, keyed by name or id tag plus strand
#[derive(Debug, Clone, Default)]
pub struct SequenceRegistry {
    aggregates: Vec<SequenceAggregate>,
    by_name: HashMap<(String, Strand), AggregateId>,
    by_tag: HashMap<(String, Strand), AggregateId>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the sequence with this name or id tag on `strand`, creating it
    /// with `kind` if there is none
    ///
    /// A name match wins over an id tag match. Whichever key the existing
    /// sequence was missing is filled in from the arguments.
    pub fn find_or_create(
        &mut self,
        name: Option<&str>,
        id_tag: Option<&str>,
        strand: Strand,
        kind: AggregateKind,
    ) -> Result<AggregateId, AlignError> {
        let name = name.filter(|n| !n.is_empty());
        let id_tag = id_tag.filter(|t| !t.is_empty());
        if name.is_none() && id_tag.is_none() {
            return Err(AlignError::InvalidKey);
        }

        let found = name
            .and_then(|n| self.by_name.get(&(n.to_string(), strand)))
            .or_else(|| id_tag.and_then(|t| self.by_tag.get(&(t.to_string(), strand))))
            .copied();

        if let Some(id) = found {
            self.fill_missing_keys(id, name, id_tag);
            return Ok(id);
        }

        let id = AggregateId(self.aggregates.len());
        self.aggregates.push(SequenceAggregate::new(
            name.map(str::to_string),
            id_tag.map(str::to_string),
            kind,
            strand,
        ));
        if let Some(n) = name {
            self.by_name.insert((n.to_string(), strand), id);
        }
        if let Some(t) = id_tag {
            self.by_tag.insert((t.to_string(), strand), id);
        }
        log::debug!(
            "Created {} sequence '{}' on strand {}",
            kind,
            name.or(id_tag).unwrap_or_default(),
            strand
        );
        Ok(id)
    }

    fn fill_missing_keys(&mut self, id: AggregateId, name: Option<&str>, id_tag: Option<&str>) {
        let seq = &mut self.aggregates[id.index()];
        let strand = seq.strand;
        if seq.name.is_none() {
            if let Some(n) = name {
                seq.name = Some(n.to_string());
                self.by_name.insert((n.to_string(), strand), id);
            }
        }
        if seq.id_tag.is_none() {
            if let Some(t) = id_tag {
                seq.id_tag = Some(t.to_string());
                self.by_tag.insert((t.to_string(), strand), id);
            }
        }
    }

    /// Look up an existing sequence by name and strand
    pub fn find(&self, name: &str, strand: Strand) -> Option<AggregateId> {
        self.by_name.get(&(name.to_string(), strand)).copied()
    }

    /// Insert `feature` into the sequence's sorted feature list
    ///
    /// Order is `(reference min, kind ordinal)`; features with equal keys
    /// keep their arrival order.
    pub fn attach_feature(
        &mut self,
        store: &mut FeatureStore,
        aggregate: AggregateId,
        feature: FeatureId,
    ) -> Result<(), AlignError> {
        let seq = self
            .aggregates
            .get_mut(aggregate.index())
            .ok_or(AlignError::UnknownFeature {
                what: "sequence",
                id: aggregate.index(),
            })?;

        let key = {
            let f = store.try_get(feature)?;
            if !seq.kind.accepts(f.kind) {
                return Err(AlignError::IncompatibleFeature {
                    feature_kind: f.kind.to_string(),
                    sequence_kind: seq.kind.to_string(),
                    sequence: seq.display_name().to_string(),
                });
            }
            f.sort_key()
        };

        let pos = seq.features.partition_point(|&id| {
            store
                .get(id)
                .map(|f| f.sort_key() <= key)
                .unwrap_or(false)
        });
        seq.features.insert(pos, feature);

        if let Some(f) = store.get_mut(feature) {
            f.owning_sequence = Some(aggregate);
        }
        Ok(())
    }

    /// Attach residues to a sequence
    ///
    /// Identical data is accepted again; different data is an error and the
    /// existing residues are kept.
    pub fn set_sequence_data(
        &mut self,
        aggregate: AggregateId,
        residues: String,
    ) -> Result<(), AlignError> {
        let seq = self.try_get_mut(aggregate)?;
        match &seq.sequence_data {
            Some(existing) if *existing != residues => Err(AlignError::SequenceDataMismatch {
                sequence: seq.display_name().to_string(),
                existing_len: existing.len(),
                new_len: residues.len(),
            }),
            Some(_) => Ok(()),
            None => {
                seq.sequence_data = Some(residues);
                Ok(())
            }
        }
    }

    /// Member features overlapping `range`
    ///
    /// Uses the store's longest feature to bound the backward search in the
    /// sorted member list.
    pub fn features_in_range(
        &self,
        store: &FeatureStore,
        aggregate: AggregateId,
        range: Range,
    ) -> Vec<FeatureId> {
        let Some(seq) = self.get(aggregate) else {
            return Vec::new();
        };

        let earliest = range.min().saturating_sub(store.max_len());
        let start = seq.features.partition_point(|&id| {
            store
                .get(id)
                .map(|f| f.reference_range.min() < earliest)
                .unwrap_or(false)
        });

        seq.features[start..]
            .iter()
            .copied()
            .filter_map(|id| store.get(id).map(|f| (id, f)))
            .take_while(|(_, f)| f.reference_range.min() <= range.max())
            .filter(|(_, f)| f.reference_range.overlaps(&range))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn get(&self, id: AggregateId) -> Option<&SequenceAggregate> {
        self.aggregates.get(id.index())
    }

    pub fn get_mut(&mut self, id: AggregateId) -> Option<&mut SequenceAggregate> {
        self.aggregates.get_mut(id.index())
    }

    pub fn try_get_mut(&mut self, id: AggregateId) -> Result<&mut SequenceAggregate, AlignError> {
        self.aggregates
            .get_mut(id.index())
            .ok_or(AlignError::UnknownFeature {
                what: "sequence",
                id: id.index(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (AggregateId, &SequenceAggregate)> + '_ {
        self.aggregates
            .iter()
            .enumerate()
            .map(|(i, s)| (AggregateId(i), s))
    }

    /// Ids of sequences not yet finalized
    pub fn pending(&self) -> Vec<AggregateId> {
        self.iter()
            .filter(|(_, s)| !s.finalized)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    pub fn clear(&mut self) {
        self.aggregates.clear();
        self.by_name.clear();
        self.by_tag.clear();
    }
}
