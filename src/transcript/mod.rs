//! Transcript reconstruction
//!
//! Producers often supply only part of a transcript's structure: exons
//! without CDS, CDS without exons, no introns at all. Reconstruction walks
//! a transcript's sorted features once and fills in what is missing so
//! that every exon is split into CDS and UTR and every gap between exons
//! is covered by an intron.
//!
//! # Policy
//!
//! | Segment has | Created |
//! |-------------|---------|
//! | CDS and/or UTR, no exon | exon spanning their union |
//! | exon only | one UTR covering the whole exon |
//! | exon + CDS | UTR pieces for `exon - CDS` (5' and 3', up to two) |
//! | exon + UTR | CDS pieces for `exon - UTR` |
//! | exon + CDS + UTR | UTR pieces for `exon - (CDS + UTR)` |
//!
//! Introns are created between consecutive exons, and before the first /
//! after the last exon when the transcript's extent reaches further, but
//! never next to an intron the producer already supplied.
//!
//! # Example
//!
//! ```
//! use ferro_align::coords::{Range, Strand};
//! use ferro_align::feature::{Feature, FeatureKind, FeatureStore};
//! use ferro_align::sequence::{AggregateKind, SequenceRegistry};
//! use ferro_align::transcript::reconstruct_transcript;
//!
//! let mut store = FeatureStore::new();
//! let mut registry = SequenceRegistry::new();
//! let tx = registry
//!     .find_or_create(Some("T1"), None, Strand::Forward, AggregateKind::Transcript)
//!     .unwrap();
//!
//! for (kind, min, max) in [(FeatureKind::Exon, 100, 200), (FeatureKind::Exon, 300, 400)] {
//!     let id = store.insert(Feature::new(kind, Range::new(min, max), Strand::Forward));
//!     registry.attach_feature(&mut store, tx, id).unwrap();
//! }
//!
//! let report = reconstruct_transcript(&mut store, &mut registry, tx).unwrap();
//! assert_eq!(report.introns, 1);
//! assert_eq!(report.utrs, 2);
//! ```

use crate::coords::{union_all, Range, Strand};
use crate::error::AlignError;
use crate::feature::{Feature, FeatureId, FeatureKind, FeatureStore};
use crate::sequence::{AggregateId, AggregateKind, SequenceRegistry};
use serde::{Deserialize, Serialize};

/// Counts of features created by reconstruction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionReport {
    pub exons: usize,
    pub cds: usize,
    pub utrs: usize,
    pub introns: usize,
}

impl ReconstructionReport {
    pub fn total(&self) -> usize {
        self.exons + self.cds + self.utrs + self.introns
    }

    pub fn merge(&mut self, other: &ReconstructionReport) {
        self.exons += other.exons;
        self.cds += other.cds;
        self.utrs += other.utrs;
        self.introns += other.introns;
    }

    fn count(&mut self, kind: FeatureKind) {
        match kind {
            FeatureKind::Exon => self.exons += 1,
            FeatureKind::Cds => self.cds += 1,
            FeatureKind::Utr => self.utrs += 1,
            FeatureKind::Intron => self.introns += 1,
            FeatureKind::Match
            | FeatureKind::ShortRead
            | FeatureKind::Variation
            | FeatureKind::PolyASite
            | FeatureKind::Other => {}
        }
    }
}

/// Exon, CDS and UTR pieces collected for one exon position
#[derive(Debug, Default)]
struct Segment {
    exon: Option<FeatureId>,
    cds: Vec<FeatureId>,
    utrs: Vec<FeatureId>,
    span: Option<Range>,
}

impl Segment {
    fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    fn push(&mut self, id: FeatureId, feature: &Feature) {
        match feature.kind {
            FeatureKind::Exon => self.exon = Some(id),
            FeatureKind::Cds => self.cds.push(id),
            FeatureKind::Utr => self.utrs.push(id),
            _ => return,
        }
        self.span = Some(match self.span {
            Some(s) => s.union(&feature.reference_range),
            None => feature.reference_range,
        });
    }

    /// Whether `feature` starts a new segment
    ///
    /// With an exon present, members are the features starting inside it.
    /// Without one, touching CDS/UTR pieces still belong together.
    fn is_closed_by(&self, feature: &Feature, store: &FeatureStore) -> bool {
        let Some(span) = self.span else {
            return false;
        };
        let start = feature.reference_range.min();

        match self.exon.and_then(|id| store.get(id)) {
            Some(exon) => feature.kind == FeatureKind::Exon || start > exon.reference_range.max(),
            None => start > span.max().saturating_add(1),
        }
    }
}

/// Walk state for one transcript
struct Reconstructor<'a> {
    store: &'a mut FeatureStore,
    strand: Strand,
    created: Vec<FeatureId>,
    report: ReconstructionReport,
    prev_exon: Option<Range>,
    intron_since_prev: bool,
    first_exon: Option<Range>,
}

impl<'a> Reconstructor<'a> {
    fn new(store: &'a mut FeatureStore, strand: Strand) -> Self {
        Self {
            store,
            strand,
            created: Vec::new(),
            report: ReconstructionReport::default(),
            prev_exon: None,
            intron_since_prev: false,
            first_exon: None,
        }
    }

    fn create(&mut self, kind: FeatureKind, range: Range, frame: u8, phase: Option<u8>) -> FeatureId {
        let mut feature = Feature::new(kind, range, self.strand)
            .with_frame(frame)
            .with_phase(phase);
        feature.synthesized = true;

        let id = self.store.insert(feature);
        self.created.push(id);
        self.report.count(kind);
        id
    }

    fn range_of(&self, id: FeatureId) -> Option<Range> {
        self.store.get(id).map(|f| f.reference_range)
    }

    fn ranges_of(&self, ids: &[FeatureId]) -> Vec<Range> {
        ids.iter().filter_map(|&id| self.range_of(id)).collect()
    }

    /// Complete the exon/CDS/UTR triad of a segment and place the intron
    /// before it
    fn close(&mut self, segment: Segment) {
        if segment.is_empty() {
            return;
        }
        let Some(exon_id) = self.fill(&segment) else {
            return;
        };
        let Some(exon_range) = self.range_of(exon_id) else {
            return;
        };

        if let Some(prev) = self.prev_exon {
            if !self.intron_since_prev {
                self.intron_between(prev, exon_range, exon_id);
            }
        }

        if self.first_exon.is_none() {
            self.first_exon = Some(exon_range);
        }
        self.prev_exon = Some(exon_range);
        self.intron_since_prev = false;
    }

    /// Create whatever of exon, CDS and UTR is missing; returns the exon
    fn fill(&mut self, segment: &Segment) -> Option<FeatureId> {
        let exon_id = match segment.exon {
            Some(id) => id,
            None => {
                let pieces: Vec<FeatureId> =
                    segment.cds.iter().chain(&segment.utrs).copied().collect();
                let range = union_all(&self.ranges_of(&pieces))?;
                let template = self.store.get(*pieces.first()?)?;
                let (frame, phase) = (template.reference_frame, template.phase);
                self.create(FeatureKind::Exon, range, frame, phase)
            }
        };

        let (exon_range, frame, phase) = {
            let exon = self.store.get(exon_id)?;
            (exon.reference_range, exon.reference_frame, exon.phase)
        };

        let mut children: Vec<FeatureId> =
            segment.cds.iter().chain(&segment.utrs).copied().collect();

        if segment.cds.is_empty() && segment.utrs.is_empty() {
            // no coding evidence at all: treat the exon as non-coding
            children.push(self.create(FeatureKind::Utr, exon_range, frame, phase));
        } else if segment.cds.is_empty() {
            let utrs = self.ranges_of(&segment.utrs);
            for piece in exon_range.subtract_all(&utrs) {
                children.push(self.create(FeatureKind::Cds, piece, frame, phase));
            }
        } else {
            // whatever CDS and supplied UTRs leave uncovered is untranslated
            let covered = self.ranges_of(&children);
            for piece in exon_range.subtract_all(&covered) {
                children.push(self.create(FeatureKind::Utr, piece, frame, phase));
            }
        }

        if let Some(exon) = self.store.get_mut(exon_id) {
            for child in children {
                if !exon.children.contains(&child) {
                    exon.children.push(child);
                }
            }
        }
        Some(exon_id)
    }

    fn intron_between(&mut self, prev: Range, next: Range, next_exon: FeatureId) {
        let Some(gap) = Range::checked(prev.max() + 1, next.min() - 1) else {
            return;
        };
        let frame = self
            .store
            .get(next_exon)
            .map(|f| f.reference_frame)
            .unwrap_or(1);
        self.create(FeatureKind::Intron, gap, frame, None);
    }
}

/// Fill in missing exon, CDS, UTR and intron features of one transcript
///
/// Reads the transcript's extent on its own strand (see
/// [`crate::extent`]) for the leading and trailing introns, so extents
/// should be computed first. Non-transcript sequences are left untouched.
pub fn reconstruct_transcript(
    store: &mut FeatureStore,
    registry: &mut SequenceRegistry,
    aggregate: AggregateId,
) -> Result<ReconstructionReport, AlignError> {
    let (members, strand, extent) = {
        let seq = registry.get(aggregate).ok_or(AlignError::UnknownFeature {
            what: "sequence",
            id: aggregate.index(),
        })?;
        if seq.kind != AggregateKind::Transcript {
            return Ok(ReconstructionReport::default());
        }
        let members: Vec<FeatureId> = seq
            .features()
            .iter()
            .copied()
            .filter(|&id| {
                store
                    .get(id)
                    .map(|f| f.kind.is_transcript_part())
                    .unwrap_or(false)
            })
            .collect();
        let extent = seq.extent(seq.strand).or(seq.known_span);
        (members, seq.strand, extent)
    };

    if members.is_empty() {
        return Ok(ReconstructionReport::default());
    }

    let starts_with_intron = kind_of(store, members.first()) == Some(FeatureKind::Intron);
    let ends_with_intron = kind_of(store, members.last()) == Some(FeatureKind::Intron);

    let mut walk = Reconstructor::new(store, strand);
    let mut segment = Segment::default();

    for &id in &members {
        let Some(feature) = walk.store.get(id) else {
            continue;
        };

        if feature.kind == FeatureKind::Intron {
            let finished = std::mem::take(&mut segment);
            walk.close(finished);
            walk.intron_since_prev = true;
            continue;
        }

        if segment.is_closed_by(feature, walk.store) {
            let finished = std::mem::take(&mut segment);
            walk.close(finished);
            // `close` may have grown the store; look the feature up again
            let Some(feature) = walk.store.get(id) else {
                continue;
            };
            segment.push(id, feature);
        } else {
            segment.push(id, feature);
        }
    }
    walk.close(segment);

    if let Some(extent) = extent {
        if !starts_with_intron {
            if let Some(first) = walk.first_exon {
                if let Some(lead) = Range::checked(extent.min(), first.min() - 1) {
                    walk.create(FeatureKind::Intron, lead, 1, None);
                }
            }
        }
        if !ends_with_intron {
            if let Some(last) = walk.prev_exon {
                if let Some(trail) = Range::checked(last.max() + 1, extent.max()) {
                    walk.create(FeatureKind::Intron, trail, 1, None);
                }
            }
        }
    }

    let created = std::mem::take(&mut walk.created);
    let report = walk.report;
    for id in created {
        registry.attach_feature(store, aggregate, id)?;
    }

    if report.total() > 0 {
        log::debug!(
            "Reconstructed transcript {}: {} exons, {} CDS, {} UTRs, {} introns",
            aggregate,
            report.exons,
            report.cds,
            report.utrs,
            report.introns
        );
    }
    Ok(report)
}

fn kind_of(store: &FeatureStore, id: Option<&FeatureId>) -> Option<FeatureKind> {
    id.and_then(|&id| store.get(id)).map(|f| f.kind)
}
