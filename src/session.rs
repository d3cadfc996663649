//! Load session: ingestion, finalization and incremental merges
//!
//! A [`LoadSession`] owns the feature store and the sequence registry for
//! one loaded data set. Raw records go in through
//! [`LoadSession::create_feature`]; [`LoadSession::finalize`] then
//! computes extents, reconstructs transcripts and scores alignments for
//! every sequence not finalized yet. Later batches go through
//! [`LoadSession::merge`], which leaves finalized sequences alone.
//!
//! # Example
//!
//! ```
//! use ferro_align::coords::Strand;
//! use ferro_align::feature::FeatureKind;
//! use ferro_align::identity::segment::ReferenceSequence;
//! use ferro_align::session::{LoadSession, RawFeature};
//! use ferro_align::LoadConfig;
//!
//! let mut session = LoadSession::new(LoadConfig::default());
//! session
//!     .create_feature(
//!         RawFeature::new(FeatureKind::Match, 1, 8, Strand::Forward)
//!             .with_match_name("EST1")
//!             .with_match(1, 8, Strand::Forward)
//!             .with_residues("ACGAACGT"),
//!     )
//!     .unwrap();
//!
//! let report = session.finalize(&ReferenceSequence::from_start("ACGTACGT"));
//! assert_eq!(report.scoring.scored, 1);
//! ```

use crate::config::LoadConfig;
use crate::coords::{Range, Strand, StrandFilter};
use crate::error::AlignError;
use crate::extent::extent_range;
use crate::feature::{Feature, FeatureId, FeatureKind, FeatureStore, GapRange};
use crate::identity::segment::ReferenceSequence;
use crate::identity::{IdentityScorer, ScoringReport};
use crate::sequence::naming::strip_legacy_suffix;
use crate::sequence::{AggregateId, AggregateKind, SequenceInfo, SequenceRegistry};
use crate::transcript::{reconstruct_transcript, ReconstructionReport};
use serde::{Deserialize, Serialize};

fn default_frame() -> u8 {
    1
}

/// Largest coordinate magnitude accepted from a record
///
/// Keeps every length and `max + 1` computation far from overflow.
pub const MAX_COORDINATE: i64 = 1 << 48;

fn check_coordinate(what: &str, value: i64) -> Result<i64, AlignError> {
    if !(-MAX_COORDINATE..=MAX_COORDINATE).contains(&value) {
        return Err(AlignError::InvalidCoordinates {
            msg: format!("{} {} is out of range", what, value),
        });
    }
    Ok(value)
}

/// One feature record as produced by a parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    pub kind: FeatureKind,
    #[serde(default)]
    pub score: Option<f64>,
    /// Percent identity computed by the producer
    #[serde(default)]
    pub percent_id: Option<f64>,
    #[serde(default)]
    pub phase: Option<u8>,

    /// Reference sequence name; informational only
    #[serde(default)]
    pub ref_name: Option<String>,
    pub ref_start: i64,
    pub ref_end: i64,
    #[serde(default)]
    pub ref_strand: Strand,
    #[serde(default = "default_frame")]
    pub ref_frame: u8,

    #[serde(default)]
    pub match_name: Option<String>,
    #[serde(default)]
    pub match_start: Option<i64>,
    #[serde(default)]
    pub match_end: Option<i64>,
    #[serde(default)]
    pub match_strand: Strand,
    #[serde(default)]
    pub match_residues: Option<String>,

    #[serde(default)]
    pub id_tag: Option<String>,
    #[serde(default)]
    pub gaps: Vec<GapRange>,

    /// Descriptive columns for the match sequence
    #[serde(default, flatten)]
    pub info: SequenceInfo,
}

impl RawFeature {
    pub fn new(kind: FeatureKind, ref_start: i64, ref_end: i64, ref_strand: Strand) -> Self {
        Self {
            kind,
            score: None,
            percent_id: None,
            phase: None,
            ref_name: None,
            ref_start,
            ref_end,
            ref_strand,
            ref_frame: 1,
            match_name: None,
            match_start: None,
            match_end: None,
            match_strand: Strand::Forward,
            match_residues: None,
            id_tag: None,
            gaps: Vec::new(),
            info: SequenceInfo::default(),
        }
    }

    pub fn with_match_name(mut self, name: impl Into<String>) -> Self {
        self.match_name = Some(name.into());
        self
    }

    pub fn with_id_tag(mut self, tag: impl Into<String>) -> Self {
        self.id_tag = Some(tag.into());
        self
    }

    pub fn with_match(mut self, start: i64, end: i64, strand: Strand) -> Self {
        self.match_start = Some(start);
        self.match_end = Some(end);
        self.match_strand = strand;
        self
    }

    pub fn with_residues(mut self, residues: impl Into<String>) -> Self {
        self.match_residues = Some(residues.into());
        self
    }

    pub fn with_frame(mut self, frame: u8) -> Self {
        self.ref_frame = frame;
        self
    }

    pub fn with_phase(mut self, phase: u8) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_percent_id(mut self, percent_id: f64) -> Self {
        self.percent_id = Some(percent_id);
        self
    }

    pub fn with_gaps(mut self, gaps: Vec<GapRange>) -> Self {
        self.gaps = gaps;
        self
    }

    pub fn with_info(mut self, info: SequenceInfo) -> Self {
        self.info = info;
        self
    }

    fn match_range(&self) -> Result<Option<Range>, AlignError> {
        match (self.match_start, self.match_end) {
            (Some(start), Some(end)) => Ok(Some(Range::new(
                check_coordinate("match start", start)?,
                check_coordinate("match end", end)?,
            ))),
            (None, None) => Ok(None),
            _ => Err(AlignError::InvalidCoordinates {
                msg: "match start and end must be given together".to_string(),
            }),
        }
    }

    fn to_feature(&self) -> Result<Feature, AlignError> {
        if !(1..=3).contains(&self.ref_frame) {
            return Err(AlignError::InvalidCoordinates {
                msg: format!("reading frame {} is not in 1..=3", self.ref_frame),
            });
        }
        if let Some(phase) = self.phase.filter(|p| *p > 2) {
            return Err(AlignError::InvalidCoordinates {
                msg: format!("phase {} is not in 0..=2", phase),
            });
        }

        let reference = Range::new(
            check_coordinate("reference start", self.ref_start)?,
            check_coordinate("reference end", self.ref_end)?,
        );
        let matched = self.match_range()?;
        check_gaps(&self.gaps, reference, matched)?;

        let mut feature = Feature::new(self.kind, reference, self.ref_strand)
            .with_frame(self.ref_frame)
            .with_phase(self.phase)
            .with_gaps(self.gaps.clone());

        if let Some(range) = matched {
            feature = feature.with_match(range, self.match_strand);
        }
        feature.score = self.score;
        feature.identity = self.percent_id;
        Ok(feature)
    }
}

/// Gap blocks must lie inside the feature's reference and match ranges and
/// must not overlap each other on either side
fn check_gaps(
    gaps: &[GapRange],
    reference: Range,
    matched: Option<Range>,
) -> Result<(), AlignError> {
    if gaps.is_empty() {
        return Ok(());
    }
    let Some(matched) = matched else {
        return Err(AlignError::InvalidCoordinates {
            msg: "gapped alignment has no match coordinates".to_string(),
        });
    };

    for gap in gaps {
        for r in [gap.reference, gap.matched] {
            check_coordinate("gap start", r.min())?;
            check_coordinate("gap end", r.max())?;
        }
        if !reference.contains_range(&gap.reference) {
            return Err(AlignError::InvalidCoordinates {
                msg: format!(
                    "gap block {} lies outside reference range {}",
                    gap.reference, reference
                ),
            });
        }
        if !matched.contains_range(&gap.matched) {
            return Err(AlignError::InvalidCoordinates {
                msg: format!("gap block {} lies outside match range {}", gap.matched, matched),
            });
        }
    }

    let mut blocks: Vec<&GapRange> = gaps.iter().collect();
    blocks.sort_by_key(|g| (g.reference.min(), g.reference.max()));
    for pair in blocks.windows(2) {
        if pair[0].reference.overlaps(&pair[1].reference) {
            return Err(AlignError::InvalidCoordinates {
                msg: format!(
                    "gap blocks {} and {} overlap",
                    pair[0].reference, pair[1].reference
                ),
            });
        }
    }
    blocks.sort_by_key(|g| (g.matched.min(), g.matched.max()));
    for pair in blocks.windows(2) {
        if pair[0].matched.overlaps(&pair[1].matched) {
            return Err(AlignError::InvalidCoordinates {
                msg: format!("gap blocks {} and {} overlap", pair[0].matched, pair[1].matched),
            });
        }
    }
    Ok(())
}

/// Declared span of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSpan {
    pub name: String,
    #[serde(default)]
    pub strand: Strand,
    pub start: i64,
    pub end: i64,
}

/// A batch of records loaded together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureBatch {
    #[serde(default)]
    pub features: Vec<RawFeature>,
    #[serde(default)]
    pub transcripts: Vec<TranscriptSpan>,
}

impl FeatureBatch {
    pub fn new(features: Vec<RawFeature>) -> Self {
        Self {
            features,
            transcripts: Vec::new(),
        }
    }

    /// Parse a batch from JSON
    ///
    /// ```
    /// use ferro_align::session::FeatureBatch;
    ///
    /// let batch = FeatureBatch::from_json(
    ///     r#"{"features": [{"kind": "exon", "ref_start": 100, "ref_end": 200,
    ///                       "ref_strand": "+", "match_name": "T1"}]}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(batch.features.len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AlignError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.transcripts.is_empty()
    }
}

/// What a finalization pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeReport {
    /// Sequences finalized in this pass
    pub sequences: usize,
    pub reconstruction: ReconstructionReport,
    pub scoring: ScoringReport,
}

/// What a merge did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub loaded: usize,
    /// Records rejected with a structural error
    pub skipped: usize,
    pub finalize: FinalizeReport,
}

/// Owner of the shared state of one loaded data set
#[derive(Debug, Clone, Default)]
pub struct LoadSession {
    config: LoadConfig,
    store: FeatureStore,
    registry: SequenceRegistry,
    /// Alignments loaded since the last finalization
    unscored: Vec<FeatureId>,
}

impl LoadSession {
    pub fn new(config: LoadConfig) -> Self {
        Self {
            config,
            store: FeatureStore::new(),
            registry: SequenceRegistry::new(),
            unscored: Vec::new(),
        }
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn registry(&self) -> &SequenceRegistry {
        &self.registry
    }

    /// Feature by id
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.store.get(id)
    }

    /// Sequence by name on a strand
    pub fn find_sequence(&self, name: &str, strand: Strand) -> Option<AggregateId> {
        self.registry.find(name, strand)
    }

    /// Member features of a sequence, in draw order
    pub fn sequence_features(&self, aggregate: AggregateId) -> impl Iterator<Item = &Feature> + '_ {
        self.registry
            .get(aggregate)
            .map(|seq| seq.features())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&id| self.store.get(id))
    }

    /// Store one raw record
    ///
    /// Alignment and transcript kinds join the sequence named by
    /// `match_name` (or `id_tag`) on the record's reference strand. Nothing
    /// is stored when the record is rejected.
    pub fn create_feature(&mut self, raw: RawFeature) -> Result<FeatureId, AlignError> {
        let feature = raw.to_feature()?;

        let aggregate = match raw.kind.sequence_kind() {
            Some(kind) => {
                let name = raw.match_name.as_deref().map(|name| {
                    if self.config.strip_legacy_suffixes {
                        strip_legacy_suffix(name, raw.kind)
                    } else {
                        name
                    }
                });
                let id = self.registry.find_or_create(
                    name,
                    raw.id_tag.as_deref(),
                    raw.ref_strand,
                    kind,
                )?;
                self.check_accepts(id, raw.kind)?;
                if let Some(residues) = raw.match_residues.as_ref().filter(|r| !r.is_empty()) {
                    self.registry.set_sequence_data(id, residues.clone())?;
                }
                if !raw.info.is_empty() {
                    self.registry.try_get_mut(id)?.info.fill_from(&raw.info);
                }
                Some(id)
            }
            None => None,
        };

        let id = self.store.insert(feature);
        if let Some(aggregate) = aggregate {
            self.registry.attach_feature(&mut self.store, aggregate, id)?;
        }
        if raw.kind.is_alignment() {
            self.unscored.push(id);
        }
        Ok(id)
    }

    fn check_accepts(&self, aggregate: AggregateId, kind: FeatureKind) -> Result<(), AlignError> {
        match self.registry.get(aggregate) {
            Some(seq) if !seq.kind.accepts(kind) => Err(AlignError::IncompatibleFeature {
                feature_kind: kind.to_string(),
                sequence_kind: seq.kind.to_string(),
                sequence: seq.display_name().to_string(),
            }),
            Some(_) => Ok(()),
            None => Err(AlignError::UnknownFeature {
                what: "sequence",
                id: aggregate.index(),
            }),
        }
    }

    /// Record the declared span of a transcript, creating it if needed
    pub fn add_transcript_span(
        &mut self,
        name: &str,
        strand: Strand,
        range: Range,
    ) -> Result<AggregateId, AlignError> {
        let id = self
            .registry
            .find_or_create(Some(name), None, strand, AggregateKind::Transcript)?;
        let seq = self.registry.try_get_mut(id)?;
        if seq.kind != AggregateKind::Transcript {
            return Err(AlignError::IncompatibleFeature {
                feature_kind: "transcript span".to_string(),
                sequence_kind: seq.kind.to_string(),
                sequence: seq.display_name().to_string(),
            });
        }
        seq.known_span = Some(match seq.known_span {
            Some(span) => span.union(&range),
            None => range,
        });
        Ok(id)
    }

    fn add_span_record(&mut self, span: &TranscriptSpan) -> Result<AggregateId, AlignError> {
        let range = Range::new(
            check_coordinate("span start", span.start)?,
            check_coordinate("span end", span.end)?,
        );
        self.add_transcript_span(&span.name, span.strand, range)
    }

    /// Attach residues to a sequence after loading
    ///
    /// Features already scored keep their identity; features that failed
    /// for lack of residues are picked up by [`Self::rescore`].
    pub fn set_sequence_data(
        &mut self,
        aggregate: AggregateId,
        residues: impl Into<String>,
    ) -> Result<(), AlignError> {
        self.registry.set_sequence_data(aggregate, residues.into())
    }

    fn compute_extents(&mut self, aggregate: AggregateId) {
        let Some(seq) = self.registry.get(aggregate) else {
            return;
        };
        let known_span = seq.known_span;
        let own_strand = seq.strand;
        let extents: Vec<(Strand, Option<Range>)> = [Strand::Forward, Strand::Reverse]
            .into_iter()
            .map(|strand| {
                let features = seq.features().iter().filter_map(|&id| self.store.get(id));
                let mut extent = extent_range(features, StrandFilter::Only(strand));
                if strand == own_strand {
                    if let Some(span) = known_span {
                        extent = Some(extent.map_or(span, |e| e.union(&span)));
                    }
                }
                (strand, extent)
            })
            .collect();

        if let Some(seq) = self.registry.get_mut(aggregate) {
            for (strand, extent) in extents {
                seq.set_extent(strand, extent);
            }
        }
    }

    /// Alignment features of the given sequences
    fn alignment_ids(&self, aggregates: &[AggregateId]) -> Vec<FeatureId> {
        aggregates
            .iter()
            .filter_map(|&agg| self.registry.get(agg))
            .flat_map(|seq| seq.features().iter().copied())
            .filter(|&id| {
                self.store
                    .get(id)
                    .map(|f| f.kind.is_alignment())
                    .unwrap_or(false)
            })
            .collect()
    }

    fn score(&mut self, ids: &[FeatureId], reference: &ReferenceSequence<'_>) -> ScoringReport {
        let mut scorer = IdentityScorer::new(self.config.blast_mode);

        #[cfg(feature = "parallel")]
        crate::parallel::score_features_parallel(
            &mut scorer,
            &mut self.store,
            &self.registry,
            reference,
            ids,
        );
        #[cfg(not(feature = "parallel"))]
        scorer.score_all(&mut self.store, &self.registry, reference, ids.iter().copied());

        scorer.finish()
    }

    /// Complete every sequence that is not finalized yet
    ///
    /// Computes extents, reconstructs transcripts and scores alignments,
    /// in that order, then marks the sequences finalized. Every alignment
    /// loaded since the last call is scored, including ones attached to
    /// sequences finalized earlier. Errors are logged and counted;
    /// finalization always runs to the end.
    pub fn finalize(&mut self, reference: &ReferenceSequence<'_>) -> FinalizeReport {
        let pending = self.registry.pending();
        let mut report = FinalizeReport {
            sequences: pending.len(),
            ..FinalizeReport::default()
        };
        if pending.is_empty() && self.unscored.is_empty() {
            return report;
        }

        for &aggregate in &pending {
            self.compute_extents(aggregate);
        }

        if self.config.reconstruct_transcripts {
            for &aggregate in &pending {
                match reconstruct_transcript(&mut self.store, &mut self.registry, aggregate) {
                    Ok(r) => report.reconstruction.merge(&r),
                    Err(e) => log::warn!("Failed to reconstruct {}: {}", aggregate, e),
                }
            }
        }

        if self.config.score_identities {
            let ids = std::mem::take(&mut self.unscored);
            report.scoring = self.score(&ids, reference);
        } else {
            self.unscored.clear();
        }

        for &aggregate in &pending {
            if let Some(seq) = self.registry.get_mut(aggregate) {
                seq.finalized = true;
            }
        }

        log::info!(
            "Finalized {} sequences: {} features created, {} alignments scored",
            report.sequences,
            report.reconstruction.total(),
            report.scoring.scored
        );
        report
    }

    /// Score every alignment still without an identity, finalized or not
    ///
    /// For use after residues arrive for sequences that were scored
    /// without them.
    pub fn rescore(&mut self, reference: &ReferenceSequence<'_>) -> ScoringReport {
        let all: Vec<AggregateId> = self.registry.iter().map(|(id, _)| id).collect();
        let ids = self.alignment_ids(&all);
        self.score(&ids, reference)
    }

    /// Load a batch into the session and finalize only what it added
    ///
    /// Records rejected with a structural error are skipped and counted;
    /// the rest of the batch is still loaded.
    pub fn merge(&mut self, batch: FeatureBatch, reference: &ReferenceSequence<'_>) -> MergeReport {
        let mut report = MergeReport::default();

        for span in batch.transcripts {
            if let Err(e) = self.add_span_record(&span) {
                log::warn!("Skipping transcript span '{}': {}", span.name, e);
                report.skipped += 1;
            }
        }

        for (i, raw) in batch.features.into_iter().enumerate() {
            match self.create_feature(raw) {
                Ok(_) => report.loaded += 1,
                Err(e) => {
                    log::warn!("Skipping record {}: {}", i, e);
                    report.skipped += 1;
                }
            }
        }

        report.finalize = self.finalize(reference);
        report
    }

    /// Discard everything loaded so far
    pub fn reset(&mut self) {
        self.store.clear();
        self.registry.clear();
        self.unscored.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exon(name: &str, start: i64, end: i64) -> RawFeature {
        RawFeature::new(FeatureKind::Exon, start, end, Strand::Forward).with_match_name(name)
    }

    #[test]
    fn test_create_feature_normalizes_range() {
        let mut session = LoadSession::default();
        let id = session.create_feature(exon("T1", 200, 100)).unwrap();
        assert_eq!(
            session.feature(id).unwrap().reference_range,
            Range::new(100, 200)
        );
    }

    #[test]
    fn test_create_feature_without_key() {
        let mut session = LoadSession::default();
        let raw = RawFeature::new(FeatureKind::Match, 1, 10, Strand::Forward);
        let err = session.create_feature(raw).unwrap_err();
        assert!(matches!(err, AlignError::InvalidKey));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_annotation_kinds_have_no_sequence() {
        let mut session = LoadSession::default();
        let raw = RawFeature::new(FeatureKind::PolyASite, 500, 500, Strand::Forward);
        let id = session.create_feature(raw).unwrap();
        assert_eq!(session.feature(id).unwrap().owning_sequence, None);
        assert!(session.registry().is_empty());
    }

    #[test]
    fn test_incompatible_kind_rejected_before_insert() {
        let mut session = LoadSession::default();
        session.create_feature(exon("X1", 1, 10)).unwrap();

        let raw = RawFeature::new(FeatureKind::Match, 1, 10, Strand::Forward)
            .with_match_name("X1")
            .with_match(1, 10, Strand::Forward);
        let err = session.create_feature(raw).unwrap_err();
        assert!(matches!(err, AlignError::IncompatibleFeature { .. }));
        assert_eq!(session.store().len(), 1);

        // same name on the other strand is a different sequence
        let raw = RawFeature::new(FeatureKind::Match, 1, 10, Strand::Reverse)
            .with_match_name("X1")
            .with_match(1, 10, Strand::Forward);
        assert!(session.create_feature(raw).is_ok());
    }

    #[test]
    fn test_invalid_frame_rejected() {
        let mut session = LoadSession::default();
        let err = session
            .create_feature(exon("T1", 1, 10).with_frame(4))
            .unwrap_err();
        assert!(matches!(err, AlignError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_huge_coordinates_rejected() {
        let mut session = LoadSession::default();
        let err = session
            .create_feature(exon("T1", 1, i64::MAX))
            .unwrap_err();
        assert!(matches!(err, AlignError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_half_match_range_rejected() {
        let mut session = LoadSession::default();
        let mut raw = RawFeature::new(FeatureKind::Match, 1, 10, Strand::Forward)
            .with_match_name("EST1");
        raw.match_start = Some(1);
        assert!(session.create_feature(raw).is_err());
    }

    #[test]
    fn test_transcript_span_extends_extent() {
        let mut session = LoadSession::default();
        let tx = session
            .add_transcript_span("T1", Strand::Forward, Range::new(90, 410))
            .unwrap();
        session.create_feature(exon("T1", 100, 200)).unwrap();
        session.finalize(&ReferenceSequence::from_start(""));

        let seq = session.registry().get(tx).unwrap();
        assert_eq!(seq.extent_forward, Some(Range::new(90, 410)));
        assert_eq!(seq.extent_reverse, None);
        assert!(seq.finalized);
    }

    #[test]
    fn test_finalize_is_incremental() {
        let mut session = LoadSession::default();
        session.create_feature(exon("T1", 100, 200)).unwrap();
        let reference = ReferenceSequence::from_start("");

        let first = session.finalize(&reference);
        assert_eq!(first.sequences, 1);
        assert_eq!(first.reconstruction.utrs, 1);

        let second = session.finalize(&reference);
        assert_eq!(second, FinalizeReport::default());
    }

    #[test]
    fn test_reconstruction_can_be_disabled() {
        let mut session = LoadSession::new(LoadConfig::default().with_reconstruction(false));
        session.create_feature(exon("T1", 100, 200)).unwrap();
        let report = session.finalize(&ReferenceSequence::from_start(""));
        assert_eq!(report.reconstruction.total(), 0);
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut session = LoadSession::default();
        session.create_feature(exon("T1", 100, 200)).unwrap();
        session.reset();
        assert!(session.store().is_empty());
        assert!(session.registry().is_empty());
        assert_eq!(session.find_sequence("T1", Strand::Forward), None);
    }
}
