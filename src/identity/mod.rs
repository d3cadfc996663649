//! Percent identity of alignment features
//!
//! Compares the reference segment a Match or ShortRead feature covers
//! with the corresponding residues of its match sequence:
//!
//! - ungapped alignments compare `reference_range.len() / num_frames`
//!   residues position by position;
//! - gapped alignments walk each `(reference, match)` block, driven by the
//!   length of the match side.
//!
//! The match sequence is walked forward from `match_range.min` when the
//! match strand equals the reference strand and backward from
//! `match_range.max` otherwise. Positions unavailable on either side (a
//! reference clipped at its ends, a match index past the match residues)
//! are left out of both counts.
//!
//! TBlastN and TBlastX match residues are compared as peptides. Gapped
//! alignments in those two modes are not implemented and fail with
//! [`AlignError::UnsupportedScoringMode`].
//!
//! # Example
//!
//! ```
//! use ferro_align::config::BlastMode;
//! use ferro_align::coords::{Range, Strand};
//! use ferro_align::feature::{Feature, FeatureKind};
//! use ferro_align::identity::{compute_identity, segment::ReferenceSequence};
//!
//! let reference = ReferenceSequence::from_start("ACGTACGT");
//! let feature = Feature::new(FeatureKind::Match, Range::new(1, 8), Strand::Forward)
//!     .with_match(Range::new(1, 8), Strand::Forward);
//!
//! let outcome =
//!     compute_identity(&feature, &reference, Some("ACGAACGT"), "EST1", BlastMode::BlastN)
//!         .unwrap();
//! assert_eq!(outcome.identity, 87.5);
//! ```

pub mod codon;
pub mod segment;

use crate::config::BlastMode;
use crate::coords::{Range, Strand};
use crate::error::{AlignError, ErrorCode};
use crate::feature::{Feature, FeatureId, FeatureStore};
use crate::sequence::SequenceRegistry;
use segment::{extract_segment, ReferenceSegment, ReferenceSequence};
use serde::{Deserialize, Serialize};

/// Result of scoring one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreOutcome {
    /// Percent identity in `[0, 100]`
    pub identity: f64,
    /// Residues actually compared
    pub compared: usize,
    /// Reference segment ran past the reference bounds
    pub clipped: bool,
    /// Part of the reference range the reference sequence covers
    pub available: Option<Range>,
}

/// Per-run scoring counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringReport {
    pub scored: usize,
    /// Features that already carried an identity
    pub skipped: usize,
    pub missing_residues: usize,
    pub unsupported: usize,
    pub clipped: usize,
    pub failed: usize,
}

impl ScoringReport {
    /// Alignments left without an identity
    pub fn unscored(&self) -> usize {
        self.missing_residues + self.unsupported + self.failed
    }

    pub fn merge(&mut self, other: &ScoringReport) {
        self.scored += other.scored;
        self.skipped += other.skipped;
        self.missing_residues += other.missing_residues;
        self.unsupported += other.unsupported;
        self.clipped += other.clipped;
        self.failed += other.failed;
    }
}

/// Match residue at 1-based coordinate `coord`
fn match_residue(residues: &[u8], coord: i64) -> Option<u8> {
    usize::try_from(coord - 1)
        .ok()
        .and_then(|i| residues.get(i))
        .copied()
}

/// Match coordinate of the `step`-th residue of `range`
fn match_coord(range: Range, step: i64, same_direction: bool) -> i64 {
    if same_direction {
        range.min() + step
    } else {
        range.max() - step
    }
}

#[derive(Debug, Default)]
struct Tally {
    matches: usize,
    total: usize,
}

impl Tally {
    fn compare(&mut self, reference: Option<u8>, matched: Option<u8>) {
        if let (Some(r), Some(m)) = (reference, matched) {
            self.total += 1;
            if r.eq_ignore_ascii_case(&m) {
                self.matches += 1;
            }
        }
    }

    fn identity(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.matches as f64 / self.total as f64
        }
    }
}

/// Index into the segment of the first residue of a gapped block
fn block_start(feature: &Feature, block: Range, segment: &ReferenceSegment, divisor: i64) -> i64 {
    let from_five_prime = match feature.reference_strand {
        Strand::Forward => block.min() - feature.reference_range.min(),
        Strand::Reverse => feature.reference_range.max() - block.max(),
    };
    (from_five_prime - segment.frame_offset()).div_euclid(divisor)
}

fn segment_residue(segment: &ReferenceSegment, index: i64) -> Option<u8> {
    usize::try_from(index).ok().and_then(|i| segment.residue(i))
}

/// Percent identity of one alignment feature
///
/// Pure: the feature is not modified. `match_name` is only used in error
/// messages.
pub fn compute_identity(
    feature: &Feature,
    reference: &ReferenceSequence<'_>,
    match_residues: Option<&str>,
    match_name: &str,
    mode: BlastMode,
) -> Result<ScoreOutcome, AlignError> {
    if feature.is_gapped() && matches!(mode, BlastMode::TBlastN | BlastMode::TBlastX) {
        return Err(AlignError::UnsupportedScoringMode {
            mode: mode.to_string(),
            shape: "gapped".to_string(),
        });
    }

    let residues = match_residues.ok_or_else(|| AlignError::MissingMatchResidues {
        sequence: match_name.to_string(),
        coords: feature.coords_as_string(),
    })?;
    let match_range = feature
        .match_range
        .ok_or_else(|| AlignError::InvalidCoordinates {
            msg: format!("alignment {} has no match range", feature.reference_range),
        })?;

    let residues = residues.as_bytes();
    let same_direction = feature.match_strand == feature.reference_strand;
    let divisor = mode.num_frames();
    let segment = extract_segment(
        reference,
        feature.reference_range,
        feature.reference_strand,
        feature.reference_frame,
        mode,
    );

    let mut tally = Tally::default();
    if feature.is_gapped() {
        for gap in &feature.gaps {
            let start = block_start(feature, gap.reference, &segment, divisor);
            for step in 0..gap.matched.len() {
                tally.compare(
                    segment_residue(&segment, start + step),
                    match_residue(residues, match_coord(gap.matched, step, same_direction)),
                );
            }
        }
    } else {
        let total_chars = feature.reference_range.len() / divisor;
        for step in 0..total_chars {
            tally.compare(
                segment_residue(&segment, step),
                match_residue(residues, match_coord(match_range, step, same_direction)),
            );
        }
    }

    Ok(ScoreOutcome {
        identity: tally.identity(),
        compared: tally.total,
        clipped: segment.clipped,
        available: segment.available,
    })
}

/// One scoring run over a set of features
///
/// Carries the counts for the run and makes sure the clipped-reference
/// warning is logged once per run.
#[derive(Debug)]
pub struct IdentityScorer {
    mode: BlastMode,
    warned_clipped: bool,
    warned_unsupported: bool,
    report: ScoringReport,
}

impl IdentityScorer {
    pub fn new(mode: BlastMode) -> Self {
        Self {
            mode,
            warned_clipped: false,
            warned_unsupported: false,
            report: ScoringReport::default(),
        }
    }

    pub fn mode(&self) -> BlastMode {
        self.mode
    }

    /// Compute without storing; `None` when the feature needs no scoring
    pub fn evaluate(
        &self,
        store: &FeatureStore,
        registry: &SequenceRegistry,
        reference: &ReferenceSequence<'_>,
        id: FeatureId,
    ) -> Option<Result<ScoreOutcome, AlignError>> {
        let feature = store.get(id)?;
        if !feature.kind.is_alignment() || feature.identity.is_some() {
            return None;
        }

        let owner = feature.owning_sequence.and_then(|agg| registry.get(agg));
        let name = owner.map(|seq| seq.display_name()).unwrap_or("");
        let residues = owner.and_then(|seq| seq.sequence_data.as_deref());

        Some(compute_identity(feature, reference, residues, name, self.mode))
    }

    /// Store the result of [`Self::evaluate`] on the feature and count it
    pub fn record(
        &mut self,
        store: &mut FeatureStore,
        id: FeatureId,
        result: Option<Result<ScoreOutcome, AlignError>>,
    ) {
        let Some(result) = result else {
            if store.get(id).map(|f| f.identity.is_some()).unwrap_or(false) {
                self.report.skipped += 1;
            }
            return;
        };

        match result {
            Ok(outcome) => {
                let Some(feature) = store.get_mut(id) else {
                    return;
                };
                feature.identity = Some(outcome.identity);
                self.report.scored += 1;

                if outcome.clipped {
                    self.report.clipped += 1;
                    let clipped = AlignError::ClippedReference {
                        requested: feature.reference_range.to_string(),
                        available: outcome
                            .available
                            .map(|r| r.to_string())
                            .unwrap_or_else(|| "nothing".to_string()),
                    };
                    if self.warned_clipped {
                        log::debug!("{}", clipped);
                    } else {
                        log::warn!(
                            "{}; only available residues are compared, further clipped alignments are not reported",
                            clipped.detailed_message()
                        );
                        self.warned_clipped = true;
                    }
                }
            }
            Err(e) => {
                match e.code() {
                    ErrorCode::MissingMatchResidues => {
                        self.report.missing_residues += 1;
                        log::warn!("{}", e);
                    }
                    ErrorCode::UnsupportedScoringMode => {
                        self.report.unsupported += 1;
                        if self.warned_unsupported {
                            log::debug!("{}", e);
                        } else {
                            log::warn!("{}", e);
                            self.warned_unsupported = true;
                        }
                    }
                    _ => {
                        self.report.failed += 1;
                        log::warn!("{}", e.detailed_message());
                    }
                }
            }
        }
    }

    /// Score one feature in place
    ///
    /// A feature that already has an identity is left alone.
    pub fn score_feature(
        &mut self,
        store: &mut FeatureStore,
        registry: &SequenceRegistry,
        reference: &ReferenceSequence<'_>,
        id: FeatureId,
    ) -> Option<f64> {
        let result = self.evaluate(store, registry, reference, id);
        self.record(store, id, result);
        store.get(id).and_then(|f| f.identity)
    }

    /// Score every alignment feature in `ids`
    pub fn score_all(
        &mut self,
        store: &mut FeatureStore,
        registry: &SequenceRegistry,
        reference: &ReferenceSequence<'_>,
        ids: impl IntoIterator<Item = FeatureId>,
    ) {
        for id in ids {
            self.score_feature(store, registry, reference, id);
        }
    }

    pub fn report(&self) -> &ScoringReport {
        &self.report
    }

    pub fn finish(self) -> ScoringReport {
        if self.report.unscored() > 0 {
            log::warn!(
                "{} alignments could not be scored",
                self.report.unscored()
            );
        }
        self.report
    }
}
