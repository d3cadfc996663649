//! Alignment and annotation features
//!
//! A [`Feature`] is one record shown by the viewer: a match against the
//! reference, a piece of transcript structure, a variation or a site.
//! Features live in the [`FeatureStore`] arena and refer to each other and
//! to their owning sequence by id.

pub mod store;

pub use store::FeatureStore;

use crate::coords::{Range, Strand};
use crate::sequence::{AggregateId, AggregateKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a feature in the [`FeatureStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub usize);

impl FeatureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of feature
///
/// The declaration order is the ordinal used to break ties when features
/// start at the same reference coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Gapped or ungapped alignment of a match sequence
    Match,
    /// Short-read alignment
    ShortRead,
    Exon,
    Cds,
    Utr,
    Intron,
    Variation,
    #[serde(rename = "polya_site")]
    PolyASite,
    Other,
}

impl FeatureKind {
    pub const COUNT: usize = 9;

    /// All kinds in ordinal order
    pub const ALL: [FeatureKind; Self::COUNT] = [
        FeatureKind::Match,
        FeatureKind::ShortRead,
        FeatureKind::Exon,
        FeatureKind::Cds,
        FeatureKind::Utr,
        FeatureKind::Intron,
        FeatureKind::Variation,
        FeatureKind::PolyASite,
        FeatureKind::Other,
    ];

    /// Position in [`FeatureKind::ALL`]
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Alignments carry match coordinates and a percent identity
    pub fn is_alignment(self) -> bool {
        matches!(self, FeatureKind::Match | FeatureKind::ShortRead)
    }

    /// Exon, CDS or UTR
    pub fn is_exonic(self) -> bool {
        matches!(self, FeatureKind::Exon | FeatureKind::Cds | FeatureKind::Utr)
    }

    /// Kinds making up a transcript
    pub fn is_transcript_part(self) -> bool {
        self.is_exonic() || self == FeatureKind::Intron
    }

    /// Kind of sequence a feature of this kind belongs to
    ///
    /// PolyA sites and other features may stand alone.
    pub fn sequence_kind(self) -> Option<AggregateKind> {
        match self {
            FeatureKind::Match => Some(AggregateKind::Match),
            FeatureKind::ShortRead => Some(AggregateKind::ReadPair),
            FeatureKind::Exon | FeatureKind::Cds | FeatureKind::Utr | FeatureKind::Intron => {
                Some(AggregateKind::Transcript)
            }
            FeatureKind::Variation => Some(AggregateKind::Variation),
            FeatureKind::PolyASite | FeatureKind::Other => None,
        }
    }

    /// Legacy one-letter suffix some producers append to fragment names
    pub fn legacy_name_suffix(self) -> Option<char> {
        match self {
            FeatureKind::Exon => Some('x'),
            FeatureKind::Intron => Some('i'),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatureKind::Match => "match",
            FeatureKind::ShortRead => "short_read",
            FeatureKind::Exon => "exon",
            FeatureKind::Cds => "CDS",
            FeatureKind::Utr => "UTR",
            FeatureKind::Intron => "intron",
            FeatureKind::Variation => "variation",
            FeatureKind::PolyASite => "polyA_site",
            FeatureKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for FeatureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "match" | "nucleotide_match" | "protein_match" | "expressed_sequence_match" => {
                Ok(FeatureKind::Match)
            }
            "short_read" | "read" | "read_pair" => Ok(FeatureKind::ShortRead),
            "exon" => Ok(FeatureKind::Exon),
            "cds" => Ok(FeatureKind::Cds),
            "utr" | "five_prime_utr" | "three_prime_utr" => Ok(FeatureKind::Utr),
            "intron" => Ok(FeatureKind::Intron),
            "variation" | "snp" | "sequence_alteration" => Ok(FeatureKind::Variation),
            "polya_site" | "polya_signal_sequence" => Ok(FeatureKind::PolyASite),
            "other" | "region" => Ok(FeatureKind::Other),
            _ => Err(format!("Unknown feature kind: {}", s)),
        }
    }
}

/// One aligned block of a gapped alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GapRange {
    /// Block on the reference sequence
    pub reference: Range,
    /// Block on the match sequence
    #[serde(rename = "match")]
    pub matched: Range,
}

impl GapRange {
    pub fn new(reference: Range, matched: Range) -> Self {
        Self { reference, matched }
    }
}

/// One alignment or annotation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub kind: FeatureKind,

    /// Range on the reference sequence
    pub reference_range: Range,
    pub reference_strand: Strand,
    /// Reading frame (1..=3) when the reference is shown as protein
    pub reference_frame: u8,

    /// Range on the match sequence; `None` for annotation kinds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_range: Option<Range>,
    pub match_strand: Strand,

    /// GFF phase (0..=2) of coding features
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Percent identity; `None` until scored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<f64>,

    /// Aligned blocks; empty for ungapped alignments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<GapRange>,

    /// Owned sub-features (CDS/UTR pieces of an exon)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FeatureId>,

    /// Sequence this feature belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owning_sequence: Option<AggregateId>,

    /// Created by transcript reconstruction rather than loaded
    #[serde(default)]
    pub synthesized: bool,
}

impl Feature {
    /// Create a feature on the reference with no match coordinates
    pub fn new(kind: FeatureKind, reference_range: Range, reference_strand: Strand) -> Self {
        Self {
            kind,
            reference_range,
            reference_strand,
            reference_frame: 1,
            match_range: None,
            match_strand: Strand::Forward,
            phase: None,
            score: None,
            identity: None,
            gaps: Vec::new(),
            children: Vec::new(),
            owning_sequence: None,
            synthesized: false,
        }
    }

    pub fn with_match(mut self, match_range: Range, match_strand: Strand) -> Self {
        self.match_range = Some(match_range);
        self.match_strand = match_strand;
        self
    }

    pub fn with_frame(mut self, frame: u8) -> Self {
        self.reference_frame = frame;
        self
    }

    pub fn with_phase(mut self, phase: Option<u8>) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_identity(mut self, identity: f64) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_gaps(mut self, gaps: Vec<GapRange>) -> Self {
        self.gaps = gaps;
        self
    }

    /// Sort key inside a sequence: start coordinate, then kind ordinal
    #[inline]
    pub fn sort_key(&self) -> (i64, usize) {
        (self.reference_range.min(), self.kind.ordinal())
    }

    pub fn is_gapped(&self) -> bool {
        !self.gaps.is_empty()
    }

    /// Reference and match coordinates for status text
    ///
    /// Format is `"{qmin} - {qmax} [{smin} - {smax}]"`; features without
    /// match coordinates show `[0 - 0]`.
    pub fn coords_as_string(&self) -> String {
        let (smin, smax) = self
            .match_range
            .map(|r| (r.min(), r.max()))
            .unwrap_or((0, 0));
        format!(
            "{} - {} [{} - {}]",
            self.reference_range.min(),
            self.reference_range.max(),
            smin,
            smax
        )
    }
}
