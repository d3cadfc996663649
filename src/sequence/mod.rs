//! Match sequences
//!
//! A [`SequenceAggregate`] gathers every feature of one logical match
//! sequence on one strand: the blocks of a protein match, the exons of a
//! transcript, the two reads of a pair.

pub mod naming;
pub mod registry;

pub use registry::SequenceRegistry;

use crate::coords::{Range, Strand};
use crate::feature::{FeatureId, FeatureKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a sequence in the [`SequenceRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AggregateId(pub usize);

impl AggregateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq#{}", self.0)
    }
}

/// Kind of sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Match,
    Transcript,
    Variation,
    ReadPair,
}

impl AggregateKind {
    /// Whether a feature of `kind` may be a member of this sequence
    pub fn accepts(self, kind: FeatureKind) -> bool {
        match self {
            AggregateKind::Match => kind == FeatureKind::Match,
            AggregateKind::Transcript => kind.is_transcript_part(),
            AggregateKind::Variation => kind == FeatureKind::Variation,
            AggregateKind::ReadPair => kind == FeatureKind::ShortRead,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateKind::Match => write!(f, "match"),
            AggregateKind::Transcript => write!(f, "transcript"),
            AggregateKind::Variation => write!(f, "variation"),
            AggregateKind::ReadPair => write!(f, "read pair"),
        }
    }
}

/// Descriptive data columns shown next to a sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organism: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tissue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strain: Option<String>,
}

impl SequenceInfo {
    pub fn is_empty(&self) -> bool {
        self.organism.is_none()
            && self.gene_name.is_none()
            && self.tissue_type.is_none()
            && self.strain.is_none()
    }

    /// Copy the columns `other` has and `self` does not; the first value
    /// seen for a column is kept
    pub fn fill_from(&mut self, other: &SequenceInfo) {
        for (mine, theirs) in [
            (&mut self.organism, &other.organism),
            (&mut self.gene_name, &other.gene_name),
            (&mut self.tissue_type, &other.tissue_type),
            (&mut self.strain, &other.strain),
        ] {
            if mine.is_none() {
                mine.clone_from(theirs);
            }
        }
    }
}

/// One logical match sequence on one strand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceAggregate {
    /// Full name as supplied, e.g. `SW:P51531-2.2`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Opaque id used when the producer gives no name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tag: Option<String>,
    pub kind: AggregateKind,
    pub strand: Strand,

    /// Residues, once fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_data: Option<String>,

    /// Member features sorted by start coordinate then kind ordinal
    pub(crate) features: Vec<FeatureId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent_forward: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent_reverse: Option<Range>,
    /// Span declared by the producer (e.g. a transcript line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_span: Option<Range>,

    #[serde(default)]
    pub info: SequenceInfo,

    /// Set once reconstruction and scoring have run
    #[serde(default)]
    pub finalized: bool,
}

impl SequenceAggregate {
    pub fn new(
        name: Option<String>,
        id_tag: Option<String>,
        kind: AggregateKind,
        strand: Strand,
    ) -> Self {
        Self {
            name,
            id_tag,
            kind,
            strand,
            sequence_data: None,
            features: Vec::new(),
            extent_forward: None,
            extent_reverse: None,
            known_span: None,
            info: SequenceInfo::default(),
            finalized: false,
        }
    }

    /// Name, falling back to the id tag
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id_tag.as_deref())
            .unwrap_or("")
    }

    /// Name without database prefix
    pub fn variant_name(&self) -> &str {
        naming::variant_name(self.display_name())
    }

    /// Name without prefix, isoform or version
    pub fn short_name(&self) -> &str {
        naming::short_name(self.display_name())
    }

    /// Member features in draw order
    pub fn features(&self) -> &[FeatureId] {
        &self.features
    }

    pub fn has_sequence_data(&self) -> bool {
        self.sequence_data.is_some()
    }

    /// Extent on the given strand
    pub fn extent(&self, strand: Strand) -> Option<Range> {
        match strand {
            Strand::Forward => self.extent_forward,
            Strand::Reverse => self.extent_reverse,
        }
    }

    pub(crate) fn set_extent(&mut self, strand: Strand, extent: Option<Range>) {
        match strand {
            Strand::Forward => self.extent_forward = extent,
            Strand::Reverse => self.extent_reverse = extent,
        }
    }
}
