// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-align: alignment feature model for genome browsers
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Holds the features of an alignment view (matches, reads, exons, CDS,
//! UTRs, introns, variations) grouped into match sequences, fills in
//! missing transcript structure and scores percent identity against the
//! reference.
//!
//! # Example
//!
//! ```
//! use ferro_align::coords::{Range, Strand};
//! use ferro_align::feature::FeatureKind;
//! use ferro_align::identity::segment::ReferenceSequence;
//! use ferro_align::{LoadConfig, LoadSession, RawFeature};
//!
//! let mut session = LoadSession::new(LoadConfig::default());
//! session
//!     .add_transcript_span("T1", Strand::Forward, Range::new(90, 410))
//!     .unwrap();
//! for (kind, start, end) in [
//!     (FeatureKind::Exon, 100, 200),
//!     (FeatureKind::Cds, 120, 180),
//!     (FeatureKind::Exon, 300, 400),
//! ] {
//!     session
//!         .create_feature(RawFeature::new(kind, start, end, Strand::Forward).with_match_name("T1"))
//!         .unwrap();
//! }
//!
//! let report = session.finalize(&ReferenceSequence::from_start(""));
//! assert_eq!(report.reconstruction.utrs, 3);
//! assert_eq!(report.reconstruction.introns, 3);
//! ```

pub mod config;
pub mod coords;
pub mod error;
pub mod extent;
pub mod feature;
pub mod identity;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequence;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use config::{BlastMode, LoadConfig, SeqType};
pub use coords::{Range, Strand, StrandFilter};
pub use error::{AlignError, ErrorCode};
pub use feature::{Feature, FeatureId, FeatureKind, FeatureStore, GapRange};
pub use identity::{compute_identity, IdentityScorer, ScoringReport};
pub use sequence::{AggregateId, AggregateKind, SequenceAggregate, SequenceInfo, SequenceRegistry};
pub use session::{FeatureBatch, FinalizeReport, LoadSession, MergeReport, RawFeature};
pub use transcript::{reconstruct_transcript, ReconstructionReport};

/// Result type alias for ferro-align operations
pub type Result<T> = std::result::Result<T, AlignError>;
