//! Property-based tests for ranges, reconstruction and identity scoring
//!
//! Uses proptest to generate transcripts with random exon layouts and
//! random ungapped alignments.

use ferro_align::coords::{Range, Strand};
use ferro_align::feature::{Feature, FeatureKind};
use ferro_align::identity::compute_identity;
use ferro_align::identity::segment::ReferenceSequence;
use ferro_align::{BlastMode, LoadSession, RawFeature};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

fn strand() -> impl Strategy<Value = Strand> {
    prop_oneof![Just(Strand::Forward), Just(Strand::Reverse)]
}

fn nucleotide() -> impl Strategy<Value = char> {
    prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'),]
}

fn nucleotide_sequence(len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(nucleotide(), len).prop_map(|v| v.into_iter().collect())
}

/// Exon layouts as `(gap before, exon length, cds)` triples, where `cds`
/// optionally places a CDS inside the exon as `(offset, length)` fractions
fn exon_layout() -> impl Strategy<Value = Vec<(i64, i64, Option<(u8, u8)>)>> {
    prop::collection::vec(
        (
            0..50i64,
            1..100i64,
            prop::option::of((0..100u8, 1..=100u8)),
        ),
        1..8,
    )
}

/// Turn a layout into absolute exon and CDS ranges starting at 1000
fn place(layout: &[(i64, i64, Option<(u8, u8)>)]) -> (Vec<Range>, Vec<Range>) {
    let mut exons = Vec::new();
    let mut cds = Vec::new();
    let mut pos = 1000;
    for &(gap, len, coding) in layout {
        let start = pos + gap;
        let exon = Range::new(start, start + len - 1);
        if let Some((offset, frac)) = coding {
            let cds_start = start + (len - 1) * i64::from(offset) / 100;
            let cds_len = ((exon.max() - cds_start + 1) * i64::from(frac) / 100).max(1);
            cds.push(Range::new(cds_start, cds_start + cds_len - 1));
        }
        exons.push(exon);
        // next exon starts after this one
        pos = exon.max() + 1;
    }
    (exons, cds)
}

fn load_transcript(strand: Strand, exons: &[Range], cds: &[Range]) -> LoadSession {
    let mut session = LoadSession::default();
    for (kind, ranges) in [(FeatureKind::Exon, exons), (FeatureKind::Cds, cds)] {
        for r in ranges {
            session
                .create_feature(RawFeature::new(kind, r.min(), r.max(), strand).with_match_name("T1"))
                .unwrap();
        }
    }
    session.finalize(&ReferenceSequence::from_start(""));
    session
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Range properties
    // =========================================================================

    #[test]
    fn range_is_always_ordered(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let r = Range::new(a, b);
        prop_assert!(r.min() <= r.max());
        prop_assert_eq!(r.len(), (a - b).abs() + 1);
    }

    #[test]
    fn subtract_partitions_range(
        a in 0i64..1000, b in 0i64..1000, c in 0i64..1000, d in 0i64..1000,
    ) {
        let whole = Range::new(a, b);
        let cut = Range::new(c, d);
        let pieces = whole.subtract(&cut);
        let covered: i64 = pieces.iter().map(|p| p.len()).sum::<i64>()
            + whole.intersect(&cut).map(|r| r.len()).unwrap_or(0);
        prop_assert_eq!(covered, whole.len());
        for p in &pieces {
            prop_assert!(whole.contains_range(p));
            prop_assert!(!p.overlaps(&cut));
        }
    }

    // =========================================================================
    // Reconstruction properties
    // =========================================================================

    #[test]
    fn reconstructed_features_are_ordered(layout in exon_layout(), strand in strand()) {
        let (exons, cds) = place(&layout);
        let session = load_transcript(strand, &exons, &cds);
        for (_, f) in session.store().iter() {
            prop_assert!(f.reference_range.min() <= f.reference_range.max());
            prop_assert_eq!(f.reference_strand, strand);
        }
    }

    #[test]
    fn every_exon_is_covered(layout in exon_layout(), strand in strand()) {
        let (exons, cds) = place(&layout);
        let session = load_transcript(strand, &exons, &cds);
        let tx = session.find_sequence("T1", strand).unwrap();
        let features: Vec<&Feature> = session.sequence_features(tx).collect();

        for exon in features.iter().filter(|f| f.kind == FeatureKind::Exon) {
            let covered: i64 = exon
                .children
                .iter()
                .filter_map(|&id| session.feature(id))
                .filter_map(|f| f.reference_range.intersect(&exon.reference_range))
                .map(|r| r.len())
                .sum();
            prop_assert_eq!(covered, exon.reference_range.len());
        }
    }

    #[test]
    fn one_intron_per_exon_gap(layout in exon_layout(), strand in strand()) {
        let (exons, _) = place(&layout);
        let session = load_transcript(strand, &exons, &[]);
        let tx = session.find_sequence("T1", strand).unwrap();
        let introns: Vec<Range> = session
            .sequence_features(tx)
            .filter(|f| f.kind == FeatureKind::Intron)
            .map(|f| f.reference_range)
            .collect();

        let expected: Vec<Range> = exons
            .windows(2)
            .filter_map(|w| Range::checked(w[0].max() + 1, w[1].min() - 1))
            .collect();
        prop_assert_eq!(introns, expected);
    }

    // =========================================================================
    // Identity properties
    // =========================================================================

    #[test]
    fn identity_is_a_percentage(
        reference in nucleotide_sequence(40),
        matched in nucleotide_sequence(40),
        start in 1i64..=30,
        len in 1i64..=10,
    ) {
        let feature = Feature::new(
            FeatureKind::Match,
            Range::new(start, start + len - 1),
            Strand::Forward,
        )
        .with_match(Range::new(1, len), Strand::Forward);

        let outcome = compute_identity(
            &feature,
            &ReferenceSequence::from_start(&reference),
            Some(&matched),
            "m",
            BlastMode::BlastN,
        )
        .unwrap();
        prop_assert!((0.0..=100.0).contains(&outcome.identity));
    }

    #[test]
    fn identical_segments_score_100(reference in nucleotide_sequence(40), start in 1i64..=30) {
        let idx = (start - 1) as usize;
        let matched = reference[idx..idx + 10].to_string();
        let feature = Feature::new(FeatureKind::Match, Range::new(start, start + 9), Strand::Forward)
            .with_match(Range::new(1, 10), Strand::Forward);

        let outcome = compute_identity(
            &feature,
            &ReferenceSequence::from_start(&reference),
            Some(&matched),
            "m",
            BlastMode::BlastN,
        )
        .unwrap();
        prop_assert_eq!(outcome.identity, 100.0);
    }
}
