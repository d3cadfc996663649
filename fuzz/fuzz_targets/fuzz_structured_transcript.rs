//! Structured fuzz target for transcript reconstruction and scoring
//!
//! Uses the arbitrary crate to build transcripts and alignments with
//! bounded coordinates, which reaches the reconstruction walk far more
//! often than raw JSON.

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use ferro_align::coords::{Range, Strand};
use ferro_align::feature::{FeatureKind, GapRange};
use ferro_align::identity::segment::ReferenceSequence;
use ferro_align::{BlastMode, LoadConfig, LoadSession, RawFeature};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct SessionInput {
    mode: Mode,
    reverse: bool,
    span: Option<(u16, u16)>,
    parts: Vec<Part>,
    alignments: Vec<Alignment>,
    reference: Vec<Nucleotide>,
}

#[derive(Debug, Arbitrary)]
enum Mode {
    N,
    P,
    X,
    TN,
    TX,
}

#[derive(Debug, Arbitrary)]
enum PartKind {
    Exon,
    Cds,
    Utr,
    Intron,
}

#[derive(Debug, Arbitrary)]
struct Part {
    kind: PartKind,
    start: u16,
    end: u16,
}

#[derive(Debug, Arbitrary)]
struct Alignment {
    start: u16,
    end: u16,
    match_start: u16,
    match_end: u16,
    reverse_match: bool,
    frame: u8,
    gaps: Vec<(u16, u16, u16, u16)>,
    residues: Option<Vec<Nucleotide>>,
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Nucleotide {
    A,
    C,
    G,
    T,
    N,
}

fn residues(seq: &[Nucleotide]) -> String {
    seq.iter()
        .map(|n| match n {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
            Nucleotide::N => 'N',
        })
        .collect()
}

impl SessionInput {
    fn blast_mode(&self) -> BlastMode {
        match self.mode {
            Mode::N => BlastMode::BlastN,
            Mode::P => BlastMode::BlastP,
            Mode::X => BlastMode::BlastX,
            Mode::TN => BlastMode::TBlastN,
            Mode::TX => BlastMode::TBlastX,
        }
    }

    fn strand(&self) -> Strand {
        if self.reverse {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }

    fn run(&self) {
        let mut session = LoadSession::new(LoadConfig::new(self.blast_mode()));
        let strand = self.strand();

        if let Some((a, b)) = self.span {
            let _ = session.add_transcript_span("T1", strand, Range::new(a.into(), b.into()));
        }

        for part in self.parts.iter().take(64) {
            let kind = match part.kind {
                PartKind::Exon => FeatureKind::Exon,
                PartKind::Cds => FeatureKind::Cds,
                PartKind::Utr => FeatureKind::Utr,
                PartKind::Intron => FeatureKind::Intron,
            };
            let raw = RawFeature::new(kind, part.start.into(), part.end.into(), strand)
                .with_match_name("T1");
            let _ = session.create_feature(raw);
        }

        for (i, aln) in self.alignments.iter().take(16).enumerate() {
            let match_strand = if aln.reverse_match { strand.opposite() } else { strand };
            let mut raw = RawFeature::new(
                FeatureKind::Match,
                aln.start.into(),
                aln.end.into(),
                strand,
            )
            .with_match_name(format!("EST{}", i))
            .with_match(aln.match_start.into(), aln.match_end.into(), match_strand)
            .with_frame(aln.frame % 3 + 1)
            .with_gaps(
                aln.gaps
                    .iter()
                    .take(8)
                    .map(|&(a, b, c, d)| {
                        GapRange::new(Range::new(a.into(), b.into()), Range::new(c.into(), d.into()))
                    })
                    .collect(),
            );
            if let Some(seq) = &aln.residues {
                raw = raw.with_residues(residues(seq));
            }
            let _ = session.create_feature(raw);
        }

        let reference = residues(&self.reference);
        let _ = session.finalize(&ReferenceSequence::from_start(&reference));
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = SessionInput::arbitrary(&mut Unstructured::new(data)) {
        // Finalization should never panic
        input.run();
    }
});
