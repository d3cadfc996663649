//! Reference segment extraction
//!
//! Cuts the part of the reference that a feature covers, orients it along
//! the feature's reference strand and, for translated searches, converts
//! it to amino acids in the feature's reading frame.

use super::codon::CodonTable;
use crate::config::BlastMode;
use crate::coords::{Range, Strand};

/// Reverse complement a nucleotide sequence
///
/// Case is preserved; anything that is not `ACGT` passes through.
///
/// # Example
///
/// ```
/// use ferro_align::identity::segment::reverse_complement;
///
/// assert_eq!(reverse_complement("ATGC"), "GCAT");
/// assert_eq!(reverse_complement("aattggcc"), "ggccaatt");
/// assert_eq!(reverse_complement("ATGN"), "NCAT");
/// ```
pub fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'T' => 'A',
            'G' => 'C',
            'C' => 'G',
            'a' => 't',
            't' => 'a',
            'g' => 'c',
            'c' => 'g',
            _ => c,
        })
        .collect()
}

/// Reference residues with the coordinate of their first residue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSequence<'a> {
    residues: &'a str,
    start: i64,
}

impl<'a> ReferenceSequence<'a> {
    /// `start` is the 1-based coordinate of the first residue
    pub fn new(residues: &'a str, start: i64) -> Self {
        Self { residues, start }
    }

    /// Reference starting at coordinate 1
    pub fn from_start(residues: &'a str) -> Self {
        Self::new(residues, 1)
    }

    pub fn residues(&self) -> &'a str {
        self.residues
    }

    /// Covered coordinates, `None` for an empty reference
    pub fn range(&self) -> Option<Range> {
        let len = self.residues.len() as i64;
        Range::checked(self.start, self.start + len - 1)
    }

    /// Residues for `range`, which must lie inside [`Self::range`]
    fn slice(&self, range: Range) -> Option<&'a str> {
        let from = usize::try_from(range.min() - self.start).ok()?;
        let to = usize::try_from(range.max() - self.start + 1).ok()?;
        self.residues.get(from..to)
    }
}

/// A feature's reference residues in feature orientation
///
/// Index `i` is the `i`-th compared residue walking from the feature's
/// 5' end. Residues cut off by the reference bounds are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSegment {
    residues: Vec<u8>,
    /// Compared residues missing before the first available one
    lead: usize,
    /// Nucleotides skipped to reach the first codon boundary
    frame_offset: i64,
    /// Requested range did not fit inside the reference
    pub clipped: bool,
    /// Part of the requested range the reference covers
    pub available: Option<Range>,
}

impl ReferenceSegment {
    /// Residue at compared index `i`, if available
    pub fn residue(&self, i: usize) -> Option<u8> {
        i.checked_sub(self.lead)
            .and_then(|j| self.residues.get(j))
            .copied()
    }

    /// Number of available residues
    pub fn available_len(&self) -> usize {
        self.residues.len()
    }

    pub fn lead(&self) -> usize {
        self.lead
    }

    pub fn frame_offset(&self) -> i64 {
        self.frame_offset
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.residues).unwrap_or("")
    }
}

/// Nucleotides to skip from the feature's 5' end to the first codon of
/// `frame` (1-based)
///
/// Forward frames count from coordinate 1; reverse frames count down from
/// the last reference coordinate.
pub fn frame_offset(requested: Range, strand: Strand, frame: u8, reference_end: i64) -> i64 {
    let frame = i64::from(frame.clamp(1, 3));
    match strand {
        Strand::Forward => (frame - requested.min()).rem_euclid(3),
        Strand::Reverse => ((frame - 1) - (reference_end - requested.max())).rem_euclid(3),
    }
}

/// Extract the reference segment a feature covers
///
/// The segment is reverse-complemented for reverse-strand features on a
/// nucleotide reference and translated when `mode` compares peptides
/// against a nucleotide reference. Returns a segment with `clipped` set
/// when `requested` runs past either end of the reference.
pub fn extract_segment(
    reference: &ReferenceSequence<'_>,
    requested: Range,
    strand: Strand,
    frame: u8,
    mode: BlastMode,
) -> ReferenceSegment {
    let Some(bounds) = reference.range() else {
        return ReferenceSegment {
            residues: Vec::new(),
            lead: 0,
            frame_offset: 0,
            clipped: true,
            available: None,
        };
    };

    let available = requested.clamp_to(&bounds);
    let clipped = available != Some(requested);

    let (nucleotides, lead) = match available.and_then(|r| reference.slice(r).map(|s| (r, s))) {
        Some((range, slice)) => match strand {
            Strand::Reverse if mode.reference_is_dna() => (
                reverse_complement(slice),
                (requested.max() - range.max()) as usize,
            ),
            _ => (slice.to_string(), (range.min() - requested.min()) as usize),
        },
        None => (String::new(), 0),
    };

    if !mode.translates_reference() {
        return ReferenceSegment {
            residues: nucleotides.into_bytes(),
            lead,
            frame_offset: 0,
            clipped,
            available,
        };
    }

    let offset = frame_offset(requested, strand, frame, bounds.max());
    let codon_start = |i: usize| offset as usize + 3 * i;

    // first codon lying wholly inside the available nucleotides
    let mut first = 0usize;
    while codon_start(first) < lead {
        first += 1;
    }
    let skip = codon_start(first) - lead;
    let protein = nucleotides
        .get(skip..)
        .map(|rest| CodonTable::standard().translate(rest))
        .unwrap_or_default();

    ReferenceSegment {
        residues: protein.into_bytes(),
        lead: first,
        frame_offset: offset,
        clipped,
        available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(""), "");
        assert_eq!(reverse_complement("A"), "T");
        assert_eq!(reverse_complement("ACGTT"), "AACGT");
    }

    #[test]
    fn test_reference_range() {
        let reference = ReferenceSequence::new("ACGT", 101);
        assert_eq!(reference.range(), Some(Range::new(101, 104)));
        assert_eq!(ReferenceSequence::from_start("").range(), None);
    }

    #[test]
    fn test_extract_forward() {
        let reference = ReferenceSequence::from_start("AAAACGTACGTAAAA");
        let seg = extract_segment(
            &reference,
            Range::new(4, 11),
            Strand::Forward,
            1,
            BlastMode::BlastN,
        );
        assert_eq!(seg.as_str(), "ACGTACGT");
        assert!(!seg.clipped);
        assert_eq!(seg.residue(0), Some(b'A'));
        assert_eq!(seg.residue(8), None);
    }

    #[test]
    fn test_extract_reverse() {
        let reference = ReferenceSequence::from_start("AAACCGGTTT");
        let seg = extract_segment(
            &reference,
            Range::new(1, 4),
            Strand::Reverse,
            1,
            BlastMode::BlastN,
        );
        assert_eq!(seg.as_str(), "GTTT");
    }

    #[test]
    fn test_extract_clipped_start() {
        let reference = ReferenceSequence::new("ACGTACGT", 10);
        let seg = extract_segment(
            &reference,
            Range::new(8, 12),
            Strand::Forward,
            1,
            BlastMode::BlastN,
        );
        assert!(seg.clipped);
        assert_eq!(seg.available, Some(Range::new(10, 12)));
        assert_eq!(seg.lead(), 2);
        assert_eq!(seg.residue(0), None);
        assert_eq!(seg.residue(1), None);
        assert_eq!(seg.residue(2), Some(b'A'));
        assert_eq!(seg.available_len(), 3);
    }

    #[test]
    fn test_extract_clipped_end_reverse() {
        let reference = ReferenceSequence::from_start("ACGTAC");
        // 5' end of a reverse feature is its max coordinate
        let seg = extract_segment(
            &reference,
            Range::new(4, 9),
            Strand::Reverse,
            1,
            BlastMode::BlastN,
        );
        assert!(seg.clipped);
        assert_eq!(seg.lead(), 3);
        assert_eq!(seg.as_str(), "GTA");
    }

    #[test]
    fn test_extract_outside_reference() {
        let reference = ReferenceSequence::from_start("ACGT");
        let seg = extract_segment(
            &reference,
            Range::new(50, 60),
            Strand::Forward,
            1,
            BlastMode::BlastN,
        );
        assert!(seg.clipped);
        assert_eq!(seg.available_len(), 0);
    }

    #[test]
    fn test_extract_translated_frames() {
        //                                       frame 1: ATG GCC TGG
        let reference = ReferenceSequence::from_start("ATGGCCTGGAA");
        let seg = extract_segment(
            &reference,
            Range::new(1, 9),
            Strand::Forward,
            1,
            BlastMode::BlastX,
        );
        assert_eq!(seg.as_str(), "MAW");

        // frame 2 starts at coordinate 2: TGG CCT GGA
        let seg = extract_segment(
            &reference,
            Range::new(2, 10),
            Strand::Forward,
            2,
            BlastMode::BlastX,
        );
        assert_eq!(seg.frame_offset(), 0);
        assert_eq!(seg.as_str(), "WPG");
    }

    #[test]
    fn test_frame_offset_forward() {
        assert_eq!(frame_offset(Range::new(1, 9), Strand::Forward, 1, 100), 0);
        assert_eq!(frame_offset(Range::new(2, 9), Strand::Forward, 1, 100), 2);
        assert_eq!(frame_offset(Range::new(3, 9), Strand::Forward, 3, 100), 0);
    }

    #[test]
    fn test_frame_offset_reverse() {
        // reverse frame 1 starts at the last reference base
        assert_eq!(frame_offset(Range::new(1, 12), Strand::Reverse, 1, 12), 0);
        assert_eq!(frame_offset(Range::new(1, 11), Strand::Reverse, 1, 12), 2);
        assert_eq!(frame_offset(Range::new(1, 11), Strand::Reverse, 2, 12), 0);
    }

    #[test]
    fn test_protein_reference_not_complemented() {
        let reference = ReferenceSequence::from_start("MKWVTF");
        let seg = extract_segment(
            &reference,
            Range::new(2, 4),
            Strand::Reverse,
            1,
            BlastMode::BlastP,
        );
        assert_eq!(seg.as_str(), "KWV");
    }
}
