//! Standard genetic code for translating reference segments

/// A single nucleotide base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    T,
    C,
    A,
    G,
}

impl Base {
    /// Parse a base from a character; `U` reads as `T`
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'T' | 'U' => Some(Base::T),
            'C' => Some(Base::C),
            'A' => Some(Base::A),
            'G' => Some(Base::G),
            _ => None,
        }
    }

    /// Position in the `TCAG` ordering used by the code table
    fn rank(self) -> usize {
        match self {
            Base::T => 0,
            Base::C => 1,
            Base::A => 2,
            Base::G => 3,
        }
    }
}

/// A codon (three nucleotides)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codon([Base; 3]);

impl Codon {
    pub fn new(b1: Base, b2: Base, b3: Base) -> Self {
        Self([b1, b2, b3])
    }

    /// Parse three characters; `None` on ambiguity codes or wrong length
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let b1 = Base::from_char(chars.next()?)?;
        let b2 = Base::from_char(chars.next()?)?;
        let b3 = Base::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self([b1, b2, b3]))
    }

    fn index(&self) -> usize {
        self.0[0].rank() * 16 + self.0[1].rank() * 4 + self.0[2].rank()
    }
}

/// One-letter amino acids of the standard code, codons in `TCAG` order
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// Residue for an untranslatable codon
pub const UNKNOWN_RESIDUE: char = 'X';

/// Residue for a stop codon
pub const STOP_RESIDUE: char = '*';

/// Standard genetic code table
#[derive(Debug, Clone, Copy, Default)]
pub struct CodonTable;

impl CodonTable {
    pub fn standard() -> Self {
        CodonTable
    }

    /// One-letter amino acid for a codon, `*` for stops
    pub fn translate_codon(&self, codon: &Codon) -> char {
        char::from(STANDARD_CODE[codon.index()])
    }

    pub fn is_stop(&self, codon: &Codon) -> bool {
        self.translate_codon(codon) == STOP_RESIDUE
    }

    /// Translate a DNA string codon by codon
    ///
    /// A trailing partial codon is dropped; codons with ambiguity codes
    /// translate to `X`.
    pub fn translate(&self, dna: &str) -> String {
        dna.as_bytes()
            .chunks_exact(3)
            .map(|chunk| {
                std::str::from_utf8(chunk)
                    .ok()
                    .and_then(Codon::parse)
                    .map(|codon| self.translate_codon(&codon))
                    .unwrap_or(UNKNOWN_RESIDUE)
            })
            .collect()
    }
}
