//! Load and scoring configuration

use serde::{Deserialize, Serialize};

/// Alignment program the features came from
///
/// Decides what the reference and match residues are and how many reading
/// frames the reference is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlastMode {
    /// Nucleotide reference vs nucleotide matches
    #[default]
    BlastN,
    /// Protein reference vs protein matches
    BlastP,
    /// Nucleotide reference translated in three frames vs protein matches
    BlastX,
    /// Protein reference vs translated nucleotide matches
    TBlastN,
    /// Translated nucleotide on both sides
    TBlastX,
}

/// How the reference is displayed and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeqType {
    Dna,
    Peptide,
}

impl BlastMode {
    /// Number of reading frames the reference is shown in
    ///
    /// Also the divisor from reference nucleotides to compared residues.
    pub fn num_frames(&self) -> i64 {
        match self {
            BlastMode::BlastX | BlastMode::TBlastX => 3,
            BlastMode::BlastN | BlastMode::BlastP | BlastMode::TBlastN => 1,
        }
    }

    /// Residue type the comparison happens in
    pub fn seq_type(&self) -> SeqType {
        match self {
            BlastMode::BlastN => SeqType::Dna,
            BlastMode::BlastP | BlastMode::BlastX | BlastMode::TBlastN | BlastMode::TBlastX => {
                SeqType::Peptide
            }
        }
    }

    /// Whether the reference residues are nucleotides
    pub fn reference_is_dna(&self) -> bool {
        matches!(
            self,
            BlastMode::BlastN | BlastMode::BlastX | BlastMode::TBlastX
        )
    }

    /// Whether the reference has to be translated before comparing
    pub fn translates_reference(&self) -> bool {
        self.reference_is_dna() && self.seq_type() == SeqType::Peptide
    }
}

impl std::fmt::Display for BlastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlastMode::BlastN => write!(f, "blastn"),
            BlastMode::BlastP => write!(f, "blastp"),
            BlastMode::BlastX => write!(f, "blastx"),
            BlastMode::TBlastN => write!(f, "tblastn"),
            BlastMode::TBlastX => write!(f, "tblastx"),
        }
    }
}

impl std::str::FromStr for BlastMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blastn" | "n" => Ok(BlastMode::BlastN),
            "blastp" | "p" => Ok(BlastMode::BlastP),
            "blastx" | "x" => Ok(BlastMode::BlastX),
            "tblastn" => Ok(BlastMode::TBlastN),
            "tblastx" => Ok(BlastMode::TBlastX),
            _ => Err(format!("Invalid blast mode: {}", s)),
        }
    }
}

/// Configuration for a load session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Program the alignments came from
    pub blast_mode: BlastMode,

    /// Strip the `x`/`i` fragment tag from exon and intron names
    pub strip_legacy_suffixes: bool,

    /// Fill in missing transcript structure when finalizing
    pub reconstruct_transcripts: bool,

    /// Compute percent identities when finalizing
    pub score_identities: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            blast_mode: BlastMode::BlastN,
            strip_legacy_suffixes: true,
            reconstruct_transcripts: true,
            score_identities: true,
        }
    }
}

impl LoadConfig {
    pub fn new(blast_mode: BlastMode) -> Self {
        Self {
            blast_mode,
            ..Self::default()
        }
    }

    pub fn with_blast_mode(mut self, blast_mode: BlastMode) -> Self {
        self.blast_mode = blast_mode;
        self
    }

    pub fn with_legacy_suffixes(mut self, strip: bool) -> Self {
        self.strip_legacy_suffixes = strip;
        self
    }

    pub fn with_reconstruction(mut self, enabled: bool) -> Self {
        self.reconstruct_transcripts = enabled;
        self
    }

    pub fn with_scoring(mut self, enabled: bool) -> Self {
        self.score_identities = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoadConfig::default();
        assert_eq!(config.blast_mode, BlastMode::BlastN);
        assert!(config.strip_legacy_suffixes);
        assert!(config.reconstruct_transcripts);
        assert!(config.score_identities);
    }

    #[test]
    fn test_builder() {
        let config = LoadConfig::new(BlastMode::BlastX)
            .with_scoring(false)
            .with_legacy_suffixes(false);
        assert_eq!(config.blast_mode, BlastMode::BlastX);
        assert!(!config.score_identities);
        assert!(!config.strip_legacy_suffixes);
        assert!(config.reconstruct_transcripts);
    }

    #[test]
    fn test_num_frames() {
        assert_eq!(BlastMode::BlastN.num_frames(), 1);
        assert_eq!(BlastMode::BlastP.num_frames(), 1);
        assert_eq!(BlastMode::BlastX.num_frames(), 3);
        assert_eq!(BlastMode::TBlastX.num_frames(), 3);
    }

    #[test]
    fn test_translation_policy() {
        assert!(BlastMode::BlastX.translates_reference());
        assert!(!BlastMode::BlastN.translates_reference());
        assert!(!BlastMode::BlastP.translates_reference());
        assert_eq!(BlastMode::BlastN.seq_type(), SeqType::Dna);
        assert_eq!(BlastMode::BlastX.seq_type(), SeqType::Peptide);
    }

    #[test]
    fn test_blast_mode_from_str_round_trip() {
        for mode in [
            BlastMode::BlastN,
            BlastMode::BlastP,
            BlastMode::BlastX,
            BlastMode::TBlastN,
            BlastMode::TBlastX,
        ] {
            assert_eq!(mode.to_string().parse::<BlastMode>(), Ok(mode));
        }
        assert!("megablast".parse::<BlastMode>().is_err());
    }

    #[test]
    fn test_config_serde() {
        let json = r#"{"blast_mode":"blastx","strip_legacy_suffixes":true,
            "reconstruct_transcripts":false,"score_identities":true}"#;
        let config: LoadConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.blast_mode, BlastMode::BlastX);
        assert!(!config.reconstruct_transcripts);
    }
}
