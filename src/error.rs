//! Error types for ferro-align
//!
//! Structural errors (`E1xxx`, `E2xxx`) abort the single record being
//! ingested. Scoring errors (`E3xxx`) never abort a load; they are counted
//! in a [`crate::identity::ScoringReport`] and the feature keeps an unset
//! identity.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Ingestion errors (E1xxx)
    /// Neither a name nor an id tag was supplied
    InvalidKey = 1001,
    /// Feature kind not allowed in the target sequence
    IncompatibleFeature = 1002,
    /// Coordinates could not be normalized
    InvalidCoordinates = 1003,
    /// Feature or sequence id not known to the store
    UnknownFeature = 1004,

    // Sequence data errors (E2xxx)
    /// Conflicting residues supplied for one sequence
    SequenceDataMismatch = 2001,

    // Scoring errors (E3xxx)
    /// Match residues not available
    MissingMatchResidues = 3001,
    /// Reference segment ran past the reference bounds
    ClippedReference = 3002,
    /// Blast mode / alignment shape combination not implemented
    UnsupportedScoringMode = 3003,

    // IO errors (E9xxx)
    /// JSON parsing error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidKey => "missing sequence name and id tag",
            ErrorCode::IncompatibleFeature => "feature kind not allowed in sequence",
            ErrorCode::InvalidCoordinates => "invalid coordinates",
            ErrorCode::UnknownFeature => "unknown feature or sequence id",
            ErrorCode::SequenceDataMismatch => "conflicting sequence data",
            ErrorCode::MissingMatchResidues => "match sequence not available",
            ErrorCode::ClippedReference => "reference segment clipped",
            ErrorCode::UnsupportedScoringMode => "scoring mode not implemented",
            ErrorCode::JsonError => "JSON parsing error",
        }
    }

    /// True for codes that never abort a load
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::MissingMatchResidues
                | ErrorCode::ClippedReference
                | ErrorCode::UnsupportedScoringMode
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-align operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    /// A feature or sequence was given neither a name nor an id tag
    #[error("Invalid key: a sequence needs a name or an id tag")]
    InvalidKey,

    /// Feature kind cannot be a member of the target sequence
    #[error("Feature of kind {feature_kind} cannot belong to {sequence_kind} sequence '{sequence}'")]
    IncompatibleFeature {
        feature_kind: String,
        sequence_kind: String,
        sequence: String,
    },

    /// Conflicting residue strings for the same sequence
    #[error("Sequence data mismatch for '{sequence}': existing length {existing_len}, new length {new_len}")]
    SequenceDataMismatch {
        sequence: String,
        existing_len: usize,
        new_len: usize,
    },

    /// Match residues were not available when scoring
    #[error("Cannot score {coords}: no sequence data for '{sequence}'")]
    MissingMatchResidues { sequence: String, coords: String },

    /// Reference segment extraction ran past the reference bounds
    #[error("Reference segment {requested} clipped to reference range {available}")]
    ClippedReference { requested: String, available: String },

    /// Scoring not implemented for this mode/shape
    #[error("Percent identity not implemented for {mode} {shape} alignments")]
    UnsupportedScoringMode { mode: String, shape: String },

    /// Coordinates could not be normalized
    #[error("Invalid coordinates: {msg}")]
    InvalidCoordinates { msg: String },

    /// Id not known to the store or registry
    #[error("Unknown {what} id {id}")]
    UnknownFeature { what: &'static str, id: usize },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl AlignError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            AlignError::InvalidKey => ErrorCode::InvalidKey,
            AlignError::IncompatibleFeature { .. } => ErrorCode::IncompatibleFeature,
            AlignError::SequenceDataMismatch { .. } => ErrorCode::SequenceDataMismatch,
            AlignError::MissingMatchResidues { .. } => ErrorCode::MissingMatchResidues,
            AlignError::ClippedReference { .. } => ErrorCode::ClippedReference,
            AlignError::UnsupportedScoringMode { .. } => ErrorCode::UnsupportedScoringMode,
            AlignError::InvalidCoordinates { .. } => ErrorCode::InvalidCoordinates,
            AlignError::UnknownFeature { .. } => ErrorCode::UnknownFeature,
            AlignError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Message prefixed with the error code, e.g. `[E1001] Invalid key: ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<serde_json::Error> for AlignError {
    fn from(err: serde_json::Error) -> Self {
        AlignError::Json {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::InvalidKey.as_str(), "E1001");
        assert_eq!(ErrorCode::SequenceDataMismatch.as_str(), "E2001");
        assert_eq!(ErrorCode::MissingMatchResidues.as_str(), "E3001");
        assert_eq!(ErrorCode::UnsupportedScoringMode.as_str(), "E3003");
        assert_eq!(ErrorCode::JsonError.as_str(), "E9002");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::ClippedReference), "E3002");
    }

    #[test]
    fn test_recoverable_codes() {
        assert!(ErrorCode::MissingMatchResidues.is_recoverable());
        assert!(ErrorCode::ClippedReference.is_recoverable());
        assert!(ErrorCode::UnsupportedScoringMode.is_recoverable());
        assert!(!ErrorCode::InvalidKey.is_recoverable());
        assert!(!ErrorCode::SequenceDataMismatch.is_recoverable());
    }

    #[test]
    fn test_align_error_code() {
        assert_eq!(AlignError::InvalidKey.code(), ErrorCode::InvalidKey);

        let err = AlignError::SequenceDataMismatch {
            sequence: "Q9".to_string(),
            existing_len: 10,
            new_len: 12,
        };
        assert_eq!(err.code(), ErrorCode::SequenceDataMismatch);

        let err = AlignError::UnsupportedScoringMode {
            mode: "tblastn".to_string(),
            shape: "gapped".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnsupportedScoringMode);
    }

    #[test]
    fn test_detailed_message() {
        let msg = AlignError::InvalidKey.detailed_message();
        assert!(msg.starts_with("[E1001]"));
        assert!(msg.contains("name or an id tag"));
    }

    #[test]
    fn test_display_carries_context() {
        let err = AlignError::MissingMatchResidues {
            sequence: "EST1".to_string(),
            coords: "1 - 10 [5 - 14]".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("EST1"));
        assert!(display.contains("1 - 10 [5 - 14]"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: AlignError = json_err.into();
        assert_eq!(err.code(), ErrorCode::JsonError);
    }
}
