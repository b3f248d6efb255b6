//! Error types for the PunkScript encoder

use thiserror::Error;

/// Core PunkScript errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PunkError {
    // Validation errors (raised before any generation)
    #[error("Invalid root identifier: {0:?}")]
    InvalidRootIdentifier(String),

    #[error("Input too large: {length} code units exceeds the limit of {limit}")]
    InputTooLarge { length: usize, limit: usize },

    #[error("Invalid quote policy: {0}")]
    InvalidQuotePolicy(String),

    // Key allocation errors
    #[error("Key space exhausted after {attempts} candidates")]
    KeySpaceExhausted { attempts: u64 },

    #[error("Namespace collision: key {key:?} already holds {existing}, cannot bind {incoming}")]
    NamespaceCollision {
        key: String,
        existing: String,
        incoming: String,
    },

    #[error("Unresolved reference to key {0:?}")]
    UnresolvedReference(String),

    #[error("No derivation available for character {0:?}")]
    MissingDerivation(char),

    #[error("Pipeline stage out of order: expected {expected}, found {actual}")]
    StageOrder {
        expected: &'static str,
        actual: &'static str,
    },

    // Codec errors
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid symbol key: {0:?}")]
    InvalidSymbolKey(String),

    #[error("Invalid numeral {numeral:?}: symbol {symbol:?} is not in the alphabet")]
    InvalidNumeral { numeral: String, symbol: char },

    #[error("Invalid run encoding: {0}")]
    InvalidRunEncoding(String),

    #[error("Invalid string literal: {0}")]
    InvalidLiteral(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    // Reference evaluation errors
    #[error("Evaluation failed: {0}")]
    Evaluation(String),
}

/// Result type for PunkScript operations
pub type PunkResult<T> = Result<T, PunkError>;
