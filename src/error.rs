// src/error.rs

use thiserror::Error;

use crate::backend::Backend;

/// Errors raised while computing or checking commitment fixtures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    /// The numeric backend id does not name a supported field.
    #[error("invalid backend id {0}: expected 0 (BN254) or 1 (BLS12-381)")]
    InvalidBackendId(u64),

    /// Poseidon parameters for the backend could not be built, or the
    /// permutation refused its input.
    #[error("Poseidon over {backend} unavailable: {reason}")]
    HashBackendUnavailable { backend: Backend, reason: String },

    /// A record could not be encoded or decoded.
    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    /// A stored commitment does not match the recomputed one.
    #[error("{backend} commitment mismatch: record has {expected}, recomputed {actual}")]
    CommitmentMismatch {
        backend: Backend,
        expected: String,
        actual: String,
    },
}

impl From<serde_json::Error> for CommitmentError {
    fn from(e: serde_json::Error) -> Self {
        CommitmentError::SerializationFailure(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CommitmentError>;
