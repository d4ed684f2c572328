//! Error types surfaced to the host runtime.

use fitness_core::FitnessError;
use serde::Serialize;
use thiserror::Error;

/// Bridge errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Fitness(#[from] FitnessError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::Fitness(err) => err.code(),
            BridgeError::Serialization(_) => "SerializationError",
        }
    }

    /// The `{code, message}` pair a host passes to its reject callback.
    pub fn rejection(&self) -> Rejection {
        Rejection {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl From<BridgeError> for Rejection {
    fn from(err: BridgeError) -> Self {
        err.rejection()
    }
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
