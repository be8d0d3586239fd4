//! Error types for hqipc-codegen
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

/// Main error type for stub-compiler operations
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Canonical serialization of a descriptor failed
    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] serde_json::Error),

    /// Emission error
    #[error("Emit error: {0}")]
    Emit(String),
}

/// Result type alias for stub-compiler operations
pub type Result<T> = std::result::Result<T, CodegenError>;
