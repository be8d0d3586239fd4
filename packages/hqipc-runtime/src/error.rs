//! Error types for the channel substrate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("no provider registered on channel '{0}'")]
    NoProvider(String),

    #[error("channel '{0}' is bound with a different arity")]
    TypeMismatch(String),
}

pub type GateResult<T> = Result<T, GateError>;
