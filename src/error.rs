//! Error types for the varspace dispatcher
//!
//! The dispatcher never lets a failure escape its entry point: every error is
//! mapped to a stable textual wire code at the `execute` boundary and returned
//! as the reply. The `Display` form of each kind *is* the wire code, so
//! variants carry no dynamic detail.

use thiserror::Error;

/// Failure kinds raised while parsing or dispatching a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Exception {
    /// The input line does not tokenize.
    #[error("EXC_MALFORMED_INPUT")]
    MalformedInput,

    /// The actor is recognized but the selector is not in its table.
    #[error("EXC_INVALID_MESSAGE")]
    InvalidMessage,

    /// A known selector was used with the wrong number of arguments.
    #[error("EXC_WRONG_NUMBER_OF_ARGUMENTS")]
    WrongNumberOfArguments,

    /// An argument failed the selector's per-argument predicate.
    #[error("EXC_INVALID_ARGUMENT")]
    InvalidArgument,

    /// A creation selector targeted a name that is already bound.
    #[error("EXC_VARIABLE_NAME_ALREADY_USED")]
    VariableNameAlreadyUsed,

    /// A variable lookup or delete target was not found.
    #[error("EXC_UNEXISTENT_VARIABLE")]
    UnexistentVariable,

    /// Fallback for otherwise uncategorized failures.
    #[error("EXC_UNKNOWN_ERROR")]
    Unknown,
}

/// Convenience result alias for dispatch operations.
pub type Result<T> = std::result::Result<T, Exception>;
