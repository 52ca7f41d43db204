//! Catchable errors and abrupt evaluation outcomes.
//!
//! Everything user code can trap is a [`RuntimeError`] with a typed
//! [`ErrorKind`]. The factory functions below (`out_of_range`,
//! `bad_conditional`, ...) are the construction API; they fill in both the
//! kind and the rendered message.
//!
//! Evaluation that can be cut short returns [`EvalResult`], whose error side
//! is a [`ControlAction`]: either a raised error or a [`Thrown`] value
//! unwinding toward its catcher. Internal consistency violations are not
//! represented here at all; they go through [`crate::fatal`].

use crate::cell::Cell;
use crate::kind::Kind;

/// Result of an operation that can raise or throw.
pub type EvalResult<T> = Result<T, ControlAction>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    // Numeric
    #[error("{value} is out of range")]
    OutOfRange { value: i64 },
    #[error("expected a number, got {kind}")]
    NotNumeric { kind: Kind },

    // Conditionals
    #[error("{kind} cannot be used as a condition")]
    BadConditional { kind: Kind },
    #[error("literal {kind} used as a condition (evaluate it first)")]
    BlockConditional { kind: Kind },

    // Characters and strings
    #[error("codepoint {codepoint:#x} exceeds maximum {max:#x}")]
    CodepointTooHigh { codepoint: u32, max: u32 },
    #[error("codepoint {codepoint:#x} is not a Unicode scalar value")]
    InvalidCodepoint { codepoint: u32 },
    #[error("zero byte cannot be added to a string")]
    IllegalZeroByte,
    #[error("series is frozen")]
    SeriesFrozen,

    // Binding and paths
    #[error("{word} has no value")]
    NotBound { word: String },
    #[error("cannot pick {picker} from {container}")]
    BadPick { container: Kind, picker: String },
    #[error("cannot poke {picker} in {container}")]
    BadPoke { container: Kind, picker: String },
    #[error("{container} cannot hold a {value}")]
    BadPokeValue { container: Kind, value: Kind },
    #[error("group evaluation is not allowed here")]
    GroupsDisallowed,
    #[error("path cannot start with {kind}")]
    BadPathHead { kind: Kind },
    #[error("cannot set through this path")]
    BadPathSet,
}

/// A raised, catchable error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub kind: ErrorKind,
    /// For factory-created errors, `kind.to_string()`.
    pub message: String,
}

impl RuntimeError {
    fn from_kind(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        RuntimeError { kind, message }
    }

    /// Attach a more specific message, keeping the kind.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Payload of a non-local throw.
#[derive(Clone, Debug, PartialEq)]
pub struct Thrown {
    /// Catch label (`Cell::NULL` for an unlabeled throw).
    pub label: Cell,
    pub arg: Cell,
}

/// Why evaluation stopped early.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Error(RuntimeError),
    Throw(Thrown),
}

impl ControlAction {
    pub fn as_error(&self) -> Option<&RuntimeError> {
        match self {
            ControlAction::Error(err) => Some(err),
            ControlAction::Throw(_) => None,
        }
    }

    pub fn is_throw(&self) -> bool {
        matches!(self, ControlAction::Throw(_))
    }
}

impl From<RuntimeError> for ControlAction {
    fn from(err: RuntimeError) -> Self {
        ControlAction::Error(err)
    }
}

impl From<Thrown> for ControlAction {
    fn from(thrown: Thrown) -> Self {
        ControlAction::Throw(thrown)
    }
}

// Factory functions

#[cold]
pub fn out_of_range(value: i64) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::OutOfRange { value })
}

#[cold]
pub fn not_numeric(kind: Kind) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::NotNumeric { kind })
}

#[cold]
pub fn bad_conditional(kind: Kind) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::BadConditional { kind })
}

#[cold]
pub fn block_conditional(kind: Kind) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::BlockConditional { kind })
}

#[cold]
pub fn codepoint_too_high(codepoint: u32, max: u32) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::CodepointTooHigh { codepoint, max })
}

#[cold]
pub fn invalid_codepoint(codepoint: u32) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::InvalidCodepoint { codepoint })
}

#[cold]
pub fn illegal_zero_byte() -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::IllegalZeroByte)
}

#[cold]
pub fn series_frozen() -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::SeriesFrozen)
}

#[cold]
pub fn not_bound(word: &str) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::NotBound {
        word: word.to_owned(),
    })
}

#[cold]
pub fn bad_pick(container: Kind, picker: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::BadPick {
        container,
        picker: picker.into(),
    })
}

#[cold]
pub fn bad_poke(container: Kind, picker: impl Into<String>) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::BadPoke {
        container,
        picker: picker.into(),
    })
}

#[cold]
pub fn bad_poke_value(container: Kind, value: Kind) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::BadPokeValue { container, value })
}

#[cold]
pub fn groups_disallowed() -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::GroupsDisallowed)
}

#[cold]
pub fn bad_path_head(kind: Kind) -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::BadPathHead { kind })
}

#[cold]
pub fn bad_path_set() -> RuntimeError {
    RuntimeError::from_kind(ErrorKind::BadPathSet)
}

#[cfg(test)]
mod tests;
