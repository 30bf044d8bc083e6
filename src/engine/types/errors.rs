//! Error taxonomy of the engine

use super::control::Signal;
use thiserror::Error;

/// Malformed or incomplete tree, detected while building or binding
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("<{parent}> is missing required child <{name}>")]
    MissingElement { parent: String, name: String },

    #[error("<{element}> is missing required attribute '{name}'")]
    MissingAttribute { element: String, name: String },

    #[error("<{element}> has invalid {name}=\"{value}\": {reason}")]
    InvalidAttribute {
        element: String,
        name: String,
        value: String,
        reason: String,
    },

    #[error("unknown functor type '{0}'")]
    UnknownFunctor(String),

    #[error("functor type '{0}' is built in and cannot be registered")]
    ReservedFunctor(String),

    #[error("context is already bound")]
    AlreadyBound,

    #[error("an earlier bind failed; the tree can only be disposed")]
    BindFailed,

    #[error("tree has been disposed")]
    Disposed,

    #[error("init section failed: {0}")]
    Init(#[source] ExecError),

    #[error("init section raised an unexpected {0} signal")]
    InitSignal(Signal),
}

/// Failure raised while performing a tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecError {
    #[error("{kind} failed: {message}")]
    Functor { kind: String, message: String },

    #[error("cannot convert {value} to a boolean")]
    Conversion { value: String },

    #[error("type error: {0}")]
    Type(String),

    #[error("unexpected {0} signal reached the root")]
    UnexpectedSignal(Signal),

    #[error("context has not been bound")]
    NotBound,

    #[error("tree has been disposed")]
    Disposed,
}

impl ExecError {
    /// Failure reported by a leaf functor
    pub fn functor(kind: impl Into<String>, message: impl Into<String>) -> Self {
        ExecError::Functor {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Failure while tearing a tree down
#[derive(Debug, Error)]
pub enum DisposeError {
    #[error("dispose step failed: {0}")]
    Step(#[source] ExecError),

    #[error("dispose step raised an unexpected {0} signal")]
    StepSignal(Signal),

    #[error("{kind} could not be released: {message}")]
    Functor { kind: String, message: String },
}

/// Failure while writing a tree back to its configuration form
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("{kind} cannot be serialized: {message}")]
    Functor { kind: String, message: String },

    #[error("tree has been disposed")]
    Disposed,
}
