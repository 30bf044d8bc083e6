//! Control flow types

use super::errors::ExecError;
use super::values::Value;
use std::fmt;

/* ===================== Signals ===================== */

/// Structured non-local exit raised by `break`, `continue` and `return`
///
/// A signal is not an error: block error sections never see one.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Break,
    Continue,
    Return(Value),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Break => write!(f, "break"),
            Signal::Continue => write!(f, "continue"),
            Signal::Return(v) => write!(f, "return({})", v),
        }
    }
}

/* ===================== Control Flow ===================== */

/// Abrupt completion of a `perform`
///
/// Every catch site matches on this explicitly, deciding whether it
/// absorbs a signal, an error, both or neither.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Break,
    Continue,
    Return(Value),
    Throw(ExecError),
}

impl Control {
    /// Split into the signal it carries, or the error it throws
    pub fn into_signal(self) -> Result<Signal, ExecError> {
        match self {
            Control::Break => Ok(Signal::Break),
            Control::Continue => Ok(Signal::Continue),
            Control::Return(v) => Ok(Signal::Return(v)),
            Control::Throw(err) => Err(err),
        }
    }
}

impl From<Signal> for Control {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Break => Control::Break,
            Signal::Continue => Control::Continue,
            Signal::Return(v) => Control::Return(v),
        }
    }
}

impl From<ExecError> for Control {
    fn from(err: ExecError) -> Self {
        Control::Throw(err)
    }
}

/// Result of performing any functor
pub type PerformResult = Result<Value, Control>;
