//! Engine settings threaded into every node at construction time

use serde::{Deserialize, Serialize};

/// What a block does with a control signal raised by its `finally` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinallySignal {
    /// Drop the signal (logged at WARN); the outcome computed before
    /// `finally` leaves the block
    #[default]
    Discard,
    /// The signal replaces the outcome computed before `finally`
    Propagate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub finally_signal: FinallySignal,
}
