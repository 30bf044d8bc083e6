//! Lifecycle states and teardown bookkeeping

use tracing::warn;

use super::types::DisposeError;

/// Lifecycle of a configured tree
///
/// `Unconfigured` has no representation: a tree only exists once its
/// configuration has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Configured,
    Bound,
    /// A bind attempt failed part way; the tree can only be disposed
    BindFailed,
    Disposed,
}

/// Collects disposal failures while a subtree is torn down
///
/// The first failure is kept and reported; later ones are logged and dropped.
#[derive(Debug, Default)]
pub struct Teardown {
    first: Option<DisposeError>,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, err: DisposeError) {
        if self.first.is_none() {
            self.first = Some(err);
        } else {
            warn!(error = %err, "discarding secondary dispose failure");
        }
    }

    /// Record the outcome of releasing one child
    pub fn release(&mut self, result: Result<(), DisposeError>) {
        if let Err(err) = result {
            self.record(err);
        }
    }

    pub fn finish(self) -> Result<(), DisposeError> {
        match self.first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
