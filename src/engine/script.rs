//! Host-facing handle on a configured tree
//!
//! ```text
//! configure ──► Configured ──bind──► Bound ──perform*──► Bound
//!                   │    │             │
//!                   │    └─bind fails─► BindFailed
//!                   │                  │      │
//!                   └──────dispose─────┴──────┴──► Disposed
//! ```

use tracing::{info, warn};

use super::builder::{Builder, Registry};
use super::expr::Expr;
use super::lifecycle::Lifecycle;
use super::settings::EngineSettings;
use super::types::{
    Args, Call, ConfigError, Context, Control, DisposeError, ExecError, SerializeError, Signal,
    Value,
};
use crate::tree::Element;

#[derive(Debug)]
pub struct Script {
    root: Expr,
    context: Option<Context>,
    state: Lifecycle,
}

impl Script {
    /// Build a tree from its root expression element
    pub fn configure(
        element: &Element,
        registry: &Registry,
        settings: &EngineSettings,
    ) -> Result<Self, ConfigError> {
        let root = Builder::new(registry, settings).build_root(element)?;
        Ok(Self {
            root,
            context: None,
            state: Lifecycle::Configured,
        })
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Bind the context to every node and run block `init` sections
    ///
    /// Only one bind attempt is allowed per tree. A failed bind may leave
    /// part of the tree bound, so the script stays unusable for `perform`
    /// and later binds are rejected; it can still be disposed.
    pub fn bind(&mut self, context: Context) -> Result<(), ConfigError> {
        match self.state {
            Lifecycle::Bound => return Err(ConfigError::AlreadyBound),
            Lifecycle::BindFailed => return Err(ConfigError::BindFailed),
            Lifecycle::Disposed => return Err(ConfigError::Disposed),
            Lifecycle::Configured => {}
        }

        if let Err(err) = self.root.bind(&context) {
            self.state = Lifecycle::BindFailed;
            warn!(error = %err, "script bind failed");
            return Err(err);
        }
        self.context = Some(context);
        self.state = Lifecycle::Bound;
        info!(root = self.root.node().kind(), "script bound");
        Ok(())
    }

    pub fn perform(&self, args: &mut Args) -> Result<Value, ExecError> {
        self.perform_call(&mut Call::new(args))
    }

    /// Perform the tree once; no control signal escapes
    pub fn perform_call(&self, call: &mut Call<'_>) -> Result<Value, ExecError> {
        match self.state {
            Lifecycle::Configured | Lifecycle::BindFailed => return Err(ExecError::NotBound),
            Lifecycle::Disposed => return Err(ExecError::Disposed),
            Lifecycle::Bound => {}
        }

        match self.root.perform(call) {
            Ok(value) => Ok(value),
            Err(Control::Throw(err)) => Err(err),
            Err(Control::Break) => Err(ExecError::UnexpectedSignal(Signal::Break)),
            Err(Control::Continue) => Err(ExecError::UnexpectedSignal(Signal::Continue)),
            Err(Control::Return(value)) => Err(ExecError::UnexpectedSignal(Signal::Return(value))),
        }
    }

    /// Write the tree into `element` as a root expression element
    pub fn serialize(&self, element: &mut Element) -> Result<(), SerializeError> {
        if self.state == Lifecycle::Disposed {
            return Err(SerializeError::Disposed);
        }
        self.root.serialize(element)
    }

    pub fn to_element(&self, name: &str) -> Result<Element, SerializeError> {
        let mut element = Element::new(name);
        self.serialize(&mut element)?;
        Ok(element)
    }

    /// Tear the tree down; later calls are no-ops
    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        if self.state == Lifecycle::Disposed {
            return Ok(());
        }
        let was_bound = self.state == Lifecycle::Bound;
        self.state = Lifecycle::Disposed;

        let result = self.root.dispose();
        self.context = None;
        info!(was_bound, ok = result.is_ok(), "script disposed");
        result
    }
}

impl Drop for Script {
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            warn!(error = %err, "dispose failed while dropping script");
        }
    }
}
