//! # Functor Engine - Block-Structured Execution Tree
//!
//! A tree of executable nodes built once from a configuration [`Element`]
//! and then performed any number of times against a caller-owned argument
//! dictionary.
//!
//! ## Core Principles
//!
//! 1. **Recursive execution**: `perform` walks the tree top-down on the
//!    caller's stack; there are no suspension points
//! 2. **Explicit control flow**: every node returns `Result<Value, Control>`;
//!    `break`/`continue` are absorbed by the nearest loop, `return` by the
//!    root, and errors only by block `error` sections
//! 3. **Build once**: root flag, settings and coercion are threaded down in
//!    a single construction pass; the shape never changes afterwards
//! 4. **Shared reads**: after `bind`, a tree is read-only and may be
//!    performed from several threads, one dictionary per call
//!
//! [`Element`]: crate::tree::Element

pub mod block;
pub mod builder;
pub mod coerce;
pub mod condition;
pub mod expr;
pub mod lifecycle;
pub mod loops;
pub mod node;
pub mod script;
pub mod settings;
pub mod stdlib;
pub mod terminal;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use block::{Block, Section, Sections};
pub use builder::{Builder, LeafFactory, Registry};
pub use coerce::{BoolCoercion, StandardCoercion};
pub use condition::Condition;
pub use expr::Expr;
pub use lifecycle::Lifecycle;
pub use loops::Loop;
pub use node::{Functor, Node};
pub use script::Script;
pub use settings::{EngineSettings, FinallySignal};
pub use terminal::{Assign, Return};
pub use types::{
    Args, Call, ConfigError, Context, Control, DisposeError, ExecError, PerformResult,
    SerializeError, Signal, Value,
};
