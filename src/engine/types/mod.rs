//! Type definitions for the engine
//!
//! - Control flow (Control, Signal)
//! - Runtime values (Value, Args, Call, Context)
//! - Errors (ConfigError, ExecError, DisposeError, SerializeError)

pub mod control;
pub mod errors;
pub mod values;

pub use control::{Control, PerformResult, Signal};
pub use errors::{ConfigError, DisposeError, ExecError, SerializeError};
pub use values::{Args, Call, Context, Value};
