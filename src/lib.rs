//! Functor - an embeddable engine for declarative, block-structured scripts
//!
//! A script is a tree of functors described by a configuration document
//! (see [`tree`]). It is built once through a [`Registry`], bound to a
//! [`Context`], and then performed any number of times against a
//! caller-owned [`Args`] dictionary.

pub mod cli;
pub mod config;
pub mod engine;
pub mod tree;

pub use engine::{
    Args, BoolCoercion, Call, ConfigError, Context, Control, DisposeError, EngineSettings,
    ExecError, FinallySignal, Functor, PerformResult, Registry, Script, SerializeError, Signal,
    Value,
};
pub use tree::{Element, TreeError};
