//! Executable nodes
//!
//! The engine knows a closed set of composite and terminal nodes. Anything
//! else is a leaf [`Functor`] supplied by the host through the
//! [`Registry`](super::builder::Registry).

use std::fmt;

use super::block::Block;
use super::condition::Condition;
use super::loops::Loop;
use super::terminal::{self, Assign, Return};
use super::types::{Call, ConfigError, Context, DisposeError, PerformResult, SerializeError};
use crate::tree::Element;

/* ===================== Schema Names ===================== */

pub const IMPLEMENTOR: &str = "implementor";
pub const TYPE: &str = "type";
pub const ASSIGN_TO: &str = "assignTo";

pub const BLOCK: &str = "block";
pub const CONDITION: &str = "condition";
pub const LOOP: &str = "loop";
pub const ASSIGN: &str = "assign";
pub const RETURN: &str = "return";
pub const BREAK: &str = "break";
pub const CONTINUE: &str = "continue";

/// Implementor types handled by the engine itself
pub const BUILTIN_KINDS: [&str; 7] = [BLOCK, CONDITION, LOOP, ASSIGN, RETURN, BREAK, CONTINUE];

/* ===================== Leaf Functors ===================== */

/// A host-supplied leaf node
///
/// Leaves are built once by a registered factory and then performed any
/// number of times, possibly from several threads at once.
pub trait Functor: Send + Sync + fmt::Debug {
    /// Implementor type name this functor was built from
    fn kind(&self) -> &str;

    fn perform(&self, call: &mut Call<'_>) -> PerformResult;

    /// Receive the tree's context; called exactly once
    fn bind(&mut self, _context: &Context) -> Result<(), ConfigError> {
        Ok(())
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        Ok(())
    }

    /// Write this functor's attributes and children into its implementor
    /// element (the `type` attribute is already set)
    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError>;
}

/* ===================== Node ===================== */

#[derive(Debug)]
pub enum Node {
    Assign(Assign),
    Return(Return),
    Break,
    Continue,
    Condition(Condition),
    Loop(Loop),
    Block(Block),
    Leaf(Box<dyn Functor>),
}

impl Node {
    pub fn kind(&self) -> &str {
        match self {
            Node::Assign(_) => ASSIGN,
            Node::Return(_) => RETURN,
            Node::Break => BREAK,
            Node::Continue => CONTINUE,
            Node::Condition(_) => CONDITION,
            Node::Loop(_) => LOOP,
            Node::Block(_) => BLOCK,
            Node::Leaf(f) => f.kind(),
        }
    }

    pub fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        match self {
            Node::Assign(n) => n.perform(call),
            Node::Return(n) => n.perform(call),
            Node::Break => terminal::perform_break(),
            Node::Continue => terminal::perform_continue(),
            Node::Condition(n) => n.perform(call),
            Node::Loop(n) => n.perform(call),
            Node::Block(n) => n.perform(call),
            Node::Leaf(f) => f.perform(call),
        }
    }

    pub fn bind(&mut self, context: &Context) -> Result<(), ConfigError> {
        match self {
            Node::Assign(n) => n.bind(context),
            Node::Return(n) => n.bind(context),
            Node::Break | Node::Continue => Ok(()),
            Node::Condition(n) => n.bind(context),
            Node::Loop(n) => n.bind(context),
            Node::Block(n) => n.bind(context),
            Node::Leaf(f) => f.bind(context),
        }
    }

    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        match self {
            Node::Assign(n) => n.dispose(),
            Node::Return(n) => n.dispose(),
            Node::Break | Node::Continue => Ok(()),
            Node::Condition(n) => n.dispose(),
            Node::Loop(n) => n.dispose(),
            Node::Block(n) => n.dispose(),
            Node::Leaf(f) => f.dispose(),
        }
    }

    /// Fill an implementor element: the `type` attribute plus the node's
    /// own attributes and children
    pub fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        implementor.set_attribute_value(TYPE, self.kind());
        match self {
            Node::Assign(n) => n.serialize(implementor),
            Node::Return(n) => n.serialize(implementor),
            Node::Break | Node::Continue => Ok(()),
            Node::Condition(n) => n.serialize(implementor),
            Node::Loop(n) => n.serialize(implementor),
            Node::Block(n) => n.serialize(implementor),
            Node::Leaf(f) => f.serialize(implementor),
        }
    }
}
