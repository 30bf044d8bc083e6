//! Tree construction
//!
//! The [`Builder`] turns a configuration [`Element`] into a node tree in a
//! single pass. Everything a node needs from its surroundings (root flag,
//! engine settings, boolean coercion) is handed down here, so no node ever
//! needs to look at its parent.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::block::Block;
use super::coerce::{BoolCoercion, StandardCoercion};
use super::condition::Condition;
use super::expr::Expr;
use super::loops::Loop;
use super::node::{
    Functor, Node, ASSIGN, BLOCK, BREAK, BUILTIN_KINDS, CONDITION, CONTINUE, LOOP, RETURN, TYPE,
};
use super::settings::EngineSettings;
use super::terminal::{Assign, Return};
use super::types::ConfigError;
use crate::tree::Element;

/* ===================== Registry ===================== */

/// Factory building a leaf functor from its implementor element
pub type LeafFactory = Arc<
    dyn Fn(&Element, &Builder<'_>) -> Result<Box<dyn Functor>, ConfigError> + Send + Sync,
>;

/// Leaf functor factories by implementor type, plus the boolean coercion
/// shared by every condition and loop
#[derive(Clone)]
pub struct Registry {
    factories: HashMap<String, LeafFactory>,
    coercion: Arc<dyn BoolCoercion>,
}

impl Registry {
    /// Empty registry: built-in node kinds only
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            coercion: Arc::new(StandardCoercion),
        }
    }

    /// Registry preloaded with the standard leaves
    pub fn with_stdlib() -> Self {
        let mut registry = Self::new();
        super::stdlib::register(&mut registry);
        registry
    }

    /// Register a leaf factory; built-in kinds cannot be replaced
    pub fn register<F>(&mut self, kind: &str, factory: F) -> Result<(), ConfigError>
    where
        F: Fn(&Element, &Builder<'_>) -> Result<Box<dyn Functor>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        if BUILTIN_KINDS.contains(&kind) {
            return Err(ConfigError::ReservedFunctor(kind.to_string()));
        }
        self.insert(kind, factory);
        Ok(())
    }

    /// Register without the built-in name check
    pub(crate) fn insert<F>(&mut self, kind: &str, factory: F)
    where
        F: Fn(&Element, &Builder<'_>) -> Result<Box<dyn Functor>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(kind.to_string(), Arc::new(factory));
    }

    pub fn set_coercion(&mut self, coercion: Arc<dyn BoolCoercion>) {
        self.coercion = coercion;
    }

    pub fn factory(&self, kind: &str) -> Option<&LeafFactory> {
        self.factories.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.kinds().collect();
        kinds.sort_unstable();
        f.debug_struct("Registry")
            .field("kinds", &kinds)
            .field("coercion", &self.coercion)
            .finish()
    }
}

/* ===================== Builder ===================== */

pub struct Builder<'a> {
    registry: &'a Registry,
    settings: &'a EngineSettings,
}

impl<'a> Builder<'a> {
    pub fn new(registry: &'a Registry, settings: &'a EngineSettings) -> Self {
        Self { registry, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        self.settings
    }

    pub fn coercion(&self) -> Arc<dyn BoolCoercion> {
        Arc::clone(&self.registry.coercion)
    }

    /// Build the outermost expression of a tree
    pub fn build_root(&self, element: &Element) -> Result<Expr, ConfigError> {
        Expr::configure(element, self, true)
    }

    /// Build a nested expression
    pub fn build_expr(&self, element: &Element) -> Result<Expr, ConfigError> {
        Expr::configure(element, self, false)
    }

    /// Build the expression held by the named child of `parent`, if present
    pub fn optional_child(
        &self,
        parent: &Element,
        name: &str,
    ) -> Result<Option<Expr>, ConfigError> {
        parent.element(name).map(|e| self.build_expr(e)).transpose()
    }

    pub fn required_child(&self, parent: &Element, name: &str) -> Result<Expr, ConfigError> {
        self.optional_child(parent, name)?
            .ok_or_else(|| ConfigError::MissingElement {
                parent: parent.attribute_value(TYPE, &parent.name),
                name: name.to_string(),
            })
    }

    /// Build the node described by an implementor element
    pub fn build_node(&self, implementor: &Element) -> Result<Node, ConfigError> {
        let kind = implementor
            .attribute(TYPE)
            .ok_or_else(|| ConfigError::MissingAttribute {
                element: implementor.name.clone(),
                name: TYPE.to_string(),
            })?;

        let node = match kind {
            BLOCK => Node::Block(Block::configure(implementor, self)?),
            CONDITION => Node::Condition(Condition::configure(implementor, self)?),
            LOOP => Node::Loop(Loop::configure(implementor, self)?),
            ASSIGN => Node::Assign(Assign::configure(implementor, self)?),
            RETURN => Node::Return(Return::configure(implementor, self)?),
            BREAK => Node::Break,
            CONTINUE => Node::Continue,
            other => {
                let factory = self
                    .registry
                    .factory(other)
                    .ok_or_else(|| ConfigError::UnknownFunctor(other.to_string()))?;
                Node::Leaf(factory(implementor, self)?)
            }
        };
        Ok(node)
    }
}
