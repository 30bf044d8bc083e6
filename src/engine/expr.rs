//! Expression wrapper around a node
//!
//! An [`Expr`] adds two things to the node it wraps: an optional
//! `assignTo` target in the argument dictionary, and the root flag that
//! decides whether a `return` signal is absorbed here.

use super::builder::Builder;
use super::node::{Node, ASSIGN_TO, IMPLEMENTOR};
use super::types::{
    Call, ConfigError, Context, Control, DisposeError, PerformResult, SerializeError,
};
use crate::tree::Element;

#[derive(Debug)]
pub struct Expr {
    node: Node,
    assign_to: Option<String>,
    is_root: bool,
}

impl Expr {
    pub fn new(node: Node, assign_to: Option<String>, is_root: bool) -> Self {
        Self {
            node,
            assign_to,
            is_root,
        }
    }

    /// Build from an expression element: its `implementor` child plus an
    /// optional `assignTo` attribute
    pub fn configure(
        element: &Element,
        builder: &Builder<'_>,
        is_root: bool,
    ) -> Result<Self, ConfigError> {
        let implementor =
            element
                .element(IMPLEMENTOR)
                .ok_or_else(|| ConfigError::MissingElement {
                    parent: element.name.clone(),
                    name: IMPLEMENTOR.to_string(),
                })?;

        let node = builder.build_node(implementor)?;
        let assign_to = element.attribute(ASSIGN_TO).map(str::to_string);

        Ok(Self::new(node, assign_to, is_root))
    }

    pub fn serialize(&self, element: &mut Element) -> Result<(), SerializeError> {
        if let Some(name) = &self.assign_to {
            element.set_attribute_value(ASSIGN_TO, name.as_str());
        }
        self.node.serialize(element.new_element(IMPLEMENTOR))
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn assign_to(&self) -> Option<&str> {
        self.assign_to.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let value = match self.node.perform(call) {
            Ok(value) => value,
            Err(Control::Return(value)) if self.is_root => return Ok(value),
            Err(other) => return Err(other),
        };

        if let Some(name) = &self.assign_to {
            call.args.put(name.as_str(), value.clone());
        }
        Ok(value)
    }

    pub fn bind(&mut self, context: &Context) -> Result<(), ConfigError> {
        self.node.bind(context)
    }

    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        self.node.dispose()
    }
}
