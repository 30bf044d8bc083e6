//! Terminal nodes: assign, return, break, continue

use super::builder::Builder;
use super::expr::Expr;
use super::node::{ASSIGN, ASSIGN_TO};
use super::types::{
    Call, ConfigError, Context, Control, DisposeError, PerformResult, SerializeError, Value,
};
use crate::tree::Element;

const VALUE: &str = "value";

/* ===================== Assign ===================== */

/// Evaluate `value`, store it under `assignTo` and yield it
#[derive(Debug)]
pub struct Assign {
    value: Box<Expr>,
    assign_to: String,
}

impl Assign {
    pub fn new(value: Expr, assign_to: impl Into<String>) -> Self {
        Self {
            value: Box::new(value),
            assign_to: assign_to.into(),
        }
    }

    pub fn configure(implementor: &Element, builder: &Builder<'_>) -> Result<Self, ConfigError> {
        let assign_to =
            implementor
                .attribute(ASSIGN_TO)
                .ok_or_else(|| ConfigError::MissingAttribute {
                    element: ASSIGN.to_string(),
                    name: ASSIGN_TO.to_string(),
                })?;
        let value = builder.required_child(implementor, VALUE)?;

        Ok(Self::new(value, assign_to))
    }

    pub fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        implementor.set_attribute_value(ASSIGN_TO, self.assign_to.as_str());
        self.value.serialize(implementor.new_element(VALUE))
    }

    pub fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let value = self.value.perform(call)?;
        call.args.put(self.assign_to.as_str(), value.clone());
        Ok(value)
    }

    pub fn bind(&mut self, context: &Context) -> Result<(), ConfigError> {
        self.value.bind(context)
    }

    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        self.value.dispose()
    }
}

/* ===================== Return ===================== */

/// Evaluate the optional `value` and raise a return signal carrying it
#[derive(Debug)]
pub struct Return {
    value: Option<Box<Expr>>,
}

impl Return {
    pub fn new(value: Option<Expr>) -> Self {
        Self {
            value: value.map(Box::new),
        }
    }

    pub fn configure(implementor: &Element, builder: &Builder<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new(builder.optional_child(implementor, VALUE)?))
    }

    pub fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        match &self.value {
            Some(value) => value.serialize(implementor.new_element(VALUE)),
            None => Ok(()),
        }
    }

    pub fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let value = match &self.value {
            Some(expr) => expr.perform(call)?,
            None => Value::Null,
        };
        Err(Control::Return(value))
    }

    pub fn bind(&mut self, context: &Context) -> Result<(), ConfigError> {
        match &mut self.value {
            Some(value) => value.bind(context),
            None => Ok(()),
        }
    }

    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        match &mut self.value {
            Some(value) => value.dispose(),
            None => Ok(()),
        }
    }
}

/* ===================== Break / Continue ===================== */

pub fn perform_break() -> PerformResult {
    Err(Control::Break)
}

pub fn perform_continue() -> PerformResult {
    Err(Control::Continue)
}
