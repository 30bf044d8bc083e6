//! Conditional node: `if` / `then` / `else`

use std::sync::Arc;

use super::builder::Builder;
use super::coerce::BoolCoercion;
use super::expr::Expr;
use super::lifecycle::Teardown;
use super::types::{Call, ConfigError, Context, DisposeError, PerformResult, SerializeError, Value};
use crate::tree::Element;

const IF: &str = "if";
const THEN: &str = "then";
const ELSE: &str = "else";

/// Picks one branch from the coerced value of `if`
///
/// A missing `if` counts as true; a missing branch yields null. Errors and
/// signals from either branch pass through untouched.
#[derive(Debug)]
pub struct Condition {
    test: Option<Box<Expr>>,
    then_branch: Option<Box<Expr>>,
    else_branch: Option<Box<Expr>>,
    coercion: Arc<dyn BoolCoercion>,
}

impl Condition {
    pub fn new(
        test: Option<Expr>,
        then_branch: Option<Expr>,
        else_branch: Option<Expr>,
        coercion: Arc<dyn BoolCoercion>,
    ) -> Self {
        Self {
            test: test.map(Box::new),
            then_branch: then_branch.map(Box::new),
            else_branch: else_branch.map(Box::new),
            coercion,
        }
    }

    pub fn configure(implementor: &Element, builder: &Builder<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new(
            builder.optional_child(implementor, IF)?,
            builder.optional_child(implementor, THEN)?,
            builder.optional_child(implementor, ELSE)?,
            builder.coercion(),
        ))
    }

    pub fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        for (name, expr) in self.parts() {
            if let Some(expr) = expr {
                expr.serialize(implementor.new_element(name))?;
            }
        }
        Ok(())
    }

    pub fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let take_then = match &self.test {
            Some(test) => {
                let value = test.perform(call)?;
                self.coercion.convert(&value)?
            }
            None => true,
        };

        let branch = if take_then {
            &self.then_branch
        } else {
            &self.else_branch
        };

        match branch {
            Some(expr) => expr.perform(call),
            None => Ok(Value::Null),
        }
    }

    pub fn bind(&mut self, context: &Context) -> Result<(), ConfigError> {
        for expr in self.parts_mut().into_iter().flatten() {
            expr.bind(context)?;
        }
        Ok(())
    }

    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        let mut teardown = Teardown::new();
        for expr in self.parts_mut().into_iter().rev().flatten() {
            teardown.release(expr.dispose());
        }
        teardown.finish()
    }

    fn parts(&self) -> [(&'static str, Option<&Expr>); 3] {
        [
            (IF, self.test.as_deref()),
            (THEN, self.then_branch.as_deref()),
            (ELSE, self.else_branch.as_deref()),
        ]
    }

    fn parts_mut(&mut self) -> [Option<&mut Expr>; 3] {
        [
            self.test.as_deref_mut(),
            self.then_branch.as_deref_mut(),
            self.else_branch.as_deref_mut(),
        ]
    }
}
