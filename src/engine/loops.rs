//! Loop node: `init` / `while` / `do`

use std::sync::Arc;

use tracing::{debug, trace};

use super::builder::Builder;
use super::coerce::BoolCoercion;
use super::expr::Expr;
use super::lifecycle::Teardown;
use super::node::LOOP;
use super::types::{
    Call, ConfigError, Context, Control, DisposeError, PerformResult, SerializeError, Value,
};
use crate::tree::Element;

const INIT: &str = "init";
const WHILE: &str = "while";
const DO: &str = "do";

/// Repeats `do` while the coerced value of `while` holds
///
/// `init` runs once per perform. `break` and `continue` raised by `do` are
/// absorbed here; everything else propagates. The loop itself yields null.
///
/// A missing `while` counts as true, so at least one of `while` and `do`
/// must be configured or the loop could never end.
#[derive(Debug)]
pub struct Loop {
    init: Option<Box<Expr>>,
    test: Option<Box<Expr>>,
    body: Option<Box<Expr>>,
    coercion: Arc<dyn BoolCoercion>,
}

impl Loop {
    pub fn new(
        init: Option<Expr>,
        test: Option<Expr>,
        body: Option<Expr>,
        coercion: Arc<dyn BoolCoercion>,
    ) -> Self {
        Self {
            init: init.map(Box::new),
            test: test.map(Box::new),
            body: body.map(Box::new),
            coercion,
        }
    }

    pub fn configure(implementor: &Element, builder: &Builder<'_>) -> Result<Self, ConfigError> {
        let init = builder.optional_child(implementor, INIT)?;
        let test = builder.optional_child(implementor, WHILE)?;
        let body = builder.optional_child(implementor, DO)?;
        if test.is_none() && body.is_none() {
            return Err(ConfigError::MissingElement {
                parent: LOOP.to_string(),
                name: WHILE.to_string(),
            });
        }

        Ok(Self::new(init, test, body, builder.coercion()))
    }

    pub fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        let parts = [
            (INIT, self.init.as_deref()),
            (WHILE, self.test.as_deref()),
            (DO, self.body.as_deref()),
        ];
        for (name, expr) in parts {
            if let Some(expr) = expr {
                expr.serialize(implementor.new_element(name))?;
            }
        }
        Ok(())
    }

    pub fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        if let Some(init) = &self.init {
            init.perform(call)?;
        }

        let mut iterations: u64 = 0;
        while self.holds(call)? {
            iterations += 1;
            let Some(body) = &self.body else {
                continue;
            };

            match body.perform(call) {
                Ok(_) => {}
                Err(Control::Continue) => {
                    trace!(iteration = iterations, "loop: continue");
                }
                Err(Control::Break) => {
                    debug!(iteration = iterations, "loop: break");
                    break;
                }
                Err(other) => return Err(other),
            }
        }

        Ok(Value::Null)
    }

    fn holds(&self, call: &mut Call<'_>) -> Result<bool, Control> {
        match &self.test {
            Some(test) => {
                let value = test.perform(call)?;
                Ok(self.coercion.convert(&value)?)
            }
            None => Ok(true),
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

    fn parts_mut(&mut self) -> [Option<&mut Expr>; 3] {
        [
            self.init.as_deref_mut(),
            self.test.as_deref_mut(),
            self.body.as_deref_mut(),
        ]
    }
}
