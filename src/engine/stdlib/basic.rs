//! `literal` and `raise`

use super::super::node::Functor;
use super::super::types::{
    Call, ConfigError, Control, ExecError, PerformResult, SerializeError, Value,
};
use super::invalid_attribute;
use crate::tree::Element;

pub const LITERAL: &str = "literal";
pub const RAISE: &str = "raise";

const VALUE: &str = "value";
const FORMAT: &str = "format";
const MESSAGE: &str = "message";

/* ===================== Literal ===================== */

/// Constant value; a string unless `format="json"`
#[derive(Debug, Clone)]
pub struct Literal {
    raw: Option<String>,
    format: Option<String>,
    value: Value,
}

impl Literal {
    pub fn configure(implementor: &Element) -> Result<Self, ConfigError> {
        let raw = implementor.attribute(VALUE).map(str::to_string);
        let format = implementor.attribute(FORMAT).map(str::to_string);
        let text = raw.as_deref().unwrap_or("");

        let value = match format.as_deref() {
            None | Some("string") => Value::String(text.to_string()),
            Some("json") => serde_json::from_str(text)
                .map_err(|e| invalid_attribute(LITERAL, VALUE, text, e.to_string()))?,
            Some(other) => {
                return Err(invalid_attribute(
                    LITERAL,
                    FORMAT,
                    other,
                    "expected \"string\" or \"json\"",
                ))
            }
        };

        Ok(Self { raw, format, value })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Functor for Literal {
    fn kind(&self) -> &str {
        LITERAL
    }

    fn perform(&self, _call: &mut Call<'_>) -> PerformResult {
        Ok(self.value.clone())
    }

    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        if let Some(raw) = &self.raw {
            implementor.set_attribute_value(VALUE, raw.as_str());
        }
        if let Some(format) = &self.format {
            implementor.set_attribute_value(FORMAT, format.as_str());
        }
        Ok(())
    }
}

/* ===================== Raise ===================== */

/// Always fails with an execution error carrying `message`
#[derive(Debug, Clone)]
pub struct Raise {
    message: Option<String>,
}

impl Raise {
    pub fn configure(implementor: &Element) -> Self {
        Self {
            message: implementor.attribute(MESSAGE).map(str::to_string),
        }
    }
}

impl Functor for Raise {
    fn kind(&self) -> &str {
        RAISE
    }

    fn perform(&self, _call: &mut Call<'_>) -> PerformResult {
        let message = self.message.as_deref().unwrap_or("raised");
        Err(Control::Throw(ExecError::functor(RAISE, message)))
    }

    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        if let Some(message) = &self.message {
            implementor.set_attribute_value(MESSAGE, message.as_str());
        }
        Ok(())
    }
}
