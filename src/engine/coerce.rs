//! Boolean coercion used by `if` and `while`

use std::fmt;

use super::types::{ExecError, Value};

pub trait BoolCoercion: Send + Sync + fmt::Debug {
    fn convert(&self, value: &Value) -> Result<bool, ExecError>;
}

/// Default coercion
///
/// - booleans as-is
/// - strings `true/false`, `yes/no`, `y/n`, `on/off`, `1/0` (any case)
/// - numbers `1` and `0`
///
/// Anything else, null included, is a conversion error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCoercion;

impl BoolCoercion for StandardCoercion {
    fn convert(&self, value: &Value) -> Result<bool, ExecError> {
        let converted = match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => Some(true),
                "false" | "no" | "n" | "off" | "0" => Some(false),
                _ => None,
            },
            Value::Number(n) => match n.as_f64() {
                Some(f) if f == 1.0 => Some(true),
                Some(f) if f == 0.0 => Some(false),
                _ => None,
            },
            _ => None,
        };

        converted.ok_or_else(|| ExecError::Conversion {
            value: value.to_string(),
        })
    }
}
