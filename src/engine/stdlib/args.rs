//! Leaves working on the argument dictionary: `arg`, `increment`, `compare`

use super::super::node::Functor;
use super::super::types::{
    Call, ConfigError, Context, ExecError, PerformResult, SerializeError, Value,
};
use super::{invalid_attribute, required_attribute};
use crate::tree::Element;
use serde_json::json;

pub const ARG: &str = "arg";
pub const INCREMENT: &str = "increment";
pub const COMPARE: &str = "compare";

const NAME: &str = "name";
const BY: &str = "by";
const OP: &str = "op";
const VALUE: &str = "value";

/* ===================== Arg ===================== */

/// Look a name up in the arguments, falling back to the bound context
#[derive(Debug, Clone)]
pub struct Arg {
    name: String,
    context: Option<Context>,
}

impl Arg {
    pub fn configure(implementor: &Element) -> Result<Self, ConfigError> {
        Ok(Self {
            name: required_attribute(implementor, ARG, NAME)?.to_string(),
            context: None,
        })
    }
}

impl Functor for Arg {
    fn kind(&self) -> &str {
        ARG
    }

    fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let found = call
            .args
            .get(&self.name)
            .or_else(|| self.context.as_ref().and_then(|c| c.get(&self.name)));
        Ok(found.cloned().unwrap_or(Value::Null))
    }

    fn bind(&mut self, context: &Context) -> Result<(), ConfigError> {
        self.context = Some(context.clone());
        Ok(())
    }

    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        implementor.set_attribute_value(NAME, self.name.as_str());
        Ok(())
    }
}

/* ===================== Increment ===================== */

/// Add `by` (default 1) to a numeric argument, treating missing or null
/// as zero; stores and yields the new value
#[derive(Debug, Clone)]
pub struct Increment {
    name: String,
    by_raw: Option<String>,
    by: f64,
}

impl Increment {
    pub fn configure(implementor: &Element) -> Result<Self, ConfigError> {
        let name = required_attribute(implementor, INCREMENT, NAME)?.to_string();
        let by_raw = implementor.attribute(BY).map(str::to_string);
        let by = match by_raw.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid_attribute(INCREMENT, BY, raw, e.to_string()))?,
            None => 1.0,
        };

        Ok(Self { name, by_raw, by })
    }
}

impl Functor for Increment {
    fn kind(&self) -> &str {
        INCREMENT
    }

    fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let next = match call.args.get(&self.name) {
            None | Some(Value::Null) => number(self.by),
            Some(Value::Number(n)) => match (n.as_i64(), self.integral_by()) {
                (Some(i), Some(by)) => match i.checked_add(by) {
                    Some(sum) => json!(sum),
                    None => number(i as f64 + self.by),
                },
                _ => number(n.as_f64().unwrap_or_default() + self.by),
            },
            Some(other) => {
                return Err(ExecError::Type(format!(
                    "cannot increment '{}' holding {}",
                    self.name, other
                ))
                .into())
            }
        };

        call.args.put(self.name.as_str(), next.clone());
        Ok(next)
    }

    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        implementor.set_attribute_value(NAME, self.name.as_str());
        if let Some(by) = &self.by_raw {
            implementor.set_attribute_value(BY, by.as_str());
        }
        Ok(())
    }
}

impl Increment {
    /// `by` as an integer, when it is one and fits in `i64`
    fn integral_by(&self) -> Option<i64> {
        in_i64_range(self.by).then(|| self.by as i64)
    }
}

fn in_i64_range(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Integral floats stay integers so counters read naturally
fn number(f: f64) -> Value {
    if in_i64_range(f) {
        json!(f as i64)
    } else {
        json!(f)
    }
}

/* ===================== Compare ===================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "lt" => Some(CompareOp::Lt),
            "le" => Some(CompareOp::Le),
            "eq" => Some(CompareOp::Eq),
            "ne" => Some(CompareOp::Ne),
            "gt" => Some(CompareOp::Gt),
            "ge" => Some(CompareOp::Ge),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Lt => "lt",
            CompareOp::Le => "le",
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Gt => "gt",
            CompareOp::Ge => "ge",
        }
    }
}

/// Compare an argument against a constant
///
/// `value` is read as JSON when it parses, otherwise as a string. Equality
/// works on any values; ordering needs two numbers.
#[derive(Debug, Clone)]
pub struct Compare {
    name: String,
    op: CompareOp,
    raw: String,
    value: Value,
}

impl Compare {
    pub fn configure(implementor: &Element) -> Result<Self, ConfigError> {
        let name = required_attribute(implementor, COMPARE, NAME)?.to_string();
        let op_raw = required_attribute(implementor, COMPARE, OP)?;
        let op = CompareOp::parse(op_raw).ok_or_else(|| {
            invalid_attribute(COMPARE, OP, op_raw, "expected one of lt, le, eq, ne, gt, ge")
        })?;
        let raw = required_attribute(implementor, COMPARE, VALUE)?.to_string();
        let value = serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw.clone()));

        Ok(Self {
            name,
            op,
            raw,
            value,
        })
    }
}

impl Functor for Compare {
    fn kind(&self) -> &str {
        COMPARE
    }

    fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let current = call.args.get(&self.name).unwrap_or(&Value::Null);

        let outcome = match self.op {
            CompareOp::Eq => same(current, &self.value),
            CompareOp::Ne => !same(current, &self.value),
            ordering => {
                let (Some(l), Some(r)) = (current.as_f64(), self.value.as_f64()) else {
                    return Err(ExecError::Type(format!(
                        "cannot order {} against {}",
                        current, self.value
                    ))
                    .into());
                };
                match ordering {
                    CompareOp::Lt => l < r,
                    CompareOp::Le => l <= r,
                    CompareOp::Gt => l > r,
                    _ => l >= r,
                }
            }
        };

        Ok(Value::Bool(outcome))
    }

    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        implementor.set_attribute_value(NAME, self.name.as_str());
        implementor.set_attribute_value(OP, self.op.as_str());
        implementor.set_attribute_value(VALUE, self.raw.as_str());
        Ok(())
    }
}

/// Equality that treats `3` and `3.0` as the same number
fn same(left: &Value, right: &Value) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}
