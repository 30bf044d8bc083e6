//! Standard leaf functors
//!
//! Small building blocks so trees can do useful work without host code:
//!
//! | type        | attributes                    | result                        |
//! |-------------|-------------------------------|-------------------------------|
//! | `literal`   | `value`, `format="json"`?     | the literal                   |
//! | `arg`       | `name`                        | argument, else context, else null |
//! | `raise`     | `message`?                    | always fails                  |
//! | `increment` | `name`, `by`?                 | the incremented number        |
//! | `compare`   | `name`, `op`, `value`         | boolean                       |

pub mod args;
pub mod basic;

use super::builder::Registry;
use super::node::Functor;
use super::types::ConfigError;
use crate::tree::Element;

pub use args::{Arg, Compare, CompareOp, Increment};
pub use basic::{Literal, Raise};

/// Register every standard leaf
pub fn register(registry: &mut Registry) {
    registry.insert(basic::LITERAL, |el, _| Literal::configure(el).map(leaf));
    registry.insert(basic::RAISE, |el, _| Ok(leaf(Raise::configure(el))));
    registry.insert(args::ARG, |el, _| Arg::configure(el).map(leaf));
    registry.insert(args::INCREMENT, |el, _| Increment::configure(el).map(leaf));
    registry.insert(args::COMPARE, |el, _| Compare::configure(el).map(leaf));
}

fn leaf<F: Functor + 'static>(functor: F) -> Box<dyn Functor> {
    Box::new(functor)
}

/* ===================== Attribute Helpers ===================== */

pub(crate) fn required_attribute<'e>(
    element: &'e Element,
    kind: &str,
    name: &str,
) -> Result<&'e str, ConfigError> {
    element
        .attribute(name)
        .ok_or_else(|| ConfigError::MissingAttribute {
            element: kind.to_string(),
            name: name.to_string(),
        })
}

pub(crate) fn invalid_attribute(
    kind: &str,
    name: &str,
    value: &str,
    reason: impl Into<String>,
) -> ConfigError {
    ConfigError::InvalidAttribute {
        element: kind.to_string(),
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}
