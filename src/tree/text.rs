//! Text notation for configuration trees
//!
//! ```text
//! script {
//!   implementor(type="block") {
//!     body {
//!       step(assignTo="greeting") { implementor(type="literal", value="hello") }
//!     }
//!   }
//! }
//! ```
//!
//! Attribute values are always double-quoted strings; `\"`, `\\`, `\n`,
//! `\r` and `\t` are the recognised escapes. `#` starts a line comment.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use super::{Element, TreeError};

#[derive(Parser)]
#[grammar = "tree/tree.pest"]
struct TreeParser;

impl From<pest::error::Error<Rule>> for TreeError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        TreeError::Syntax(err.to_string())
    }
}

/* ===================== Parsing ===================== */

/// Parse a document in text notation into its root element
pub fn parse_document(source: &str) -> Result<Element, TreeError> {
    let document = TreeParser::parse(Rule::document, source)?
        .next()
        .ok_or_else(|| TreeError::Syntax("empty document".to_string()))?;

    let root = document
        .into_inner()
        .find(|p| p.as_rule() == Rule::element)
        .ok_or_else(|| TreeError::Syntax("document has no root element".to_string()))?;

    build_element(root)
}

fn build_element(pair: Pair<Rule>) -> Result<Element, TreeError> {
    let mut parts = pair.into_inner();
    let name = parts
        .next()
        .ok_or_else(|| TreeError::Syntax("element without a name".to_string()))?;
    let mut element = Element::new(name.as_str());

    for part in parts {
        match part.as_rule() {
            Rule::attributes => {
                for attribute in part.into_inner() {
                    let mut kv = attribute.into_inner();
                    let (Some(key), Some(value)) = (kv.next(), kv.next()) else {
                        return Err(TreeError::Syntax("malformed attribute".to_string()));
                    };
                    let raw = value.into_inner().next().map(|p| p.as_str()).unwrap_or("");
                    element.set_attribute_value(key.as_str(), unescape(raw));
                }
            }
            Rule::children => {
                for child in part.into_inner() {
                    element.children.push(build_element(child)?);
                }
            }
            other => {
                return Err(TreeError::Syntax(format!("unexpected {:?} in element", other)));
            }
        }
    }

    Ok(element)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/* ===================== Writing ===================== */

/// Render an element tree in text notation
///
/// Fails when an element name or attribute key is not a valid identifier,
/// since the result could not be parsed back; such trees need JSON.
pub fn write_document(root: &Element) -> Result<String, TreeError> {
    let mut out = String::new();
    write_element(&mut out, root, 0)?;
    Ok(out)
}

fn write_element(out: &mut String, element: &Element, depth: usize) -> Result<(), TreeError> {
    check_ident(&element.name)?;
    out.push_str(&"  ".repeat(depth));
    out.push_str(&element.name);

    if !element.attributes.is_empty() {
        let mut attrs = Vec::with_capacity(element.attributes.len());
        for (k, v) in &element.attributes {
            check_ident(k)?;
            attrs.push(format!("{}=\"{}\"", k, escape(v)));
        }
        out.push('(');
        out.push_str(&attrs.join(", "));
        out.push(')');
    }

    if !element.children.is_empty() {
        out.push_str(" {\n");
        for child in &element.children {
            write_element(out, child, depth + 1)?;
        }
        out.push_str(&"  ".repeat(depth));
        out.push('}');
    }
    out.push('\n');
    Ok(())
}

/// The whole of `name` must match the grammar's `ident` rule
fn check_ident(name: &str) -> Result<(), TreeError> {
    let matched = TreeParser::parse(Rule::ident, name)
        .ok()
        .and_then(|mut pairs| pairs.next())
        .map(|pair| pair.as_str().len());

    if matched == Some(name.len()) {
        Ok(())
    } else {
        Err(TreeError::Syntax(format!(
            "'{}' is not a valid name in text notation",
            name
        )))
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
