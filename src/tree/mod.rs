//! Configuration tree
//!
//! A functor tree is described by a small named-tree document: every
//! element has a name, an unordered set of string attributes and an
//! ordered list of child elements. The engine configures itself from an
//! [`Element`] and serializes back into one, so the same schema serves
//! both directions.
//!
//! Two on-disk encodings are supported:
//! - JSON (the serde representation of [`Element`])
//! - a compact text notation, see [`text`]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

pub mod text;

pub use text::{parse_document, write_document};

/* ===================== Errors ===================== */

/// Failure to read or decode a configuration document
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("{0}")]
    Syntax(String),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/* ===================== Element ===================== */

/// One node of a configuration tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// First child with the given name
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name, in document order
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value, or `default` when the attribute is absent
    pub fn attribute_value(&self, name: &str, default: &str) -> String {
        self.attribute(name).unwrap_or(default).to_string()
    }

    pub fn set_attribute_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Append a new empty child and return it for filling in
    pub fn new_element(&mut self, name: impl Into<String>) -> &mut Element {
        self.children.push(Element::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /* ===================== Loading ===================== */

    pub fn from_json(source: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from disk; `.json` files are read as JSON, anything
    /// else as text notation
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let source = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&source),
            _ => parse_document(&source),
        }
    }
}
