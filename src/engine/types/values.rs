//! Runtime value types: values, the argument dictionary, calls and context

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Runtime value produced by every functor
pub type Value = serde_json::Value;

/* ===================== Arguments ===================== */

/// Argument dictionary shared by every functor of one `perform`
///
/// Owned by the host; the engine only reads and writes entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Args {
    values: HashMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn put(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl From<HashMap<String, Value>> for Args {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for Args {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/* ===================== Call ===================== */

/// One invocation: an optional receiver plus the argument dictionary
#[derive(Debug)]
pub struct Call<'a> {
    pub receiver: Option<&'a Value>,
    pub args: &'a mut Args,
}

impl<'a> Call<'a> {
    pub fn new(args: &'a mut Args) -> Self {
        Self {
            receiver: None,
            args,
        }
    }

    pub fn with_receiver(receiver: &'a Value, args: &'a mut Args) -> Self {
        Self {
            receiver: Some(receiver),
            args,
        }
    }
}

/* ===================== Context ===================== */

/// Runtime binding injected once per tree and shared by every node
#[derive(Debug, Clone, Default)]
pub struct Context {
    env: Arc<HashMap<String, Value>>,
}

impl Context {
    pub fn new(env: HashMap<String, Value>) -> Self {
        Self { env: Arc::new(env) }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }
}
