//! Test helpers for engine tests
//!
//! Trees are written in text notation, pushed through a JSON round trip
//! and built against the standard registry plus a few probe leaves.

use crate::engine::{
    Args, Call, ConfigError, Context, DisposeError, EngineSettings, ExecError, Functor,
    PerformResult, Registry, Script, SerializeError, Value,
};
use crate::tree::{parse_document, Element};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Shared record of probe events, e.g. `bind:a`, `perform:a`, `dispose:a`
pub type Events = Arc<Mutex<Vec<String>>>;

pub fn events() -> Events {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn recorded(events: &Events) -> Vec<String> {
    events.lock().unwrap().clone()
}

/* ===================== Test Leaves ===================== */

/// Appends `label` to the `trace` argument (an array) and yields it
#[derive(Debug)]
struct Trace {
    label: String,
}

impl Functor for Trace {
    fn kind(&self) -> &str {
        "trace"
    }

    fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let mut trace = match call.args.get("trace") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        trace.push(json!(self.label));
        call.args.put("trace", Value::Array(trace));
        Ok(json!(self.label))
    }

    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        implementor.set_attribute_value("label", self.label.as_str());
        Ok(())
    }
}

/// Records its lifecycle into a shared event list
#[derive(Debug)]
struct Probe {
    label: String,
    fail_dispose: bool,
    events: Events,
}

impl Probe {
    fn record(&self, event: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:{}", event, self.label));
    }
}

impl Functor for Probe {
    fn kind(&self) -> &str {
        "probe"
    }

    fn perform(&self, _call: &mut Call<'_>) -> PerformResult {
        self.record("perform");
        Ok(json!(self.label))
    }

    fn bind(&mut self, _context: &Context) -> Result<(), ConfigError> {
        self.record("bind");
        Ok(())
    }

    fn dispose(&mut self) -> Result<(), DisposeError> {
        self.record("dispose");
        if self.fail_dispose {
            return Err(DisposeError::Functor {
                kind: "probe".to_string(),
                message: self.label.clone(),
            });
        }
        Ok(())
    }

    fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        implementor.set_attribute_value("label", self.label.as_str());
        if self.fail_dispose {
            implementor.set_attribute_value("failDispose", "true");
        }
        Ok(())
    }
}

/// Yields the call's receiver, or null
#[derive(Debug)]
struct Receiver;

impl Functor for Receiver {
    fn kind(&self) -> &str {
        "receiver"
    }

    fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        Ok(call.receiver.cloned().unwrap_or(Value::Null))
    }

    fn serialize(&self, _implementor: &mut Element) -> Result<(), SerializeError> {
        Ok(())
    }
}

/* ===================== Building ===================== */

/// Standard registry plus `trace`, `probe` and `receiver`
pub fn test_registry(events: &Events) -> Registry {
    let mut registry = Registry::with_stdlib();

    registry
        .register("trace", |el, _| {
            let functor: Box<dyn Functor> = Box::new(Trace {
                label: el.attribute_value("label", ""),
            });
            Ok(functor)
        })
        .unwrap();

    let shared = events.clone();
    registry
        .register("probe", move |el, _| {
            let functor: Box<dyn Functor> = Box::new(Probe {
                label: el.attribute_value("label", ""),
                fail_dispose: el.attribute("failDispose") == Some("true"),
                events: shared.clone(),
            });
            Ok(functor)
        })
        .unwrap();

    registry
        .register("receiver", |_, _| {
            let functor: Box<dyn Functor> = Box::new(Receiver);
            Ok(functor)
        })
        .unwrap();

    registry
}

/// Parse text notation and check the JSON encoding survives a round trip
pub fn parse_tree(source: &str) -> Element {
    let element = parse_document(source).expect("Parse tree failed");
    let json = element.to_json_pretty().expect("Tree serialization failed");
    let decoded = Element::from_json(&json).expect("Tree deserialization failed");
    assert_eq!(decoded, element);
    decoded
}

pub fn try_build(source: &str) -> Result<Script, ConfigError> {
    try_build_with(source, &events(), &EngineSettings::default())
}

pub fn try_build_with(
    source: &str,
    events: &Events,
    settings: &EngineSettings,
) -> Result<Script, ConfigError> {
    Script::configure(&parse_tree(source), &test_registry(events), settings)
}

/// Build and bind with an empty context
pub fn bound(source: &str) -> Script {
    bound_with(source, &events(), &EngineSettings::default())
}

pub fn bound_with(source: &str, events: &Events, settings: &EngineSettings) -> Script {
    let mut script = try_build_with(source, events, settings).expect("Build tree failed");
    script.bind(Context::default()).expect("Bind failed");
    script
}

/// Build, bind and perform once; returns the outcome and the final arguments
pub fn run(source: &str, args: Args) -> (Result<Value, ExecError>, Args) {
    let script = bound(source);
    let mut args = args;
    let result = script.perform(&mut args);
    (result, args)
}

/// The `trace` argument as a list of labels
pub fn trace(args: &Args) -> Vec<String> {
    match args.get("trace") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
