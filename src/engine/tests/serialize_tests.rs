//! Tests for writing trees back to their configuration form

use super::helpers::{bound, parse_tree, try_build};
use crate::tree::{parse_document, write_document};

const FULL: &str = r#"
    script(assignTo="result") {
      implementor(type="block", catchAs="caught") {
        init {
          step(assignTo="ready") { implementor(type="literal", value="true", format="json") }
        }
        body {
          step {
            implementor(type="loop") {
              init { implementor(type="assign", assignTo="i") { value { implementor(type="literal", value="0", format="json") } } }
              while { implementor(type="compare", name="i", op="lt", value="3") }
              do {
                implementor(type="condition") {
                  if { implementor(type="compare", name="i", op="eq", value="1") }
                  then { implementor(type="continue") }
                  else { implementor(type="increment", name="i", by="1") }
                }
              }
            }
          }
          step { implementor(type="return") { value { implementor(type="arg", name="i") } } }
        }
        error { step { implementor(type="raise", message="rethrown") } }
        finally { step { implementor(type="trace", label="done") } }
        dispose { step { implementor(type="probe", label="cleanup") } }
      }
    }
"#;

#[test]
fn test_serialize_reproduces_configuration() {
    let script = try_build(FULL).unwrap();
    let element = script.to_element("script").unwrap();

    assert_eq!(element, parse_tree(FULL));
}

#[test]
fn test_serialized_tree_rebuilds_identically() {
    let first = try_build(FULL).unwrap().to_element("script").unwrap();

    let text = write_document(&first).unwrap();
    let second = try_build(&text).unwrap().to_element("script").unwrap();

    assert_eq!(parse_document(&text).unwrap(), first);
    assert_eq!(second, first);
}

#[test]
fn test_serialize_after_bind_is_unchanged() {
    let source = r#"
        script {
          implementor(type="block") {
            body { step { implementor(type="arg", name="x") } }
          }
        }
    "#;

    let script = bound(source);
    assert_eq!(script.to_element("script").unwrap(), parse_tree(source));
}

#[test]
fn test_empty_sections_are_omitted() {
    let source = r#"
        script {
          implementor(type="block") {
            init { }
            body { step { implementor(type="break") } }
            error { }
          }
        }
    "#;

    let element = try_build(source).unwrap().to_element("script").unwrap();
    let block = element.element("implementor").unwrap();

    assert!(block.element("init").is_none());
    assert!(block.element("error").is_none());
    assert_eq!(block.element("body").unwrap().elements("step").count(), 1);
}

#[test]
fn test_root_element_name_is_chosen_by_caller() {
    let element = try_build(r#"script { implementor(type="literal", value="x") }"#)
        .unwrap()
        .to_element("program")
        .unwrap();

    assert_eq!(element.name, "program");
    assert_eq!(
        element.element("implementor").and_then(|i| i.attribute("type")),
        Some("literal")
    );
}
