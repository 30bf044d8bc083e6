//! Tests for conditions

use super::super::*;
use super::helpers::{run, trace};
use maplit::hashmap;
use serde_json::json;

fn branch_on(test: &str) -> String {
    format!(
        r#"
        script {{
          implementor(type="condition") {{
            if {{ {} }}
            then {{ implementor(type="literal", value="yes") }}
            else {{ implementor(type="literal", value="no") }}
          }}
        }}
        "#,
        test
    )
}

#[test]
fn test_condition_picks_branch() {
    let cases = [
        (r#"implementor(type="literal", value="true", format="json")"#, "yes"),
        (r#"implementor(type="literal", value="false", format="json")"#, "no"),
        (r#"implementor(type="literal", value="Yes")"#, "yes"),
        (r#"implementor(type="literal", value="off")"#, "no"),
        (r#"implementor(type="literal", value="1", format="json")"#, "yes"),
        (r#"implementor(type="literal", value="0", format="json")"#, "no"),
    ];

    for (test, expected) in cases {
        let (result, _) = run(&branch_on(test), Args::new());
        assert_eq!(result, Ok(json!(expected)), "if {}", test);
    }
}

#[test]
fn test_condition_reads_arguments() {
    let source = branch_on(r#"implementor(type="compare", name="n", op="gt", value="10")"#);

    let (high, _) = run(&source, hashmap! { "n".to_string() => json!(11) }.into());
    let (low, _) = run(&source, hashmap! { "n".to_string() => json!(2.5) }.into());

    assert_eq!(high, Ok(json!("yes")));
    assert_eq!(low, Ok(json!("no")));
}

#[test]
fn test_missing_if_takes_then_branch() {
    let source = r#"
        script {
          implementor(type="condition") {
            then { implementor(type="literal", value="yes") }
            else { implementor(type="literal", value="no") }
          }
        }
    "#;

    let (result, _) = run(source, Args::new());
    assert_eq!(result, Ok(json!("yes")));
}

#[test]
fn test_missing_branch_yields_null() {
    let source = r#"
        script {
          implementor(type="condition") {
            if { implementor(type="literal", value="false") }
            then { implementor(type="trace", label="then") }
          }
        }
    "#;

    let (result, args) = run(source, Args::new());

    assert_eq!(result, Ok(Value::Null));
    assert!(trace(&args).is_empty());
}

#[test]
fn test_unconvertible_test_value_is_an_error() {
    let source = branch_on(r#"implementor(type="literal", value="{\"a\": 1}", format="json")"#);

    let (result, _) = run(&source, Args::new());
    assert!(matches!(result, Err(ExecError::Conversion { .. })));
}

#[test]
fn test_branch_errors_propagate() {
    let source = r#"
        script {
          implementor(type="condition") {
            then { implementor(type="raise", message="from branch") }
          }
        }
    "#;

    let (result, _) = run(source, Args::new());
    assert_eq!(result, Err(ExecError::functor("raise", "from branch")));
}

#[test]
fn test_only_chosen_branch_runs() {
    let source = r#"
        script {
          implementor(type="condition") {
            if { implementor(type="trace", label="no") }
            then { implementor(type="trace", label="then") }
            else { implementor(type="trace", label="else") }
          }
        }
    "#;

    let (result, args) = run(source, Args::new());

    assert_eq!(result, Ok(json!("else")));
    assert_eq!(trace(&args), vec!["no", "else"]);
}
