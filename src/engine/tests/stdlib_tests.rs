//! Tests for the standard leaves

use super::super::*;
use super::helpers::{run, try_build};
use maplit::hashmap;
use serde_json::json;

fn leaf(implementor: &str) -> String {
    format!("script {{ {} }}", implementor)
}

#[test]
fn test_literal_formats() {
    let cases = [
        (r#"implementor(type="literal", value="42")"#, json!("42")),
        (r#"implementor(type="literal", value="42", format="string")"#, json!("42")),
        (r#"implementor(type="literal", value="42", format="json")"#, json!(42)),
        (
            r#"implementor(type="literal", value="[1, \"two\", null]", format="json")"#,
            json!([1, "two", null]),
        ),
        (r#"implementor(type="literal")"#, json!("")),
    ];

    for (source, expected) in cases {
        let (result, _) = run(&leaf(source), Args::new());
        assert_eq!(result, Ok(expected), "{}", source);
    }
}

#[test]
fn test_literal_rejects_bad_configuration() {
    let bad_json = try_build(&leaf(r#"implementor(type="literal", value="{", format="json")"#));
    assert!(matches!(bad_json, Err(ConfigError::InvalidAttribute { ref name, .. }) if name == "value"));

    let bad_format = try_build(&leaf(r#"implementor(type="literal", value="1", format="yaml")"#));
    assert!(matches!(bad_format, Err(ConfigError::InvalidAttribute { ref name, .. }) if name == "format"));
}

#[test]
fn test_raise_message() {
    let (with_message, _) = run(&leaf(r#"implementor(type="raise", message="nope")"#), Args::new());
    let (default, _) = run(&leaf(r#"implementor(type="raise")"#), Args::new());

    assert_eq!(with_message, Err(ExecError::functor("raise", "nope")));
    assert_eq!(default, Err(ExecError::functor("raise", "raised")));
}

#[test]
fn test_arg_lookup() {
    let source = leaf(r#"implementor(type="arg", name="who")"#);

    let (found, _) = run(&source, hashmap! { "who".to_string() => json!({"id": 1}) }.into());
    let (missing, _) = run(&source, Args::new());

    assert_eq!(found, Ok(json!({"id": 1})));
    assert_eq!(missing, Ok(Value::Null));
    assert!(matches!(
        try_build(&leaf(r#"implementor(type="arg")"#)),
        Err(ConfigError::MissingAttribute { ref name, .. }) if name == "name"
    ));
}

#[test]
fn test_increment() {
    let source = leaf(r#"implementor(type="increment", name="n")"#);

    let (from_missing, args) = run(&source, Args::new());
    assert_eq!(from_missing, Ok(json!(1)));
    assert_eq!(args.get("n"), Some(&json!(1)));

    let (from_null, _) = run(&source, hashmap! { "n".to_string() => Value::Null }.into());
    assert_eq!(from_null, Ok(json!(1)));

    let (from_int, _) = run(&source, hashmap! { "n".to_string() => json!(41) }.into());
    assert_eq!(from_int, Ok(json!(42)));

    let (from_float, _) = run(&source, hashmap! { "n".to_string() => json!(0.5) }.into());
    assert_eq!(from_float, Ok(json!(1.5)));

    let (from_text, args) = run(&source, hashmap! { "n".to_string() => json!("x") }.into());
    assert!(matches!(from_text, Err(ExecError::Type(_))));
    assert_eq!(args.get("n"), Some(&json!("x")));
}

#[test]
fn test_increment_by() {
    let down = leaf(r#"implementor(type="increment", name="n", by="-2")"#);
    let (result, _) = run(&down, hashmap! { "n".to_string() => json!(5) }.into());
    assert_eq!(result, Ok(json!(3)));

    let half = leaf(r#"implementor(type="increment", name="n", by="0.5")"#);
    let (result, _) = run(&half, hashmap! { "n".to_string() => json!(1) }.into());
    assert_eq!(result, Ok(json!(1.5)));

    let bad = try_build(&leaf(r#"implementor(type="increment", name="n", by="lots")"#));
    assert!(matches!(bad, Err(ConfigError::InvalidAttribute { ref name, .. }) if name == "by"));
}

#[test]
fn test_compare_operators() {
    let cases = [
        ("lt", 2, true),
        ("lt", 3, false),
        ("le", 3, true),
        ("eq", 3, true),
        ("ne", 3, false),
        ("gt", 4, true),
        ("ge", 2, false),
    ];

    for (op, n, expected) in cases {
        let source = leaf(&format!(
            r#"implementor(type="compare", name="n", op="{}", value="3")"#,
            op
        ));
        let (result, _) = run(&source, hashmap! { "n".to_string() => json!(n) }.into());
        assert_eq!(result, Ok(json!(expected)), "{} {} 3", n, op);
    }
}

#[test]
fn test_compare_equality_on_any_value() {
    let text = leaf(r#"implementor(type="compare", name="s", op="eq", value="hello")"#);
    let (same, _) = run(&text, hashmap! { "s".to_string() => json!("hello") }.into());
    let (other, _) = run(&text, hashmap! { "s".to_string() => json!("bye") }.into());
    assert_eq!(same, Ok(json!(true)));
    assert_eq!(other, Ok(json!(false)));

    let float = leaf(r#"implementor(type="compare", name="n", op="eq", value="3.0")"#);
    let (result, _) = run(&float, hashmap! { "n".to_string() => json!(3) }.into());
    assert_eq!(result, Ok(json!(true)));

    let null = leaf(r#"implementor(type="compare", name="missing", op="eq", value="null")"#);
    let (result, _) = run(&null, Args::new());
    assert_eq!(result, Ok(json!(true)));
}

#[test]
fn test_compare_ordering_needs_numbers() {
    let source = leaf(r#"implementor(type="compare", name="s", op="lt", value="3")"#);
    let (result, _) = run(&source, hashmap! { "s".to_string() => json!("2") }.into());

    assert!(matches!(result, Err(ExecError::Type(_))));
}

#[test]
fn test_increment_past_integer_range_becomes_float() {
    let source = leaf(r#"implementor(type="increment", name="n")"#);
    let (result, args) = run(&source, hashmap! { "n".to_string() => json!(i64::MAX) }.into());

    let value = result.unwrap();
    assert!(value.is_f64());
    assert!(value.as_f64().unwrap() >= i64::MAX as f64);
    assert_eq!(args.get("n"), Some(&value));

    let (result, _) = run(&source, hashmap! { "n".to_string() => json!(i64::MIN) }.into());
    assert_eq!(result, Ok(json!(i64::MIN + 1)));
}

#[test]
fn test_increment_by_huge_step() {
    let source = leaf(r#"implementor(type="increment", name="n", by="1e300")"#);
    let (result, _) = run(&source, hashmap! { "n".to_string() => json!(5) }.into());

    assert_eq!(result, Ok(json!(1e300)));
}
