#![allow(dead_code)]

pub mod fixtures;

use arbor::{ArenaDocument, JPathError, NormalizedPath, Query, to_value};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs `query` against `document` as a `serde_json::Value` and as an arena document,
/// checks that both models agree, and returns the selected values.
pub fn select_both(query: &str, document: &Value) -> Result<Vec<Value>, JPathError> {
    init_logger();
    let compiled = Query::parse(query)?;

    let from_value: Vec<Value> = compiled.select(document).cloned().collect();
    let arena = ArenaDocument::from_value(document);
    let from_arena: Vec<Value> = compiled.select(arena.root()).map(to_value).collect();

    assert_eq!(from_value, from_arena, "models disagree on {query}");
    Ok(from_value)
}

/// Asserts that `query` selects exactly `expected` (a JSON array), in order.
pub fn assert_selects(query: &str, document: &Value, expected: Value) {
    let selected = select_both(query, document).unwrap_or_else(|e| panic!("{query} failed to parse: {e}"));
    assert_eq!(Value::Array(selected), expected, "{query}");
}

/// Like [`select_both`], but returns the located results rendered as normalized paths.
pub fn located_paths(query: &str, document: &Value) -> Result<Vec<String>, JPathError> {
    init_logger();
    let compiled = Query::parse(query)?;

    let from_value: Vec<NormalizedPath> = compiled.select_located(document).map(|(path, _)| path).collect();
    let arena = ArenaDocument::from_value(document);
    let from_arena: Vec<NormalizedPath> = compiled.select_located(arena.root()).map(|(path, _)| path).collect();

    assert_eq!(from_value, from_arena, "models disagree on {query}");
    Ok(from_value.iter().map(ToString::to_string).collect())
}

/// Asserts that `query` is rejected while parsing, and returns the error.
pub fn assert_invalid(query: &str) -> JPathError {
    init_logger();
    match Query::parse(query) {
        Ok(compiled) => panic!("{query} should not parse, got {compiled}"),
        Err(err) => err,
    }
}
