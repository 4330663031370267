mod common;

use common::fixtures::bookstore;
use common::{assert_invalid, assert_selects};
use serde_json::json;

#[test]
fn test_length_of_strings_arrays_and_objects() {
    let doc = json!(["ab", [1, 2], { "a": 1, "b": 2 }, "abc", 12, null, true]);
    assert_selects("$[?length(@) == 2]", &doc, json!(["ab", [1, 2], { "a": 1, "b": 2 }]));
    assert_selects("$[?length(@) > 2]", &doc, json!(["abc"]));
}

#[test]
fn test_length_counts_code_points() {
    let doc = json!(["☺☺", "😀😀", "😀", "e\u{301}"]);
    assert_selects("$[?length(@) == 2]", &doc, json!(["☺☺", "😀😀", "e\u{301}"]));
    assert_selects("$[?length(@) == 1]", &doc, json!(["😀"]));
}

#[test]
fn test_length_of_scalars_is_nothing() {
    let doc = json!([{ "a": 12 }, { "a": "xy" }, { "b": 1 }]);
    assert_selects("$[?length(@.a) == length(@.c)]", &doc, json!([{ "a": 12 }, { "b": 1 }]));
    assert_selects("$[?length(@.a) >= 0]", &doc, json!([{ "a": "xy" }]));
    assert_selects("$[?length('abc') == 3]", &doc, json!([{ "a": 12 }, { "a": "xy" }, { "b": 1 }]));
}

#[test]
fn test_count() {
    let doc = json!([{ "a": [1, 2, 3] }, { "a": [] }, { "a": { "x": 1, "y": 2 } }, {}]);
    assert_selects("$[?count(@.a.*) == 3]", &doc, json!([{ "a": [1, 2, 3] }]));
    assert_selects("$[?count(@.a) == 1]", &doc, json!([{ "a": [1, 2, 3] }, { "a": [] }, { "a": { "x": 1, "y": 2 } }]));
    assert_selects("$[?count(@.a) == 0]", &doc, json!([{}]));
    assert_selects("$[?count(@..*) > 3]", &doc, json!([{ "a": [1, 2, 3] }]));
    assert_selects("$[?count(@.a[0, 0]) == 2]", &doc, json!([{ "a": [1, 2, 3] }]));
}

#[test]
fn test_value() {
    let doc = json!([{ "c": "x" }, { "d": { "c": "x" } }, { "c": "x", "d": { "c": "x" } }, { "c": "y" }]);
    assert_selects("$[?value(@..c) == 'x']", &doc, json!([{ "c": "x" }, { "d": { "c": "x" } }]));
    assert_selects("$[?value(@.c) == value(@.nope)]", &doc, json!([{ "d": { "c": "x" } }]));
    assert_selects(
        "$[?value(@..c) == value(@.nope)]",
        &doc,
        json!([{ "c": "x", "d": { "c": "x" } }]),
    );
}

#[test]
fn test_match_is_anchored() {
    let doc = bookstore();
    assert_selects(
        "$.store.book[?match(@.author, 'H.*')].title",
        &doc,
        json!(["Moby Dick"]),
    );
    assert_selects("$.store.book[?match(@.category, 'fic')].title", &doc, json!([]));
    assert_selects("$.store.book[?match(@.isbn, '0-[0-9]+-[0-9]+-[0-9]')].price", &doc, json!([8.99, 22.99]));
}

#[test]
fn test_search_finds_substrings() {
    let doc = bookstore();
    assert_selects(
        "$.store.book[?search(@.title, 'of the')].author",
        &doc,
        json!(["Nigel Rees", "J. R. R. Tolkien"]),
    );
    assert_selects("$.store.book[?!search(@.author, '[A-Z]\\\\.')].price", &doc, json!([8.95, 12.99, 8.99]));
}

#[test]
fn test_regex_dot_matches_line_separators() {
    let doc = json!(["a\u{2028}b", "a\u{2029}b", "a\nb", "a\rb", "axb", "ab"]);
    assert_selects("$[?match(@, 'a.b')]", &doc, json!(["a\u{2028}b", "a\u{2029}b", "axb"]));
    assert_selects("$[?search(@, 'a.b')]", &doc, json!(["a\u{2028}b", "a\u{2029}b", "axb"]));
    assert_selects("$[?match(@, 'a[.\\n]b')]", &doc, json!(["a\nb"]));
}

#[test]
fn test_regex_arguments_of_the_wrong_type() {
    let doc = json!([1, null, ["a"], "a"]);
    assert_selects("$[?match(@, 'a')]", &doc, json!(["a"]));
    assert_selects("$[?search(@, 1)]", &doc, json!([]));
    assert_selects("$[?!match(@, 'a')]", &doc, json!([1, null, ["a"]]));
}

#[test]
fn test_dynamic_patterns() {
    let doc = json!({ "pattern": "^[a-c]+$", "bad": "(", "values": ["abc", "abd", "cab"] });
    assert_selects("$.values[?search(@, $.pattern)]", &doc, json!(["abc", "cab"]));
    assert_selects("$.values[?search(@, $.bad)]", &doc, json!([]));
    assert_selects("$.values[?search(@, $.missing)]", &doc, json!([]));
}

#[test]
fn test_invalid_literal_pattern_never_matches() {
    let doc = json!(["(", "a"]);
    assert_selects("$[?search(@, '(')]", &doc, json!([]));
    assert_selects("$[?!search(@, '(')]", &doc, json!(["(", "a"]));
}

#[test]
fn test_nested_function_calls() {
    let doc = json!([{ "a": ["xy", "z"] }, { "a": ["xyz"] }]);
    assert_selects("$[?length(value(@.a[0])) == 2]", &doc, json!([{ "a": ["xy", "z"] }]));
    assert_selects("$[?count(@.a[?length(@) == 1]) == 1]", &doc, json!([{ "a": ["xy", "z"] }]));
}

#[test]
fn test_function_type_errors() {
    for query in [
        "$[?length(@)]",
        "$[?count(@.*)]",
        "$[?value(@.a)]",
        "$[?match(@.a, 'x') == true]",
        "$[?search(@.a, 'x') != false]",
        "$[?length() == 1]",
        "$[?length(@.a, @.b) == 1]",
        "$[?count(1) == 1]",
        "$[?count('a') == 1]",
        "$[?value(true) == 1]",
        "$[?length(@.*) == 1]",
        "$[?match(@.*, 'a')]",
        "$[?match(@.a)]",
        "$[?length(@.a == 1) == 1]",
        "$[?length(@.a && @.b) == 1]",
        "$[?count(match(@.a, 'x')) == 1]",
        "$[?length(match(@.a, 'x')) == 1]",
    ] {
        assert!(assert_invalid(query).is_type(), "{query}");
    }
}

#[test]
fn test_function_syntax_errors() {
    for query in [
        "$[?foo(@) == 1]",
        "$[?Length(@) == 1]",
        "$[?length (@) == 1]",
        "$[?length(@ == 1]",
        "$[?length(@,) == 1]",
    ] {
        assert!(assert_invalid(query).is_syntax(), "{query}");
    }
}
