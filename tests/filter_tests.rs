mod common;

use common::fixtures::{bookstore, mixed_items};
use common::{assert_invalid, assert_selects};
use serde_json::json;

#[test]
fn test_existence_filter() {
    let doc = json!([{ "a": "b", "d": "e" }, { "b": "c", "d": "f" }]);
    assert_selects("$[?@.a]", &doc, json!([{ "a": "b", "d": "e" }]));
    assert_selects("$[?!@.a]", &doc, json!([{ "b": "c", "d": "f" }]));
}

#[test]
fn test_null_member_exists() {
    let doc = mixed_items();
    assert_selects("$[?@.a].d", &doc, json!(["e", 1, [1, 2], true]));
    assert_selects("$[?@.a == null].d", &doc, json!([1]));
}

#[test]
fn test_absent_is_not_null() {
    let doc = json!([{ "b": 1 }]);
    assert_selects("$[?@.a == null]", &doc, json!([]));
    assert_selects("$[?@.a != null]", &doc, json!([{ "b": 1 }]));
}

#[test]
fn test_filter_on_object_members() {
    let doc = json!({ "x": { "v": 1 }, "y": { "v": 5 }, "z": 3 });
    assert_selects("$[?@.v > 2]", &doc, json!([{ "v": 5 }]));
    assert_selects("$[?@ == 3]", &doc, json!([3]));
}

#[test]
fn test_numeric_comparisons() {
    let doc = bookstore();
    assert_selects(
        "$.store.book[?@.price < 10].title",
        &doc,
        json!(["Sayings of the Century", "Moby Dick"]),
    );
    assert_selects("$.store.book[?@.price >= 22.99].title", &doc, json!(["The Lord of the Rings"]));
    assert_selects("$.store.book[?@.price <= 8.95].title", &doc, json!(["Sayings of the Century"]));

    let doc = json!([0, -0.0, 1, 1.0, 1e0, 100]);
    assert_selects("$[?@ == 0]", &doc, json!([0, -0.0]));
    assert_selects("$[?@ == 1]", &doc, json!([1, 1.0, 1e0]));
    assert_selects("$[?@ == 1e2]", &doc, json!([100]));
    assert_selects("$[?@ > -0.5E1 && @ < 0.5]", &doc, json!([0, -0.0]));
}

#[test]
fn test_string_comparisons() {
    let doc = json!(["a", "ab", "b", "B", "é", 1]);
    assert_selects("$[?@ < 'b']", &doc, json!(["a", "ab", "B"]));
    assert_selects("$[?@ >= \"b\"]", &doc, json!(["b", "é"]));
    assert_selects("$[?@ == 'ab']", &doc, json!(["ab"]));
}

#[test]
fn test_mismatched_types() {
    let doc = json!([1, "1", true, null, [1], { "a": 1 }]);
    assert_selects("$[?@ == 1]", &doc, json!([1]));
    assert_selects("$[?@ != 1]", &doc, json!(["1", true, null, [1], { "a": 1 }]));
    assert_selects("$[?@ < 2]", &doc, json!([1]));
    assert_selects("$[?@ <= true]", &doc, json!([]));
    assert_selects("$[?@ >= null]", &doc, json!([]));
    assert_selects("$[?@ == true]", &doc, json!([true]));
}

#[test]
fn test_structural_equality() {
    let doc = json!([
        { "a": [1, { "b": 2 }] },
        { "a": [{ "b": 2 }, 1] },
        { "a": { "x": 1, "y": 2 } },
        { "a": { "y": 2, "x": 1 } }
    ]);
    assert_selects("$[?@.a == $[0].a]", &doc, json!([{ "a": [1, { "b": 2 }] }]));
    assert_selects(
        "$[?@.a == $[2].a]",
        &doc,
        json!([{ "a": { "x": 1, "y": 2 } }, { "a": { "y": 2, "x": 1 } }]),
    );
    assert_selects("$[?@.a != $[2].a]", &doc, json!([{ "a": [1, { "b": 2 }] }, { "a": [{ "b": 2 }, 1] }]));
    assert_selects("$[?@.a < $[2].a]", &doc, json!([]));
}

#[test]
fn test_nothing_comparisons() {
    let doc = json!([{ "a": 1 }, { "b": 1 }]);
    assert_selects("$[?@.x == @.y]", &doc, json!([{ "a": 1 }, { "b": 1 }]));
    assert_selects("$[?@.a == @.y]", &doc, json!([{ "b": 1 }]));
    assert_selects("$[?@.a != @.b]", &doc, json!([{ "a": 1 }, { "b": 1 }]));
    assert_selects("$[?@.x <= @.y]", &doc, json!([]));
    assert_selects("$[?@.x >= @.y]", &doc, json!([]));
    assert_selects("$[?@.x < 1]", &doc, json!([]));
}

#[test]
fn test_root_references_inside_filters() {
    let doc = json!({ "limit": 2, "items": [1, 2, 3] });
    assert_selects("$.items[?@ > $.limit]", &doc, json!([3]));
    assert_selects("$.items[?$.limit]", &doc, json!([1, 2, 3]));
    assert_selects("$.items[?$.nope]", &doc, json!([]));
}

#[test]
fn test_nested_filters() {
    let doc = json!([[1, 2], [0], [5, 0], "x"]);
    assert_selects("$[?@[?@ > 1]]", &doc, json!([[1, 2], [5, 0]]));
    assert_selects("$[?@[?@ == $[1][0]]]", &doc, json!([[0], [5, 0]]));
}

#[test]
fn test_non_singular_existence_tests() {
    let doc = json!([{ "a": [] }, { "a": [1] }, { "a": { "b": { "c": 1 } } }]);
    assert_selects("$[?@.a[*]]", &doc, json!([{ "a": [1] }, { "a": { "b": { "c": 1 } } }]));
    assert_selects("$[?@..c]", &doc, json!([{ "a": { "b": { "c": 1 } } }]));
}

#[test]
fn test_logical_precedence() {
    let doc = json!([
        { "a": true },
        { "b": true, "c": true },
        { "b": true },
        { "c": true }
    ]);
    assert_selects("$[?@.a || @.b && @.c]", &doc, json!([{ "a": true }, { "b": true, "c": true }]));
    assert_selects("$[?(@.a || @.b) && @.c]", &doc, json!([{ "b": true, "c": true }]));
    assert_selects("$[?!(@.a || @.b)]", &doc, json!([{ "c": true }]));
    assert_selects("$[?!@.a && !@.b]", &doc, json!([{ "c": true }]));
}

#[test]
fn test_filter_blank_space() {
    let doc = json!([{ "a": 1 }, { "a": 2 }]);
    assert_selects("$[ ?  @.a\t==\n1 ]", &doc, json!([{ "a": 1 }]));
    assert_selects("$[?( @.a == 2 )]", &doc, json!([{ "a": 2 }]));
    assert_selects("$[?!  @.b]", &doc, json!([{ "a": 1 }, { "a": 2 }]));
}

#[test]
fn test_filter_next_to_other_selectors() {
    let doc = json!([1, 5, 3]);
    assert_selects("$[?@ > 2, 0]", &doc, json!([5, 3, 1]));
    assert_selects("$[0, ?@ > 2, ?@ > 4]", &doc, json!([1, 5, 3, 5]));
}

#[test]
fn test_filters_on_scalars_select_nothing() {
    assert_selects("$[?@]", &json!("abc"), json!([]));
    assert_selects("$[?@]", &json!([]), json!([]));
    assert_selects("$[?@]", &json!([null, false]), json!([null, false]));
}

#[test]
fn test_filter_type_errors() {
    for query in [
        "$[?true]",
        "$[?1]",
        "$[?'a']",
        "$[?null]",
        "$[?@.a && false]",
        "$[?@.* == 1]",
        "$[?@..a == 1]",
        "$[?@['a', 'b'] == 1]",
        "$[?@[0:1] == 1]",
        "$[?1 == $[*]]",
    ] {
        assert!(assert_invalid(query).is_type(), "{query}");
    }
}

#[test]
fn test_filter_syntax_errors() {
    for query in [
        "$[?]",
        "$[?@.a ==]",
        "$[?@.a = 1]",
        "$[?(@.a]",
        "$[?@.a)]",
        "$[?@.a == 1.]",
        "$[?@.a == 01]",
        "$[?@.a == 'x]",
        "$[?@.a === 1]",
        "$[?@.a || ]",
        "$[?!]",
        "$[?@ == True]",
    ] {
        assert!(assert_invalid(query).is_syntax(), "{query}");
    }
}
