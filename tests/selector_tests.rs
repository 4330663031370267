mod common;

use common::fixtures::{bookstore, digits};
use common::{TestResult, assert_selects, select_both};
use serde_json::json;

#[test]
fn test_root_selects_whole_document() {
    let doc = json!({ "k": "v" });
    assert_selects("$", &doc, json!([{ "k": "v" }]));
}

#[test]
fn test_name_selectors() {
    let doc = bookstore();
    assert_selects("$.store.bicycle.color", &doc, json!(["red"]));
    assert_selects("$['store']['bicycle']['color']", &doc, json!(["red"]));
    assert_selects("$[\"store\"][\"bicycle\"].price", &doc, json!([399]));
    assert_selects("$.store.missing", &doc, json!([]));
    assert_selects("$.store.book.title", &doc, json!([]));
}

#[test]
fn test_quoted_names_with_escapes() {
    let doc = json!({ "o": { "j j": { "k.k": 3 } }, "'": { "@": 2 }, "☺": 1, "\n": 4 });
    assert_selects("$.o['j j']['k.k']", &doc, json!([3]));
    assert_selects("$.o[\"j j\"][\"k.k\"]", &doc, json!([3]));
    assert_selects(r#"$["'"]["@"]"#, &doc, json!([2]));
    assert_selects(r"$['\'']['@']", &doc, json!([2]));
    assert_selects(r"$['☺']", &doc, json!([1]));
    assert_selects("$.☺", &doc, json!([1]));
    assert_selects(r"$['\n']", &doc, json!([4]));
}

#[test]
fn test_index_selectors() {
    let doc = json!(["a", "b"]);
    assert_selects("$[1]", &doc, json!(["b"]));
    assert_selects("$[-2]", &doc, json!(["a"]));
    assert_selects("$[2]", &doc, json!([]));
    assert_selects("$[-3]", &doc, json!([]));
    assert_selects("$[0]", &json!({ "0": "x" }), json!([]));
}

#[test]
fn test_wildcard_follows_document_order() {
    let doc = json!({ "z": 1, "a": [2, 3], "m": { "k": 4 } });
    assert_selects("$.*", &doc, json!([1, [2, 3], { "k": 4 }]));
    assert_selects("$[*]", &json!([true, null]), json!([true, null]));
    assert_selects("$.a.*", &doc, json!([2, 3]));
    assert_selects("$.z.*", &doc, json!([]));
}

#[test]
fn test_multiple_selectors_keep_duplicates() {
    let doc = digits();
    assert_selects("$[0,2]", &doc, json!([0, 2]));
    assert_selects("$[1,0:3]", &doc, json!([1, 0, 1, 2]));
    assert_selects("$[*,*]", &json!([0, 1, 2]), json!([0, 1, 2, 0, 1, 2]));
    assert_selects("$[9, 0, 9]", &doc, json!([9, 0, 9]));

    let doc = json!({ "a": 1, "b": 2 });
    assert_selects("$['b', 'a', 'missing', 'b']", &doc, json!([2, 1, 2]));
}

#[test]
fn test_blank_space_at_token_boundaries() -> TestResult {
    let doc = bookstore();
    let expected = select_both("$.store.book[0].title", &doc)?;
    assert_eq!(select_both("$ .store\t.book [ 0 ]\n.title", &doc)?, expected);
    assert_eq!(select_both("$['store'] ['book'][0] ['title']", &doc)?, expected);
    Ok(())
}

#[test]
fn test_chained_segments() {
    let doc = bookstore();
    assert_selects(
        "$.store.book[*].author",
        &doc,
        json!(["Nigel Rees", "Evelyn Waugh", "Herman Melville", "J. R. R. Tolkien"]),
    );
    assert_selects("$.store.book[-1].isbn", &doc, json!(["0-395-19395-8"]));
    assert_selects("$.store.*.price", &doc, json!([399]));
}

#[test]
fn test_compiled_query_is_reusable() -> TestResult {
    let query = arbor::Query::parse("$[0]")?;
    let first = json!(["a"]);
    let second = json!(["b"]);
    assert_eq!(query.select(&first).collect::<Vec<_>>(), vec![&json!("a")]);
    assert_eq!(query.select(&second).collect::<Vec<_>>(), vec![&json!("b")]);
    assert_eq!(query.select(&first).collect::<Vec<_>>(), vec![&json!("a")]);
    Ok(())
}
