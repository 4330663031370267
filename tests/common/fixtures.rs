use serde_json::{Value, json};

/// The bookstore document from RFC 9535.
pub fn bookstore() -> Value {
    json!({
        "store": {
            "book": [
                {
                    "category": "reference",
                    "author": "Nigel Rees",
                    "title": "Sayings of the Century",
                    "price": 8.95
                },
                {
                    "category": "fiction",
                    "author": "Evelyn Waugh",
                    "title": "Sword of Honour",
                    "price": 12.99
                },
                {
                    "category": "fiction",
                    "author": "Herman Melville",
                    "title": "Moby Dick",
                    "isbn": "0-553-21311-3",
                    "price": 8.99
                },
                {
                    "category": "fiction",
                    "author": "J. R. R. Tolkien",
                    "title": "The Lord of the Rings",
                    "isbn": "0-395-19395-8",
                    "price": 22.99
                }
            ],
            "bicycle": {
                "color": "red",
                "price": 399
            }
        }
    })
}

/// `[0, 1, ..., 9]`
pub fn digits() -> Value {
    Value::Array((0..10).map(Value::from).collect())
}

/// Objects of mixed shape for filter tests.
pub fn mixed_items() -> Value {
    json!([
        { "a": "b", "d": "e" },
        { "b": "c", "d": "f" },
        { "a": null, "d": 1 },
        { "a": 1, "d": [1, 2] },
        { "a": { "x": 1 }, "d": true }
    ])
}
