//! Single-location addressing for arbor documents.
//!
//! Two pointer forms are supported: RFC 6901 JSON Pointers (`/store/book/0`) and the
//! dotted/bracketed subset of JSONPath (`$.store.book[0]`). Both resolve to at most one
//! node, and both report the parent node so callers can insert or replace the target.
//!
//! ```
//! use arbor_pointer::{PathPointer, resolve};
//! use serde_json::json;
//!
//! let doc = json!({ "store": { "book": ["a", "b"] } });
//! let pointer = PathPointer::parse("$.store.book[-]").unwrap();
//! let resolved = resolve(&doc, &pointer);
//! assert!(!resolved.found());
//! assert_eq!(resolved.parent, Some(&json!(["a", "b"])));
//! ```

mod convert;
pub mod error;
mod json_pointer;
mod path_pointer;
mod resolve;

pub use convert::{path_to_pointer, pointer_to_path};
pub use error::PointerError;
pub use json_pointer::JsonPointer;
pub use path_pointer::{PathPointer, Token};
pub use resolve::{Resolved, resolve, resolve_path, resolve_pointer, resolve_query};

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_jpath::Query;
    use arbor_node::{ArenaDocument, JsonNode};
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_both_forms_agree_on_both_models() {
        init();
        let value = json!({ "a": [{ "b c": true }, { "b c": false }] });
        let arena = ArenaDocument::from_value(&value);

        let path = PathPointer::parse("$.a[1]['b c']").unwrap();
        let pointer = JsonPointer::from(&path);

        assert_eq!(resolve(&value, &path).value, Some(&json!(false)));
        assert_eq!(resolve_pointer(&value, &pointer).value, Some(&json!(false)));
        let node = resolve_pointer(arena.root(), &pointer).value.map(|n| n.to_value());
        assert_eq!(node, Some(json!(false)));
    }

    #[test]
    fn test_query_error_converts() {
        let error = Query::parse("$[").map_err(PointerError::from).unwrap_err();
        assert!(matches!(error, PointerError::Query(_)));
    }
}
