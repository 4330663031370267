//! arbor: JSONPath queries and pointers over pluggable JSON document models.
//!
//! This crate re-exports the member crates:
//!
//! - [`arbor_node`]: the [`JsonNode`] accessor trait and the two built-in document models,
//!   `&serde_json::Value` and the immutable [`ArenaDocument`].
//! - [`arbor_jpath`]: query compilation ([`Query::parse`]) and lazy selection ([`Query::select`]).
//! - [`arbor_pointer`]: single-location lookup with JSON Pointers and dotted path pointers.
//!
//! ```
//! use arbor::{ArenaDocument, Query, to_value};
//! use serde_json::json;
//!
//! let doc: ArenaDocument = r#"{ "a": [1, 2, 3] }"#.parse().unwrap();
//! let query = Query::parse("$.a[-1]").unwrap();
//! let last: Vec<_> = query.select(doc.root()).map(to_value).collect();
//! assert_eq!(last, vec![json!(3)]);
//! ```

pub use arbor_jpath::{
    DEFAULT_MAX_NESTING_DEPTH, Function, FunctionType, JPathError, LocatedSelection, NormalizedPath, ParseConfig,
    PathElement, Query, Selection, select,
};
pub use arbor_node::{ArenaDocument, ArenaNode, JsonNode, NodeError, NodeKind, Scalar, to_value};
pub use arbor_pointer::{
    JsonPointer, PathPointer, PointerError, Resolved, Token, path_to_pointer, pointer_to_path, resolve,
    resolve_path, resolve_pointer, resolve_query,
};

pub use arbor_jpath as jpath;
pub use arbor_node as node;
pub use arbor_pointer as pointer;

use log::debug;
use serde_json::Value;

/// Compiles `query` and returns clones of the matching values of `document`.
///
/// Use [`Query::parse`] and [`Query::select`] directly when a query runs more than once
/// or when borrowing the results is enough.
pub fn query_values(query: &str, document: &Value) -> Result<Vec<Value>, JPathError> {
    let compiled = Query::parse(query)?;
    let values: Vec<Value> = compiled.select(document).cloned().collect();
    debug!("Query '{}' selected {} value(s)", compiled, values.len());
    Ok(values)
}
