//! A JSONPath query engine that is generic over document models.
//!
//! Queries are compiled once into an immutable [`Query`] and can then select from any
//! document whose nodes implement [`arbor_node::JsonNode`].
//!
//! ```
//! use arbor_jpath::Query;
//! use serde_json::json;
//!
//! let doc = json!({ "store": { "book": [
//!     { "title": "Sayings", "price": 8.95 },
//!     { "title": "Moby Dick", "price": 22.99 }
//! ] } });
//!
//! let query = Query::parse("$.store.book[?@.price < 10].title").unwrap();
//! let titles: Vec<_> = query.select(&doc).collect();
//! assert_eq!(titles, vec![&json!("Sayings")]);
//! ```

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
mod filter;
pub mod functions;
mod lexer;
mod parser;
pub mod path;

// --- Public API ---
pub use ast::{
    ComparisonOp, FilterQuery, FunctionCall, Index, Literal, LogicalOp, Operand, Predicate, Query, QueryRoot,
    Segment, SegmentKind, Selector, Slice, SliceIndices,
};
pub use config::{DEFAULT_MAX_NESTING_DEPTH, ParseConfig};
pub use engine::{LocatedSelection, Selection, select};
pub use error::JPathError;
pub use functions::{Function, FunctionType, Pattern};
pub use lexer::MAX_SAFE_INTEGER;
pub use path::{NormalizedPath, PathElement};
