//! Defines the core abstraction for a navigable, read-only JSON document tree.
//!
//! The query engine is written exclusively against [`JsonNode`], so it can select
//! from any document model that implements it. Two models ship with this crate:
//!
//! - `&serde_json::Value`, the mutable owned tree most callers already have.
//! - [`ArenaDocument`], an immutable flat arena addressed by [`NodeId`].
//!
//! ```
//! use arbor_node::{ArenaDocument, JsonNode, NodeKind};
//! use serde_json::json;
//!
//! let value = json!({ "a": [1, 2, 3] });
//! let arena = ArenaDocument::from_value(&value);
//!
//! assert_eq!((&value).get("a").map(|n| n.len()), Some(3));
//! assert_eq!(arena.root().get("a").map(|n| n.kind()), Some(NodeKind::Array));
//! ```

pub mod arena;
pub mod error;
mod json;

pub use arena::{ArenaDocument, ArenaNode, NodeId};
pub use error::NodeError;

use serde_json::Value;
use std::fmt;

/// The JSON type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Bool => "boolean",
            NodeKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// A borrowed view of a primitive JSON value.
///
/// Numbers are exposed as `f64` so that `1`, `1.0` and `1e0` compare equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Number(f64),
    String(&'a str),
}

/// The contract for a node in a read-only JSON document.
///
/// Implementors are cheap `Copy` handles. A handle may carry a reference to the
/// document that owns it (see [`ArenaNode`]); the engine never stores handles
/// beyond a single selection.
///
/// `'a` is the lifetime of the underlying document.
pub trait JsonNode<'a>: fmt::Debug + Copy + 'a {
    /// The JSON type of this node.
    fn kind(&self) -> NodeKind;

    /// Looks up an object member by name. Returns `None` for missing members and
    /// for non-object nodes.
    fn get(&self, name: &str) -> Option<Self>;

    /// Returns the array element at `index`, or `None` when out of bounds or when
    /// the node is not an array.
    fn at(&self, index: usize) -> Option<Self>;

    /// The number of elements of an array or members of an object; 0 for scalars.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Object members in document order. Empty for non-object nodes.
    fn members(&self) -> Box<dyn Iterator<Item = (&'a str, Self)> + 'a>;

    /// Array elements in index order. Empty for non-array nodes.
    fn elements(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// The primitive value of this node, or `None` for arrays and objects.
    fn scalar(&self) -> Option<Scalar<'a>>;

    /// Element values of an array or member values of an object, in order.
    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        match self.kind() {
            NodeKind::Object => Box::new(self.members().map(|(_, value)| value)),
            NodeKind::Array => self.elements(),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Structural equality: arrays element-wise in order, objects by member set
    /// regardless of order, numbers by value.
    fn deep_eq(&self, other: &Self) -> bool {
        deep_equal(*self, *other)
    }

    /// Converts the subtree rooted at this node into an owned `serde_json::Value`.
    fn to_value(&self) -> Value {
        to_value(*self)
    }
}

/// Generic structural comparison used by [`JsonNode::deep_eq`].
pub fn deep_equal<'a, N: JsonNode<'a>>(a: N, b: N) -> bool {
    match (a.kind(), b.kind()) {
        (NodeKind::Object, NodeKind::Object) => {
            a.len() == b.len()
                && a
                    .members()
                    .all(|(name, left)| b.get(name).is_some_and(|right| deep_equal(left, right)))
        }
        (NodeKind::Array, NodeKind::Array) => {
            a.len() == b.len()
                && a
                    .elements()
                    .zip(b.elements())
                    .all(|(left, right)| deep_equal(left, right))
        }
        _ => match (a.scalar(), b.scalar()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        },
    }
}

/// Generic conversion of a node into an owned JSON value.
///
/// Integral numbers within the `i64` range come back as integers. Models that keep
/// the original number representation override [`JsonNode::to_value`].
pub fn to_value<'a, N: JsonNode<'a>>(node: N) -> Value {
    match node.kind() {
        NodeKind::Object => Value::Object(
            node.members()
                .map(|(name, value)| (name.to_string(), to_value(value)))
                .collect(),
        ),
        NodeKind::Array => Value::Array(node.elements().map(to_value).collect()),
        _ => match node.scalar() {
            Some(Scalar::Bool(b)) => Value::Bool(b),
            Some(Scalar::Number(n)) => number_to_value(n),
            Some(Scalar::String(s)) => Value::String(s.to_string()),
            Some(Scalar::Null) | None => Value::Null,
        },
    }
}

fn number_to_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
