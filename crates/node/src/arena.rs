//! An immutable, arena-backed JSON document.
//!
//! Every value lives in one flat `Vec` and refers to its children by [`NodeId`].
//! Handles ([`ArenaNode`]) are two words wide and `Copy`, which keeps traversal
//! cheap and lets many threads query the same document without coordination.

use crate::error::NodeError;
use crate::{JsonNode, NodeKind, Scalar};
use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Index of a value inside an [`ArenaDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<NodeId>),
    Object(IndexMap<String, NodeId>),
}

/// A frozen JSON document stored in a flat arena.
#[derive(Debug, Clone)]
pub struct ArenaDocument {
    slots: Vec<Slot>,
    root: NodeId,
}

impl ArenaDocument {
    /// Copies a `serde_json::Value` into a new arena. Member order is preserved.
    pub fn from_value(value: &Value) -> Self {
        let mut slots = Vec::new();
        let root = insert(&mut slots, value);
        Self { slots, root }
    }

    pub fn root(&self) -> ArenaNode<'_> {
        ArenaNode {
            doc: self,
            id: self.root,
        }
    }

    /// Returns the handle for `id`, if it belongs to this document.
    pub fn node(&self, id: NodeId) -> Option<ArenaNode<'_>> {
        (id.index() < self.slots.len()).then_some(ArenaNode { doc: self, id })
    }

    /// Total number of values stored, containers included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.index()]
    }
}

impl FromStr for ArenaDocument {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::from_value(&value))
    }
}

impl From<&Value> for ArenaDocument {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

// Children are stored before their parent, so the root ends up last.
fn insert(slots: &mut Vec<Slot>, value: &Value) -> NodeId {
    let slot = match value {
        Value::Null => Slot::Null,
        Value::Bool(b) => Slot::Bool(*b),
        Value::Number(n) => Slot::Number(n.clone()),
        Value::String(s) => Slot::String(s.clone()),
        Value::Array(items) => Slot::Array(items.iter().map(|item| insert(slots, item)).collect()),
        Value::Object(map) => Slot::Object(
            map.iter()
                .map(|(name, member)| (name.clone(), insert(slots, member)))
                .collect(),
        ),
    };
    let id = NodeId(slots.len() as u32);
    slots.push(slot);
    id
}

/// A handle to one value of an [`ArenaDocument`].
#[derive(Clone, Copy)]
pub struct ArenaNode<'a> {
    doc: &'a ArenaDocument,
    id: NodeId,
}

impl<'a> ArenaNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn slot(&self) -> &'a Slot {
        self.doc.slot(self.id)
    }

    fn with_id(&self, id: NodeId) -> Self {
        ArenaNode { doc: self.doc, id }
    }
}

impl PartialEq for ArenaNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for ArenaNode<'_> {}

impl Hash for ArenaNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.doc, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for ArenaNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaNode")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .finish()
    }
}

impl<'a> JsonNode<'a> for ArenaNode<'a> {
    fn kind(&self) -> NodeKind {
        match self.slot() {
            Slot::Null => NodeKind::Null,
            Slot::Bool(_) => NodeKind::Bool,
            Slot::Number(_) => NodeKind::Number,
            Slot::String(_) => NodeKind::String,
            Slot::Array(_) => NodeKind::Array,
            Slot::Object(_) => NodeKind::Object,
        }
    }

    fn get(&self, name: &str) -> Option<Self> {
        match self.slot() {
            Slot::Object(map) => map.get(name).map(|id| self.with_id(*id)),
            _ => None,
        }
    }

    fn at(&self, index: usize) -> Option<Self> {
        match self.slot() {
            Slot::Array(items) => items.get(index).map(|id| self.with_id(*id)),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        match self.slot() {
            Slot::Array(items) => items.len(),
            Slot::Object(map) => map.len(),
            _ => 0,
        }
    }

    fn members(&self) -> Box<dyn Iterator<Item = (&'a str, Self)> + 'a> {
        let doc = self.doc;
        match self.slot() {
            Slot::Object(map) => Box::new(
                map.iter()
                    .map(move |(name, id)| (name.as_str(), ArenaNode { doc, id: *id })),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn elements(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let doc = self.doc;
        match self.slot() {
            Slot::Array(items) => Box::new(items.iter().map(move |id| ArenaNode { doc, id: *id })),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn scalar(&self) -> Option<Scalar<'a>> {
        match self.slot() {
            Slot::Null => Some(Scalar::Null),
            Slot::Bool(b) => Some(Scalar::Bool(*b)),
            Slot::Number(n) => n.as_f64().map(Scalar::Number),
            Slot::String(s) => Some(Scalar::String(s.as_str())),
            Slot::Array(_) | Slot::Object(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self.slot() {
            Slot::Null => Value::Null,
            Slot::Bool(b) => Value::Bool(*b),
            Slot::Number(n) => Value::Number(n.clone()),
            Slot::String(s) => Value::String(s.clone()),
            Slot::Array(_) => Value::Array(self.elements().map(|e| e.to_value()).collect()),
            Slot::Object(_) => Value::Object(
                self.members()
                    .map(|(name, member)| (name.to_string(), member.to_value()))
                    .collect(),
            ),
        }
    }
}
