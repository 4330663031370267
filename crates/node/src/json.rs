//! `JsonNode` for borrowed `serde_json::Value` trees.

use crate::{JsonNode, NodeKind, Scalar};
use serde_json::Value;

impl<'a> JsonNode<'a> for &'a Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    fn get(&self, name: &str) -> Option<Self> {
        let value: &'a Value = *self;
        value.as_object()?.get(name)
    }

    fn at(&self, index: usize) -> Option<Self> {
        let value: &'a Value = *self;
        value.as_array()?.get(index)
    }

    fn len(&self) -> usize {
        match self {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    fn members(&self) -> Box<dyn Iterator<Item = (&'a str, Self)> + 'a> {
        let value: &'a Value = *self;
        match value {
            Value::Object(map) => Box::new(map.iter().map(|(name, member)| (name.as_str(), member))),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn elements(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let value: &'a Value = *self;
        match value {
            Value::Array(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn scalar(&self) -> Option<Scalar<'a>> {
        let value: &'a Value = *self;
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::String(s) => Some(Scalar::String(s.as_str())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        (*self).clone()
    }
}
