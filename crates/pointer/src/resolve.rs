//! Single-location lookup with a handle on the parent, for patch-style callers that need
//! to add or replace the last component.

use crate::error::PointerError;
use crate::json_pointer::JsonPointer;
use crate::path_pointer::{PathPointer, Token, parse_array_index};
use arbor_jpath::{NormalizedPath, Query, Selector};
use arbor_node::{JsonNode, NodeKind};
use log::trace;

/// The outcome of resolving a pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<N> {
    /// The node the pointer refers to, if it exists.
    pub value: Option<N>,
    /// The object or array that holds, or would hold, the target. Present whenever every
    /// component except the last resolves to a container; `None` for the root pointer.
    pub parent: Option<N>,
}

impl<N> Resolved<N> {
    pub fn found(&self) -> bool {
        self.value.is_some()
    }

    fn missing() -> Self {
        Self {
            value: None,
            parent: None,
        }
    }
}

/// Resolves a dotted/bracketed pointer against `root`.
pub fn resolve<'a, N: JsonNode<'a>>(root: N, pointer: &PathPointer) -> Resolved<N> {
    walk(root, pointer.tokens(), |node, token| match token {
        Token::Name(name) => node.get(name),
        Token::Index(index) => node.at(*index),
        Token::Append => None,
    })
}

/// Resolves an RFC 6901 pointer. On arrays a token must be an unpadded index; `-`
/// never resolves to a value but still reports the array as parent.
pub fn resolve_pointer<'a, N: JsonNode<'a>>(root: N, pointer: &JsonPointer) -> Resolved<N> {
    walk(root, pointer.tokens(), |node, token| match node.kind() {
        NodeKind::Object => node.get(token),
        NodeKind::Array => parse_array_index(token).and_then(|index| node.at(index)),
        _ => None,
    })
}

/// Resolves a compiled query that is a normalized path, such as `$['a'][0]`.
pub fn resolve_query<'a, N: JsonNode<'a>>(root: N, query: &Query) -> Result<Resolved<N>, PointerError> {
    let pointer = PathPointer::try_from(query)?;
    Ok(resolve(root, &pointer))
}

/// Resolves a path produced by [`Query::select_located`].
pub fn resolve_path<'a, N: JsonNode<'a>>(root: N, path: &NormalizedPath) -> Resolved<N> {
    resolve(root, &PathPointer::from(path))
}

fn walk<'a, N, T, F>(root: N, tokens: &[T], step: F) -> Resolved<N>
where
    N: JsonNode<'a>,
    T: std::fmt::Debug,
    F: Fn(N, &T) -> Option<N>,
{
    let Some((last, init)) = tokens.split_last() else {
        return Resolved {
            value: Some(root),
            parent: None,
        };
    };

    let mut current = root;
    for (depth, token) in init.iter().enumerate() {
        match step(current, token) {
            Some(next) => current = next,
            None => {
                trace!("Pointer lookup stopped at step {} ({:?})", depth, token);
                return Resolved::missing();
            }
        }
    }
    if !current.kind().is_container() {
        trace!("Pointer lookup reached a {} before its last step ({:?})", current.kind(), last);
        return Resolved::missing();
    }
    Resolved {
        value: step(current, last),
        parent: Some(current),
    }
}

impl TryFrom<&Query> for PathPointer {
    type Error = PointerError;

    fn try_from(query: &Query) -> Result<Self, Self::Error> {
        if !query.is_normalized() {
            return Err(PointerError::NotNormalized(query.to_string()));
        }
        let tokens = query
            .segments
            .iter()
            .flat_map(|segment| &segment.selectors)
            .map(|selector| match selector {
                Selector::Name(name) => Ok(Token::Name(name.clone())),
                Selector::Index(index) => usize::try_from(index.0)
                    .map(Token::Index)
                    .map_err(|_| PointerError::NotNormalized(query.to_string())),
                _ => Err(PointerError::NotNormalized(query.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        PathPointer::new(tokens)
    }
}
