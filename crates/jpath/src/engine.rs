//! The traversal engine: applies a compiled segment list to a document.
//!
//! Traversal is depth-first and lazy. A work stack holds `(node, segment index)` pairs;
//! popping a pair whose index is past the last segment yields that node as a result,
//! otherwise the segment's selectors are applied and their output pushed back in
//! reverse so that results come out in selector order. Descendant segments also push
//! each child with the same segment index, which visits the subtree in pre-order.

use crate::ast::{Query, Segment, SegmentKind, Selector};
use crate::path::{NormalizedPath, PathElement};
use arbor_node::{JsonNode, NodeKind};
use log::trace;
use std::marker::PhantomData;
use std::rc::Rc;

/// Records how a node was reached. The plain selection carries `()`, which costs nothing.
pub(crate) trait Trail: Clone {
    fn member(&self, name: &str) -> Self;
    fn element(&self, index: usize) -> Self;
}

impl Trail for () {
    fn member(&self, _name: &str) -> Self {}
    fn element(&self, _index: usize) -> Self {}
}

/// A persistent list of path elements, shared between siblings.
#[derive(Clone, Default)]
pub(crate) struct PathTrail(Option<Rc<Link>>);

struct Link {
    parent: PathTrail,
    element: PathElement,
}

impl PathTrail {
    fn push(&self, element: PathElement) -> Self {
        PathTrail(Some(Rc::new(Link {
            parent: self.clone(),
            element,
        })))
    }

    fn to_path(&self) -> NormalizedPath {
        let mut elements = Vec::new();
        let mut cursor = &self.0;
        while let Some(link) = cursor {
            elements.push(link.element.clone());
            cursor = &link.parent.0;
        }
        elements.reverse();
        NormalizedPath::new(elements)
    }
}

impl Trail for PathTrail {
    fn member(&self, name: &str) -> Self {
        self.push(PathElement::Name(name.to_string()))
    }

    fn element(&self, index: usize) -> Self {
        self.push(PathElement::Index(index))
    }
}

struct Walker<'q, 'a, N, T> {
    segments: &'q [Segment],
    root: N,
    stack: Vec<(N, usize, T)>,
    _document: PhantomData<&'a ()>,
}

impl<'q, 'a, N: JsonNode<'a>, T: Trail> Walker<'q, 'a, N, T> {
    fn new(segments: &'q [Segment], start: N, root: N, trail: T) -> Self {
        Self {
            segments,
            root,
            stack: vec![(start, 0, trail)],
            _document: PhantomData,
        }
    }

    fn next_match(&mut self) -> Option<(N, T)> {
        while let Some((node, depth, trail)) = self.stack.pop() {
            match self.segments.get(depth) {
                None => return Some((node, trail)),
                Some(segment) => self.expand(segment, node, depth, trail),
            }
        }
        None
    }

    fn expand(&mut self, segment: &'q Segment, node: N, depth: usize, trail: T) {
        let mark = self.stack.len();

        let mut selected = Vec::new();
        for selector in &segment.selectors {
            self.apply(selector, node, &trail, &mut selected);
        }
        let matches = selected.len();
        self.stack
            .extend(selected.into_iter().map(|(child, trail)| (child, depth + 1, trail)));

        if segment.kind == SegmentKind::Descendant {
            match node.kind() {
                NodeKind::Object => self.stack.extend(
                    node.members()
                        .map(|(name, child)| (child, depth, trail.member(name))),
                ),
                NodeKind::Array => self.stack.extend(
                    node.elements()
                        .enumerate()
                        .map(|(i, child)| (child, depth, trail.element(i))),
                ),
                _ => {}
            }
        }

        trace!(
            "Segment {} on {} node: {} selected, {} queued",
            depth,
            node.kind(),
            matches,
            self.stack.len() - mark
        );
        self.stack[mark..].reverse();
    }

    fn apply(&self, selector: &'q Selector, node: N, trail: &T, out: &mut Vec<(N, T)>) {
        match selector {
            Selector::Name(name) => {
                if let Some(child) = node.get(name) {
                    out.push((child, trail.member(name)));
                }
            }
            Selector::Index(index) => {
                if node.kind() == NodeKind::Array
                    && let Some(i) = index.resolve(node.len())
                    && let Some(child) = node.at(i)
                {
                    out.push((child, trail.element(i)));
                }
            }
            Selector::Wildcard => match node.kind() {
                NodeKind::Object => {
                    out.extend(node.members().map(|(name, child)| (child, trail.member(name))));
                }
                NodeKind::Array => {
                    out.extend(node.elements().enumerate().map(|(i, child)| (child, trail.element(i))));
                }
                _ => {}
            },
            Selector::Slice(slice) => {
                if node.kind() == NodeKind::Array {
                    out.extend(
                        slice
                            .indices(node.len())
                            .filter_map(|i| node.at(i).map(|child| (child, trail.element(i)))),
                    );
                }
            }
            Selector::Filter(predicate) => match node.kind() {
                NodeKind::Object => out.extend(
                    node.members()
                        .filter(|(_, child)| predicate.test(*child, self.root))
                        .map(|(name, child)| (child, trail.member(name))),
                ),
                NodeKind::Array => out.extend(
                    node.elements()
                        .enumerate()
                        .filter(|(_, child)| predicate.test(*child, self.root))
                        .map(|(i, child)| (child, trail.element(i))),
                ),
                _ => {}
            },
        }
    }
}

/// The nodes selected by a query, in result order. Produced by [`Query::select`].
///
/// The sequence is computed lazily, one forward pass per call to `select`. Nodes are
/// not de-duplicated: overlapping selectors yield the same node more than once.
pub struct Selection<'q, 'a, N: JsonNode<'a>> {
    walker: Walker<'q, 'a, N, ()>,
}

impl<'q, 'a, N: JsonNode<'a>> Selection<'q, 'a, N> {
    pub(crate) fn new(segments: &'q [Segment], start: N, root: N) -> Self {
        Self {
            walker: Walker::new(segments, start, root, ()),
        }
    }
}

impl<'q, 'a, N: JsonNode<'a>> Iterator for Selection<'q, 'a, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.walker.next_match().map(|(node, ())| node)
    }
}

/// Like [`Selection`], but each node comes with the normalized path that locates it.
pub struct LocatedSelection<'q, 'a, N: JsonNode<'a>> {
    walker: Walker<'q, 'a, N, PathTrail>,
}

impl<'q, 'a, N: JsonNode<'a>> Iterator for LocatedSelection<'q, 'a, N> {
    type Item = (NormalizedPath, N);

    fn next(&mut self) -> Option<Self::Item> {
        self.walker
            .next_match()
            .map(|(node, trail)| (trail.to_path(), node))
    }
}

impl Query {
    /// Selects nodes from the document whose root node is `root`.
    pub fn select<'q, 'a, N: JsonNode<'a>>(&'q self, root: N) -> Selection<'q, 'a, N> {
        Selection::new(&self.segments, root, root)
    }

    /// Selects nodes together with their normalized paths.
    pub fn select_located<'q, 'a, N: JsonNode<'a>>(&'q self, root: N) -> LocatedSelection<'q, 'a, N> {
        LocatedSelection {
            walker: Walker::new(&self.segments, root, root, PathTrail::default()),
        }
    }
}

/// Selects nodes from `root` with a compiled query. Same as [`Query::select`].
pub fn select<'q, 'a, N: JsonNode<'a>>(query: &'q Query, root: N) -> Selection<'q, 'a, N> {
    query.select(root)
}
