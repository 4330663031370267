use crate::ast::{Index, Query, Segment, Selector, write_quoted};
use std::fmt::{self, Write};

/// One step of a [`NormalizedPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    Name(String),
    Index(usize),
}

/// The location of a node within a document, such as `$['store']['book'][0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedPath {
    elements: Vec<PathElement>,
}

impl NormalizedPath {
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True for the path of the root node, `$`.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    /// The path of the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NormalizedPath> {
        let (_, parent) = self.elements.split_last()?;
        Some(Self::new(parent.to_vec()))
    }

    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }
}

impl FromIterator<PathElement> for NormalizedPath {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'p> IntoIterator for &'p NormalizedPath {
    type Item = &'p PathElement;
    type IntoIter = std::slice::Iter<'p, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('$')?;
        for element in &self.elements {
            f.write_char('[')?;
            match element {
                PathElement::Name(name) => write_quoted(f, name)?,
                PathElement::Index(index) => write!(f, "{index}")?,
            }
            f.write_char(']')?;
        }
        Ok(())
    }
}

impl From<&NormalizedPath> for Query {
    fn from(path: &NormalizedPath) -> Self {
        let segments = path
            .elements
            .iter()
            .map(|element| {
                let selector = match element {
                    PathElement::Name(name) => Selector::Name(name.clone()),
                    PathElement::Index(index) => Selector::Index(Index(*index as i64)),
                };
                Segment::child(vec![selector])
            })
            .collect();
        Query { segments }
    }
}
