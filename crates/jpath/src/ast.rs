//! The compiled form of a query.
//!
//! A [`Query`] is an immutable value that holds no document references, so one compiled
//! query can be evaluated any number of times, from any number of threads. Every node
//! renders back to canonical query text through `Display`; parsing that text yields an
//! equal value.

use crate::functions::{Function, Pattern};
use std::fmt::{self, Write};

/// A parsed query: the root identifier `$` followed by a sequence of segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub segments: Vec<Segment>,
}

impl Query {
    /// True if the query can match at most one node: every segment is a child segment
    /// with exactly one name or index selector.
    pub fn is_singular(&self) -> bool {
        self.segments.iter().all(Segment::is_singular)
    }

    /// True if the query is a normalized path: singular, with no negative index.
    pub fn is_normalized(&self) -> bool {
        self.segments.iter().all(|segment| {
            segment.is_singular()
                && segment.selectors.iter().all(|selector| match selector {
                    Selector::Index(index) => !index.from_end(),
                    _ => true,
                })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// `[...]`, `.name`, `.*`: applies to the children of each input node.
    Child,
    /// `..[...]`, `..name`, `..*`: applies to each input node and all of its descendants.
    Descendant,
}

/// One step of a query: an ordered, non-empty list of selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub selectors: Vec<Selector>,
}

impl Segment {
    pub fn child(selectors: Vec<Selector>) -> Self {
        Self {
            kind: SegmentKind::Child,
            selectors,
        }
    }

    pub fn descendant(selectors: Vec<Selector>) -> Self {
        Self {
            kind: SegmentKind::Descendant,
            selectors,
        }
    }

    pub fn is_singular(&self) -> bool {
        self.kind == SegmentKind::Child
            && matches!(self.selectors.as_slice(), [selector] if selector.is_normalized())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    Name(String),
    Index(Index),
    Wildcard,
    Slice(Slice),
    Filter(Box<Predicate>),
}

impl Selector {
    /// True for the selectors that address exactly one location: names and indexes.
    pub fn is_normalized(&self) -> bool {
        matches!(self, Selector::Name(_) | Selector::Index(_))
    }
}

/// An array index. Negative values count back from the end of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Index(pub i64);

impl Index {
    pub fn from_end(self) -> bool {
        self.0 < 0
    }

    /// Resolves the index against an array of `len` elements.
    pub fn resolve(self, len: usize) -> Option<usize> {
        let len = i64::try_from(len).ok()?;
        let position = if self.0 < 0 { len + self.0 } else { self.0 };
        (0..len).contains(&position).then_some(position as usize)
    }
}

/// An array slice `start:end:step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    /// The array positions selected from an array of `len` elements, in selection order.
    ///
    /// Bounds are clamped to the array, negative bounds count from the end, and a
    /// negative step walks backwards. A zero step selects nothing.
    pub fn indices(&self, len: usize) -> SliceIndices {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let step = self.step.unwrap_or(1);
        let normalize = |bound: i64| if bound >= 0 { bound } else { len + bound };

        if step > 0 {
            let lower = normalize(self.start.unwrap_or(0)).clamp(0, len);
            let upper = normalize(self.end.unwrap_or(len)).clamp(0, len);
            SliceIndices {
                next: lower,
                bound: upper,
                step,
            }
        } else if step < 0 {
            let upper = self.start.map_or(len - 1, normalize).clamp(-1, len - 1);
            let lower = self.end.map_or(-1, normalize).clamp(-1, len - 1);
            SliceIndices {
                next: upper,
                bound: lower,
                step,
            }
        } else {
            SliceIndices {
                next: 0,
                bound: 0,
                step: 1,
            }
        }
    }
}

/// Iterator over the positions selected by a [`Slice`].
#[derive(Debug, Clone)]
pub struct SliceIndices {
    next: i64,
    bound: i64,
    step: i64,
}

impl Iterator for SliceIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let in_range = if self.step > 0 {
            self.next < self.bound
        } else {
            self.next > self.bound
        };
        if !in_range {
            return None;
        }
        let current = self.next;
        self.next = self.next.saturating_add(self.step);
        usize::try_from(current).ok()
    }
}

/// A compiled filter expression, the body of a `?` selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Logical {
        left: Box<Predicate>,
        op: LogicalOp,
        right: Box<Predicate>,
    },
    Not(Box<Predicate>),
    Compare {
        left: Operand,
        op: ComparisonOp,
        right: Operand,
    },
    /// A bare query: true when it selects at least one node.
    Exists(FilterQuery),
    /// A function returning a logical result, such as `match()`.
    Call(FunctionCall),
}

impl Predicate {
    fn precedence(&self) -> u8 {
        match self {
            Predicate::Logical {
                op: LogicalOp::Or, ..
            } => 1,
            Predicate::Logical {
                op: LogicalOp::And, ..
            } => 2,
            Predicate::Compare { .. } => 3,
            Predicate::Not(_) | Predicate::Exists(_) | Predicate::Call(_) => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// One side of a comparison, or a function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Literal),
    Query(FilterQuery),
    Call(FunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoot {
    /// `@`, the node under test.
    Current,
    /// `$`, the document root.
    Root,
}

/// A query embedded in a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub root: QueryRoot,
    pub query: Query,
}

impl FilterQuery {
    pub fn is_singular(&self) -> bool {
        self.query.is_singular()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub function: Function,
    pub args: Vec<Operand>,
    /// The regular expression of a `match()`/`search()` call, compiled while parsing
    /// when the pattern argument is a string literal.
    pub pattern: Option<Pattern>,
}

// --- Display ---

/// Writes `value` as a single-quoted string literal, escaping only what must be escaped.
pub(crate) fn write_quoted(f: &mut impl Write, value: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in value.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if u32::from(c) < 0x20 => write!(f, "\\u{:04x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('$')?;
        self.segments.iter().try_for_each(|segment| write!(f, "{segment}"))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == SegmentKind::Descendant {
            f.write_str("..")?;
        }
        f.write_char('[')?;
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        f.write_char(']')
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => write_quoted(f, name),
            Selector::Index(index) => write!(f, "{}", index.0),
            Selector::Wildcard => f.write_char('*'),
            Selector::Slice(slice) => write!(f, "{slice}"),
            Selector::Filter(predicate) => write!(f, "?{predicate}"),
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_char(':')?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Logical { left, op, right } => {
                let own = self.precedence();
                if left.precedence() < own {
                    write!(f, "({left})")?;
                } else {
                    write!(f, "{left}")?;
                }
                write!(f, " {op} ")?;
                // Both operators are left-associative.
                if right.precedence() <= own {
                    write!(f, "({right})")
                } else {
                    write!(f, "{right}")
                }
            }
            Predicate::Not(inner) => match inner.as_ref() {
                Predicate::Exists(_) | Predicate::Call(_) => write!(f, "!{inner}"),
                _ => write!(f, "!({inner})"),
            },
            Predicate::Compare { left, op, right } => write!(f, "{left} {op} {right}"),
            Predicate::Exists(query) => write!(f, "{query}"),
            Predicate::Call(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        })
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        })
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(literal) => write!(f, "{literal}"),
            Operand::Query(query) => write!(f, "{query}"),
            Operand::Call(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::String(s) => write_quoted(f, s),
        }
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self.root {
            QueryRoot::Current => '@',
            QueryRoot::Root => '$',
        })?;
        self.query.segments.iter().try_for_each(|segment| write!(f, "{segment}"))
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_char(')')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(slice: Slice, len: usize) -> Vec<usize> {
        slice.indices(len).collect()
    }

    #[test]
    fn test_slice_defaults_and_negative_step() {
        let all = Slice::default();
        assert_eq!(positions(all, 4), vec![0, 1, 2, 3]);

        let reversed = Slice {
            step: Some(-1),
            ..Slice::default()
        };
        assert_eq!(positions(reversed, 4), vec![3, 2, 1, 0]);

        let stepped = Slice {
            start: Some(1),
            end: Some(6),
            step: Some(2),
        };
        assert_eq!(positions(stepped, 10), vec![1, 3, 5]);
    }

    #[test]
    fn test_slice_clamps_and_zero_step() {
        let wide = Slice {
            start: Some(-100),
            end: Some(100),
            step: None,
        };
        assert_eq!(positions(wide, 3), vec![0, 1, 2]);

        let zero = Slice {
            start: Some(1),
            end: Some(2),
            step: Some(0),
        };
        assert!(positions(zero, 3).is_empty());

        let backwards = Slice {
            start: Some(5),
            end: Some(-100),
            step: Some(-2),
        };
        assert_eq!(positions(backwards, 4), vec![3, 1]);
        assert!(positions(Slice::default(), 0).is_empty());
    }

    #[test]
    fn test_index_resolution() {
        assert_eq!(Index(0).resolve(3), Some(0));
        assert_eq!(Index(-1).resolve(3), Some(2));
        assert_eq!(Index(-4).resolve(3), None);
        assert_eq!(Index(3).resolve(3), None);
        assert!(Index(-1).from_end());
    }

    #[test]
    fn test_quoted_names_escape() {
        let mut out = String::new();
        write_quoted(&mut out, "it's\\\n\u{1}").unwrap();
        assert_eq!(out, r"'it\'s\\\n\u0001'");
    }

    #[test]
    fn test_display_parenthesizes_by_precedence() {
        let exists = |name: &str| {
            Predicate::Exists(FilterQuery {
                root: QueryRoot::Current,
                query: Query {
                    segments: vec![Segment::child(vec![Selector::Name(name.to_string())])],
                },
            })
        };
        let or = Predicate::Logical {
            left: Box::new(exists("a")),
            op: LogicalOp::Or,
            right: Box::new(exists("b")),
        };
        let and = Predicate::Logical {
            left: Box::new(or),
            op: LogicalOp::And,
            right: Box::new(Predicate::Not(Box::new(exists("c")))),
        };
        assert_eq!(and.to_string(), "(@['a'] || @['b']) && !@['c']");
    }
}
