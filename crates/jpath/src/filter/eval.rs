use crate::ast::{ComparisonOp, FilterQuery, Literal, LogicalOp, Operand, Predicate, QueryRoot};
use crate::engine::Selection;
use arbor_node::{JsonNode, Scalar};
use std::cmp::Ordering;

/// The value of a comparison operand or function result.
///
/// A node list is never a value. The only places one appears are the arguments of
/// `count()` and `value()` and the query of an existence test, and each of those drains
/// the argument's lazy [`Selection`] on the spot: `count()` into a number, `value()`
/// into the single node or `Nothing`, and an existence test into a bool.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FilterValue<'v, N> {
    /// A singular query that selected nothing, or a function with no result. Distinct
    /// from JSON `null`.
    Nothing,
    Scalar(Scalar<'v>),
    /// An array or object node, comparable only for (in)equality.
    Structure(N),
}

pub(crate) fn node_value<'a, N: JsonNode<'a>>(node: N) -> FilterValue<'a, N> {
    match node.scalar() {
        Some(scalar) => FilterValue::Scalar(scalar),
        None => FilterValue::Structure(node),
    }
}

impl Predicate {
    /// Evaluates the filter with `current` bound to `@` and `root` bound to `$`.
    pub(crate) fn test<'a, N: JsonNode<'a>>(&self, current: N, root: N) -> bool {
        match self {
            Predicate::Logical {
                left,
                op: LogicalOp::And,
                right,
            } => left.test(current, root) && right.test(current, root),
            Predicate::Logical {
                left,
                op: LogicalOp::Or,
                right,
            } => left.test(current, root) || right.test(current, root),
            Predicate::Not(inner) => !inner.test(current, root),
            Predicate::Compare { left, op, right } => {
                let left = left.evaluate(current, root);
                let right = right.evaluate(current, root);
                op.apply(&left, &right)
            }
            Predicate::Exists(query) => query.select(current, root).next().is_some(),
            Predicate::Call(call) => call.test(current, root),
        }
    }
}

impl Operand {
    pub(crate) fn evaluate<'v, 'a: 'v, N: JsonNode<'a>>(
        &'v self,
        current: N,
        root: N,
    ) -> FilterValue<'v, N> {
        match self {
            Operand::Literal(literal) => FilterValue::Scalar(literal.as_scalar()),
            Operand::Query(query) => query
                .select(current, root)
                .next()
                .map_or(FilterValue::Nothing, node_value),
            Operand::Call(call) => call.evaluate(current, root),
        }
    }
}

impl Literal {
    pub fn as_scalar(&self) -> Scalar<'_> {
        match self {
            Literal::Null => Scalar::Null,
            Literal::Bool(b) => Scalar::Bool(*b),
            Literal::Number(n) => Scalar::Number(*n),
            Literal::String(s) => Scalar::String(s),
        }
    }
}

impl FilterQuery {
    /// Runs the embedded query from `@` or `$`. Nested filters keep `root` as `$`.
    pub(crate) fn select<'q, 'a, N: JsonNode<'a>>(&'q self, current: N, root: N) -> Selection<'q, 'a, N> {
        let start = match self.root {
            QueryRoot::Current => current,
            QueryRoot::Root => root,
        };
        Selection::new(&self.query.segments, start, root)
    }
}

impl ComparisonOp {
    pub(crate) fn apply<'a, N: JsonNode<'a>>(
        self,
        left: &FilterValue<'_, N>,
        right: &FilterValue<'_, N>,
    ) -> bool {
        match self {
            ComparisonOp::Eq => equal(left, right),
            ComparisonOp::Ne => !equal(left, right),
            ComparisonOp::Lt => order(left, right) == Some(Ordering::Less),
            ComparisonOp::Le => matches!(order(left, right), Some(Ordering::Less | Ordering::Equal)),
            ComparisonOp::Gt => order(left, right) == Some(Ordering::Greater),
            ComparisonOp::Ge => {
                matches!(order(left, right), Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }
}

fn equal<'a, N: JsonNode<'a>>(left: &FilterValue<'_, N>, right: &FilterValue<'_, N>) -> bool {
    match (left, right) {
        (FilterValue::Nothing, FilterValue::Nothing) => true,
        (FilterValue::Scalar(a), FilterValue::Scalar(b)) => a == b,
        (FilterValue::Structure(a), FilterValue::Structure(b)) => a.deep_eq(b),
        _ => false,
    }
}

/// Ordering is only defined between two numbers or two strings.
fn order<N>(left: &FilterValue<'_, N>, right: &FilterValue<'_, N>) -> Option<Ordering> {
    match (left, right) {
        (FilterValue::Scalar(Scalar::Number(a)), FilterValue::Scalar(Scalar::Number(b))) => {
            a.partial_cmp(b)
        }
        (FilterValue::Scalar(Scalar::String(a)), FilterValue::Scalar(Scalar::String(b))) => {
            Some(a.cmp(b))
        }
        _ => None,
    }
}
