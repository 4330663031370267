/// The nesting limit used by [`ParseConfig::default`].
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Options that bound how a query is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// The deepest bracket and parenthesis nesting a query may use, counting `[`, `(` and
    /// the brackets of nested filter queries together.
    ///
    /// The parser is recursive-descent, so this is what keeps a hostile query such as
    /// `$[?(((((...` from exhausting the stack. Queries nested deeper than this fail with
    /// [`JPathError::NestingTooDeep`](crate::JPathError::NestingTooDeep) before any
    /// grammar rule runs. The default leaves room for an unoptimized build parsing on a
    /// 2 MiB thread stack; raise it only for callers that run on larger stacks.
    ///
    /// Defaults to [`DEFAULT_MAX_NESTING_DEPTH`].
    pub max_nesting_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
