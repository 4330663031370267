//! The filter sub-language of `?` selectors.
//!
//! Filters are parsed and type-checked together: a query that compiles is well-typed, so
//! evaluation never has to report an error. It only ever answers true or false.

pub(crate) mod eval;
pub(crate) mod parser;
