//! The built-in filter functions: their signatures, used while type-checking a filter,
//! and their implementations, used while evaluating one.

use crate::ast::{FunctionCall, Operand};
use crate::filter::eval::{FilterValue, node_value};
use arbor_node::{JsonNode, Scalar};
use log::trace;
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Length,
    Count,
    Match,
    Search,
    Value,
}

/// The declared type of a function parameter or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionType {
    /// A single JSON value, or Nothing.
    Value,
    /// A true/false result.
    Logical,
    /// A list of nodes, as produced by a query.
    Nodes,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FunctionType::Value => "ValueType",
            FunctionType::Logical => "LogicalType",
            FunctionType::Nodes => "NodesType",
        })
    }
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "length" => Some(Function::Length),
            "count" => Some(Function::Count),
            "match" => Some(Function::Match),
            "search" => Some(Function::Search),
            "value" => Some(Function::Value),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Length => "length",
            Function::Count => "count",
            Function::Match => "match",
            Function::Search => "search",
            Function::Value => "value",
        }
    }

    pub fn parameters(self) -> &'static [FunctionType] {
        match self {
            Function::Length => &[FunctionType::Value],
            Function::Count | Function::Value => &[FunctionType::Nodes],
            Function::Match | Function::Search => &[FunctionType::Value, FunctionType::Value],
        }
    }

    pub fn result(self) -> FunctionType {
        match self {
            Function::Length | Function::Count | Function::Value => FunctionType::Value,
            Function::Match | Function::Search => FunctionType::Logical,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled `match()` or `search()` pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles an I-Regexp pattern for `function`. `match()` patterns are anchored at
    /// both ends of the subject.
    pub fn compile(source: &str, function: Function) -> Result<Self, regex::Error> {
        let translated = translate(source);
        let anchored = match function {
            Function::Match => format!(r"\A(?:{translated})\z"),
            _ => translated,
        };
        Regex::new(&anchored).map(|regex| Self { regex })
    }

    pub fn is_match(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Rewrites I-Regexp syntax into the `regex` crate's dialect. The only difference that
/// matters is `.`: it matches any character except `\n` and `\r`, so U+2028 and U+2029
/// are matched too. Inside a character class `.` is literal and left alone.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut in_class = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push('[');
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            '.' if !in_class => out.push_str(r"[^\n\r]"),
            c => out.push(c),
        }
    }
    out
}

impl FunctionCall {
    /// Evaluates a call whose result type is `ValueType`.
    pub(crate) fn evaluate<'v, 'a: 'v, N: JsonNode<'a>>(
        &'v self,
        current: N,
        root: N,
    ) -> FilterValue<'v, N> {
        match (self.function, self.args.as_slice()) {
            (Function::Length, [arg]) => length(arg.evaluate(current, root)),
            (Function::Count, [Operand::Query(query)]) => {
                FilterValue::Scalar(Scalar::Number(query.select(current, root).count() as f64))
            }
            (Function::Value, [Operand::Query(query)]) => {
                let mut nodes = query.select(current, root);
                match (nodes.next(), nodes.next()) {
                    (Some(node), None) => node_value(node),
                    _ => FilterValue::Nothing,
                }
            }
            _ => FilterValue::Nothing,
        }
    }

    /// Evaluates a call whose result type is `LogicalType`.
    pub(crate) fn test<'a, N: JsonNode<'a>>(&self, current: N, root: N) -> bool {
        let [subject, pattern] = self.args.as_slice() else {
            return false;
        };
        if !matches!(self.function, Function::Match | Function::Search) {
            return false;
        }
        let FilterValue::Scalar(Scalar::String(subject)) = subject.evaluate(current, root) else {
            return false;
        };

        if let Some(compiled) = &self.pattern {
            return compiled.is_match(subject);
        }
        // A literal pattern that failed to compile while parsing stays invalid.
        if let Operand::Literal(_) = pattern {
            return false;
        }
        let FilterValue::Scalar(Scalar::String(source)) = pattern.evaluate(current, root) else {
            return false;
        };
        match Pattern::compile(source, self.function) {
            Ok(compiled) => compiled.is_match(subject),
            Err(err) => {
                trace!("{}() pattern {:?} does not compile: {}", self.function, source, err);
                false
            }
        }
    }
}

fn length<'v, 'a, N: JsonNode<'a>>(value: FilterValue<'v, N>) -> FilterValue<'v, N> {
    match value {
        FilterValue::Scalar(Scalar::String(s)) => {
            FilterValue::Scalar(Scalar::Number(s.chars().count() as f64))
        }
        FilterValue::Structure(node) => FilterValue::Scalar(Scalar::Number(node.len() as f64)),
        _ => FilterValue::Nothing,
    }
}
