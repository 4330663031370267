use thiserror::Error;

/// Errors raised while compiling a query. Evaluating a compiled query never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JPathError {
    #[error("Syntax error in '{query}' at position {position}: {message}")]
    Syntax {
        query: String,
        position: usize,
        message: String,
    },

    #[error("Type error in '{query}' at position {position}: {message}")]
    Type {
        query: String,
        position: usize,
        message: String,
    },

    #[error("Query '{query}' exceeds the maximum nesting depth of {limit}")]
    NestingTooDeep { query: String, limit: usize },
}

impl JPathError {
    pub fn syntax(query: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            query: query.into(),
            position,
            message: message.into(),
        }
    }

    pub fn type_error(query: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self::Type {
            query: query.into(),
            position,
            message: message.into(),
        }
    }

    /// True for grammar violations, including queries rejected for nesting depth.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::NestingTooDeep { .. })
    }

    /// True for well-formed queries whose filter expressions are badly typed.
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    /// Byte offset into the query text where the problem was found.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } | Self::Type { position, .. } => Some(*position),
            Self::NestingTooDeep { .. } => None,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            Self::Syntax { query, .. } | Self::Type { query, .. } | Self::NestingTooDeep { query, .. } => query,
        }
    }
}

/// The error type threaded through the nom parsers. It keeps the remaining input so the
/// final error can report a byte offset into the query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParseFailure<'a> {
    pub(crate) input: &'a str,
    pub(crate) reason: Reason,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reason {
    Unexpected,
    Syntax(String),
    Type(String),
}

impl<'a> ParseFailure<'a> {
    /// A non-recoverable grammar error at `input`.
    pub(crate) fn syntax(input: &'a str, message: impl Into<String>) -> nom::Err<Self> {
        nom::Err::Failure(Self {
            input,
            reason: Reason::Syntax(message.into()),
        })
    }

    /// A non-recoverable well-typedness error at `input`.
    pub(crate) fn type_error(input: &'a str, message: impl Into<String>) -> nom::Err<Self> {
        nom::Err::Failure(Self {
            input,
            reason: Reason::Type(message.into()),
        })
    }

    /// A recoverable mismatch, letting `alt` try the next branch.
    pub(crate) fn mismatch(input: &'a str) -> nom::Err<Self> {
        nom::Err::Error(Self {
            input,
            reason: Reason::Unexpected,
        })
    }

    pub(crate) fn into_error(self, query: &str) -> JPathError {
        let position = query.len().saturating_sub(self.input.len());
        match self.reason {
            Reason::Unexpected => JPathError::syntax(query, position, describe_unexpected(self.input)),
            Reason::Syntax(message) => JPathError::syntax(query, position, message),
            Reason::Type(message) => JPathError::type_error(query, position, message),
        }
    }
}

fn describe_unexpected(rest: &str) -> String {
    match rest.chars().next() {
        Some(c) => format!("unexpected character '{}'", c.escape_debug()),
        None => "unexpected end of query".to_string(),
    }
}

impl<'a> nom::error::ParseError<&'a str> for ParseFailure<'a> {
    fn from_error_kind(input: &'a str, _kind: nom::error::ErrorKind) -> Self {
        Self {
            input,
            reason: Reason::Unexpected,
        }
    }

    fn append(_input: &'a str, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        // Keep whichever branch got further into the query.
        if other.input.len() <= self.input.len() { other } else { self }
    }
}
