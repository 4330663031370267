//! RFC 6901 JSON Pointers, in plain (`/a/b`) and URI fragment (`#/a/b`) form.

use crate::error::PointerError;
use std::fmt;
use std::str::FromStr;

/// A parsed JSON Pointer. Tokens are stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// The empty pointer, which refers to the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Parses a pointer. Text starting with `#` is read as a URI fragment and
    /// percent-decoded first.
    pub fn parse(text: &str) -> Result<Self, PointerError> {
        match text.strip_prefix('#') {
            Some(fragment) => {
                let decoded = urlencoding::decode(fragment)
                    .map_err(|e| PointerError::pointer(text, format!("invalid percent-encoding: {e}")))?;
                Self::parse_plain(text, &decoded)
            }
            None => Self::parse_plain(text, text),
        }
    }

    fn parse_plain(original: &str, text: &str) -> Result<Self, PointerError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let Some(body) = text.strip_prefix('/') else {
            return Err(PointerError::pointer(original, "a non-empty pointer must start with '/'"));
        };
        let tokens = body
            .split('/')
            .map(|token| {
                unescape(token).ok_or_else(|| {
                    PointerError::pointer(original, format!("invalid escape in token '{token}'"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// The pointer to the parent location, or `None` for the root.
    pub fn parent(&self) -> Option<JsonPointer> {
        let (_, parent) = self.tokens.split_last()?;
        Some(Self::new(parent.to_vec()))
    }

    /// Renders the URI fragment form, e.g. `#/a%20b/0`.
    pub fn to_fragment(&self) -> String {
        let mut out = String::from("#");
        for token in &self.tokens {
            out.push('/');
            out.push_str(&urlencoding::encode(&escape(token)));
        }
        out
    }
}

fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape(token: &str) -> Option<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", escape(token))?;
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
