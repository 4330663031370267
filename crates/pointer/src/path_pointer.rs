//! Dotted/bracketed pointers in the JSONPath subset: `$.store.book[0]['first name']`.
use crate::error::PointerError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, verify},
    multi::many0,
    sequence::{delimited, preceded},
};
use std::fmt;
use std::str::FromStr;

/// One step of a [`PathPointer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Name(String),
    Index(usize),
    /// `[-]` (or `/-`): the position just past the end of an array.
    Append,
}

impl Token {
    /// Classifies a JSON Pointer token: unpadded digits are an index, `-` is the append
    /// marker, anything else is a member name.
    pub fn from_pointer_token(token: &str) -> Self {
        if token == "-" {
            return Token::Append;
        }
        match parse_array_index(token) {
            Some(index) => Token::Index(index),
            None => Token::Name(token.to_string()),
        }
    }
}

/// `0` or a digit string without a leading zero.
pub(crate) fn parse_array_index(token: &str) -> Option<usize> {
    let well_formed = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if well_formed { token.parse().ok() } else { None }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathPointer {
    tokens: Vec<Token>,
}

impl PathPointer {
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a pointer from tokens. The append marker may only be the last token.
    pub fn new(tokens: Vec<Token>) -> Result<Self, PointerError> {
        let misplaced = tokens
            .iter()
            .rev()
            .skip(1)
            .any(|token| *token == Token::Append);
        if misplaced {
            let rendered = Self { tokens }.to_string();
            return Err(PointerError::path(rendered, 0, "'[-]' may only appear at the end"));
        }
        Ok(Self { tokens })
    }

    pub fn parse(text: &str) -> Result<Self, PointerError> {
        let tokens = match path_tokens(text) {
            Ok(("", tokens)) => tokens,
            Ok((rest, _)) => {
                return Err(PointerError::path(text, text.len() - rest.len(), "unexpected input"));
            }
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                return Err(PointerError::path(text, text.len() - e.input.len(), "malformed step"));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(PointerError::path(text, text.len(), "incomplete path"));
            }
        };
        Self::new(tokens).map_err(|_| {
            let position = text.rfind("[-]").unwrap_or_default();
            PointerError::path(text, position, "'[-]' may only appear at the end")
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }
}

// --- Combinators ---

fn path_tokens(input: &str) -> IResult<&str, Vec<Token>> {
    let (input, dollar) = opt(char('$')).parse(input)?;
    let (input, first) = if dollar.is_none() {
        opt(map(bare_name, Token::Name)).parse(input)?
    } else {
        (input, None)
    };
    let (input, rest) = many0(alt((dot_step, bracket_step))).parse(input)?;
    Ok((input, first.into_iter().chain(rest).collect()))
}

fn bare_name(input: &str) -> IResult<&str, String> {
    map(take_while1(|c: char| c != '.' && c != '['), str::to_string).parse(input)
}

fn dot_step(input: &str) -> IResult<&str, Token> {
    map(preceded(char('.'), bare_name), Token::Name).parse(input)
}

fn bracket_step(input: &str) -> IResult<&str, Token> {
    delimited(
        char('['),
        alt((
            map(quoted('\''), Token::Name),
            map(quoted('"'), Token::Name),
            map(
                map_res(verify(digit1, |d: &str| d == "0" || !d.starts_with('0')), str::parse),
                Token::Index,
            ),
            map(char('-'), |_| Token::Append),
        )),
        char(']'),
    )
    .parse(input)
}

/// A quoted name. A backslash makes the next character literal.
fn quoted(quote: char) -> impl Fn(&str) -> IResult<&str, String> {
    move |input: &str| {
        let (mut rest, _) = char(quote).parse(input)?;
        let mut name = String::new();
        loop {
            let mut chars = rest.chars();
            match chars.next() {
                Some(c) if c == quote => return Ok((chars.as_str(), name)),
                Some('\\') => match chars.next() {
                    Some(escaped) => name.push(escaped),
                    None => break,
                },
                Some(c) => name.push(c),
                None => break,
            }
            rest = chars.as_str();
        }
        Err(nom::Err::Failure(nom::error::Error::new(
            rest,
            nom::error::ErrorKind::Char,
        )))
    }
}

// --- Display ---

fn is_shorthand(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || !c.is_ascii());
    first_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii())
}

impl fmt::Display for PathPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for token in &self.tokens {
            match token {
                Token::Name(name) if is_shorthand(name) => write!(f, ".{name}")?,
                Token::Name(name) => {
                    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
                    write!(f, "['{escaped}']")?;
                }
                Token::Index(index) => write!(f, "[{index}]")?,
                Token::Append => f.write_str("[-]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for PathPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
