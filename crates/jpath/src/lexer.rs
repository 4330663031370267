//! Token-level recognizers shared by the segment parser and the filter parser.
//!
//! Every recognizer is a plain nom parser over `&str` using [`ParseFailure`] as its
//! error type. Recognizers return `Err::Error` when the input does not start with their
//! token, and `Err::Failure` once the token is recognized but malformed (a leading zero,
//! a bad escape), so that `alt` never papers over a real syntax error.

use crate::error::ParseFailure;
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while, take_while_m_n},
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{opt, recognize},
};

pub(crate) type PResult<'a, T> = IResult<&'a str, T, ParseFailure<'a>>;

/// Largest integer magnitude accepted for indexes and slice bounds (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Optional blank space: space, horizontal tab, line feed, carriage return.
pub(crate) fn blank(input: &str) -> PResult<'_, &str> {
    multispace0(input)
}

pub(crate) fn symbol<'a>(c: char) -> impl Parser<&'a str, Output = char, Error = ParseFailure<'a>> {
    char(c)
}

pub(crate) fn keyword<'a>(
    word: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = ParseFailure<'a>> {
    tag(word)
}

fn is_name_first(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_first(c) || c.is_ascii_digit()
}

/// A member name in dot shorthand, e.g. the `store` of `$.store`.
pub(crate) fn member_name_shorthand(input: &str) -> PResult<'_, &str> {
    recognize((satisfy(is_name_first), take_while(is_name_char))).parse(input)
}

/// A function name: a lowercase letter followed by lowercase letters, digits and `_`.
pub(crate) fn function_name(input: &str) -> PResult<'_, &str> {
    recognize((
        satisfy(|c: char| c.is_ascii_lowercase()),
        take_while(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
    ))
    .parse(input)
}

/// An index or slice bound. No leading zeros, no `-0`, and within ±(2^53 - 1).
pub(crate) fn int(input: &str) -> PResult<'_, i64> {
    let (rest, text) = recognize((opt(symbol('-')), digit1)).parse(input)?;
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(ParseFailure::syntax(input, "leading zeros are not allowed in integers"));
    }
    if text == "-0" {
        return Err(ParseFailure::syntax(input, "negative zero is not a valid integer"));
    }
    let value: i64 = text
        .parse()
        .map_err(|_| ParseFailure::syntax(input, "integer out of range"))?;
    if !(-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
        return Err(ParseFailure::syntax(input, "integer out of range"));
    }
    Ok((rest, value))
}

/// A JSON number literal: `-? int frac? exp?`, where `-0` is allowed.
pub(crate) fn number(input: &str) -> PResult<'_, f64> {
    let (rest, text) = recognize((
        opt(symbol('-')),
        digit1,
        opt((symbol('.'), digit1)),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)?;

    let integral = text
        .trim_start_matches('-')
        .split(['.', 'e', 'E'])
        .next()
        .unwrap_or_default();
    if integral.len() > 1 && integral.starts_with('0') {
        return Err(ParseFailure::syntax(input, "leading zeros are not allowed in numbers"));
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok((rest, value)),
        _ => Err(ParseFailure::syntax(input, "number out of range")),
    }
}

/// A single- or double-quoted string with JSON-style escapes, returned unescaped.
pub(crate) fn string_literal(input: &str) -> PResult<'_, String> {
    let quote = match input.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(ParseFailure::mismatch(input)),
    };

    let mut out = String::new();
    let mut rest = &input[1..];
    loop {
        match rest.chars().next() {
            None => return Err(ParseFailure::syntax(input, "unterminated string literal")),
            Some(c) if c == quote => return Ok((&rest[1..], out)),
            Some('\\') => {
                let (after, unescaped) = escape_sequence(&rest[1..], quote)?;
                out.push(unescaped);
                rest = after;
            }
            Some(c) if u32::from(c) < 0x20 => {
                return Err(ParseFailure::syntax(rest, "control characters must be escaped in string literals"));
            }
            Some(c) => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
}

fn escape_sequence(input: &str, quote: char) -> PResult<'_, char> {
    let Some(c) = input.chars().next() else {
        return Err(ParseFailure::syntax(input, "unterminated escape sequence"));
    };
    let unescaped = match c {
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '/' => '/',
        '\\' => '\\',
        'u' => return unicode_escape(&input[1..]),
        c if c == quote => c,
        _ => return Err(ParseFailure::syntax(input, format!("invalid escape sequence '\\{c}'"))),
    };
    Ok((&input[c.len_utf8()..], unescaped))
}

fn hex4(input: &str) -> PResult<'_, u32> {
    let (rest, digits) = take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit())
        .parse(input)
        .map_err(|_: nom::Err<ParseFailure>| {
            ParseFailure::syntax(input, "expected four hexadecimal digits after '\\u'")
        })?;
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| ParseFailure::syntax(input, "invalid unicode escape"))?;
    Ok((rest, value))
}

fn unicode_escape(input: &str) -> PResult<'_, char> {
    let (rest, high) = hex4(input)?;
    let code = match high {
        0xD800..=0xDBFF => {
            let Some(after) = rest.strip_prefix("\\u") else {
                return Err(ParseFailure::syntax(input, "unpaired high surrogate"));
            };
            let (after, low) = hex4(after)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ParseFailure::syntax(input, "unpaired high surrogate"));
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code)
                .map(|c| (after, c))
                .ok_or_else(|| ParseFailure::syntax(input, "invalid unicode escape"));
        }
        0xDC00..=0xDFFF => return Err(ParseFailure::syntax(input, "unpaired low surrogate")),
        code => code,
    };
    char::from_u32(code)
        .map(|c| (rest, c))
        .ok_or_else(|| ParseFailure::syntax(input, "invalid unicode escape"))
}
