//! A `nom`-based parser for the segment and selector grammar.
use crate::ast::{Index, Query, Segment, Selector, Slice};
use crate::config::ParseConfig;
use crate::error::{JPathError, ParseFailure, Reason};
use crate::filter::parser::logical_expr;
use crate::lexer::{PResult, blank, int, keyword, member_name_shorthand, string_literal, symbol};
use log::debug;
use nom::{
    Parser,
    branch::alt,
    combinator::{cut, map, opt},
    multi::many0,
    sequence::{preceded, terminated},
};
use std::str::FromStr;

// --- Main Public Parser ---

impl Query {
    /// Compiles `text` with the default [`ParseConfig`].
    pub fn parse(text: &str) -> Result<Self, JPathError> {
        Self::parse_with(text, &ParseConfig::default())
    }

    /// Compiles `text`. The whole text must be a query: no leading or trailing blanks.
    pub fn parse_with(text: &str, config: &ParseConfig) -> Result<Self, JPathError> {
        check_nesting(text, config.max_nesting_depth)?;

        let query = match json_path_query(text) {
            Ok(("", query)) => query,
            Ok((rest, _)) => {
                let failure = ParseFailure {
                    input: rest,
                    reason: Reason::Unexpected,
                };
                return Err(failure.into_error(text));
            }
            Err(nom::Err::Error(failure) | nom::Err::Failure(failure)) => {
                return Err(failure.into_error(text));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(JPathError::syntax(text, text.len(), "incomplete query"));
            }
        };

        debug!("Compiled query '{}' as {}", text, query);
        Ok(query)
    }
}

impl FromStr for Query {
    type Err = JPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Rejects queries whose bracket or parenthesis nesting exceeds `limit`. Quoted text is
/// skipped so brackets inside names do not count.
fn check_nesting(text: &str, limit: usize) -> Result<(), JPathError> {
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '[' | '(' => {
                depth += 1;
                if depth > limit {
                    return Err(JPathError::NestingTooDeep {
                        query: text.to_string(),
                        limit,
                    });
                }
            }
            ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

// --- Combinators ---

fn json_path_query(input: &str) -> PResult<'_, Query> {
    let (rest, _) = symbol('$')
        .parse(input)
        .map_err(|_: nom::Err<ParseFailure>| ParseFailure::syntax(input, "a query must start with '$'"))?;
    let (rest, segments) = segments(rest)?;
    Ok((rest, Query { segments }))
}

/// Zero or more segments, each optionally preceded by blank space.
pub(crate) fn segments(input: &str) -> PResult<'_, Vec<Segment>> {
    many0(preceded(blank, segment)).parse(input)
}

fn segment(input: &str) -> PResult<'_, Segment> {
    alt((
        map(descendant_segment, Segment::descendant),
        map(child_segment, Segment::child),
    ))
    .parse(input)
}

fn descendant_segment(input: &str) -> PResult<'_, Vec<Selector>> {
    let (rest, _) = keyword("..").parse(input)?;
    match alt((bracketed_selection, shorthand_selection)).parse(rest) {
        Err(nom::Err::Error(_)) => Err(ParseFailure::syntax(
            rest,
            "'..' must be followed by a member name, '*' or a bracketed selection",
        )),
        result => result,
    }
}

fn child_segment(input: &str) -> PResult<'_, Vec<Selector>> {
    alt((bracketed_selection, dot_member)).parse(input)
}

fn dot_member(input: &str) -> PResult<'_, Vec<Selector>> {
    let (rest, _) = symbol('.').parse(input)?;
    match shorthand_selection(rest) {
        Err(nom::Err::Error(_)) => Err(ParseFailure::syntax(rest, "'.' must be followed by a member name or '*'")),
        result => result,
    }
}

/// `*` or a member name, as written after `.` or `..`.
fn shorthand_selection(input: &str) -> PResult<'_, Vec<Selector>> {
    alt((
        map(symbol('*'), |_| vec![Selector::Wildcard]),
        map(member_name_shorthand, |name| vec![Selector::Name(name.to_string())]),
    ))
    .parse(input)
}

fn bracketed_selection(input: &str) -> PResult<'_, Vec<Selector>> {
    let (rest, _) = symbol('[').parse(input)?;
    let (rest, _) = blank(rest)?;
    let (rest, first) = match selector(rest) {
        Err(nom::Err::Error(_)) => return Err(ParseFailure::syntax(rest, "expected a selector")),
        result => result?,
    };
    let (rest, others) = many0(preceded((blank, symbol(','), blank), cut(selector))).parse(rest)?;
    let (rest, _) = blank(rest)?;
    let (rest, _) = symbol(']')
        .parse(rest)
        .map_err(|_: nom::Err<ParseFailure>| ParseFailure::syntax(rest, "expected ',' or ']'"))?;

    let mut selectors = Vec::with_capacity(others.len() + 1);
    selectors.push(first);
    selectors.extend(others);
    Ok((rest, selectors))
}

// --- Selectors ---

fn selector(input: &str) -> PResult<'_, Selector> {
    alt((
        map(string_literal, Selector::Name),
        map(symbol('*'), |_| Selector::Wildcard),
        slice_or_index,
        filter_selector,
    ))
    .parse(input)
}

fn filter_selector(input: &str) -> PResult<'_, Selector> {
    let (rest, _) = symbol('?').parse(input)?;
    let (rest, _) = blank(rest)?;
    let (rest, predicate) = cut(logical_expr).parse(rest)?;
    Ok((rest, Selector::Filter(Box::new(predicate))))
}

/// `int` is an index; `[start] : [end] [: [step]]` is a slice. Blank space is allowed
/// around every part of a slice.
fn slice_or_index(input: &str) -> PResult<'_, Selector> {
    let (after_start, start) = opt(int).parse(input)?;
    let (after_blank, _) = blank(after_start)?;
    let Ok((rest, _)) = symbol(':').parse(after_blank) else {
        return match start {
            Some(index) => Ok((after_start, Selector::Index(Index(index)))),
            None => Err(ParseFailure::mismatch(input)),
        };
    };

    let (rest, _) = blank(rest)?;
    let (rest, end) = opt(terminated(int, blank)).parse(rest)?;
    let (rest, step) = opt(preceded(symbol(':'), opt(preceded(blank, int)))).parse(rest)?;
    Ok((
        rest,
        Selector::Slice(Slice {
            start,
            end,
            step: step.flatten(),
        }),
    ))
}
