//! Recursive-descent parser and type checker for filter expressions.
//!
//! Precedence, lowest first: `||`, `&&`, `!`, comparison, then primaries (queries,
//! literals, function calls and parenthesized groups). Each operand is checked against
//! the position it appears in as soon as it is parsed, so a badly typed filter fails at
//! the offending operand rather than after the whole query has been read.

use crate::ast::{ComparisonOp, FilterQuery, FunctionCall, Literal, LogicalOp, Operand, Predicate, Query, QueryRoot};
use crate::error::ParseFailure;
use crate::functions::{Function, FunctionType, Pattern};
use crate::lexer::{PResult, blank, function_name, keyword, number, string_literal, symbol};
use crate::parser::segments;
use log::trace;
use nom::{
    Parser,
    branch::alt,
    combinator::{cut, map, opt, peek},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated},
};

// --- Combinators & Helpers ---

fn build_logical_parser<'a, F, G>(
    operand_parser: F,
    op_parser: G,
) -> impl FnMut(&'a str) -> PResult<'a, Predicate>
where
    F: Parser<&'a str, Output = Predicate, Error = ParseFailure<'a>> + Clone,
    G: Parser<&'a str, Output = LogicalOp, Error = ParseFailure<'a>> + Clone,
{
    move |input: &'a str| {
        let (input, mut left) = operand_parser.clone().parse(input)?;
        let (input, remainder) = many0(pair(
            delimited(blank, op_parser.clone(), blank),
            cut(operand_parser.clone()),
        ))
        .parse(input)?;

        for (op, right) in remainder {
            left = Predicate::Logical {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok((input, left))
    }
}

// --- Logical expressions (in order of precedence) ---

pub(crate) fn logical_expr(input: &str) -> PResult<'_, Predicate> {
    logical_or(input)
}

fn or_op(input: &str) -> PResult<'_, LogicalOp> {
    map(keyword("||"), |_| LogicalOp::Or).parse(input)
}

fn and_op(input: &str) -> PResult<'_, LogicalOp> {
    map(keyword("&&"), |_| LogicalOp::And).parse(input)
}

fn logical_or(input: &str) -> PResult<'_, Predicate> {
    build_logical_parser(logical_and, or_op)(input)
}

fn logical_and(input: &str) -> PResult<'_, Predicate> {
    build_logical_parser(basic_expr, and_op)(input)
}

fn basic_expr(input: &str) -> PResult<'_, Predicate> {
    alt((negation, paren_expr, comparison_or_test)).parse(input)
}

fn negation(input: &str) -> PResult<'_, Predicate> {
    let (rest, _) = symbol('!').parse(input)?;
    let (rest, _) = blank(rest)?;
    let (rest, inner) = cut(alt((paren_expr, test_expr))).parse(rest)?;
    Ok((rest, Predicate::Not(Box::new(inner))))
}

fn paren_expr(input: &str) -> PResult<'_, Predicate> {
    let (rest, _) = symbol('(').parse(input)?;
    let (rest, _) = blank(rest)?;
    let (rest, inner) = cut(logical_expr).parse(rest)?;
    let (rest, _) = cut((blank, symbol(')'))).parse(rest)?;
    Ok((rest, inner))
}

fn test_expr(input: &str) -> PResult<'_, Predicate> {
    let (rest, operand) = primary(input)?;
    Ok((rest, into_test(input, operand)?))
}

fn comparison_or_test(input: &str) -> PResult<'_, Predicate> {
    let (rest, left) = primary(input)?;
    let (rest, op) = opt(preceded(blank, comparison_op)).parse(rest)?;
    let Some(op) = op else {
        return Ok((rest, into_test(input, left)?));
    };

    let left = into_comparable(input, left)?;
    let (right_input, _) = blank(rest)?;
    let (rest, right) = cut(primary).parse(right_input)?;
    let right = into_comparable(right_input, right)?;
    Ok((rest, Predicate::Compare { left, op, right }))
}

fn comparison_op(input: &str) -> PResult<'_, ComparisonOp> {
    alt((
        map(keyword("=="), |_| ComparisonOp::Eq),
        map(keyword("!="), |_| ComparisonOp::Ne),
        map(keyword("<="), |_| ComparisonOp::Le),
        map(keyword(">="), |_| ComparisonOp::Ge),
        map(keyword("<"), |_| ComparisonOp::Lt),
        map(keyword(">"), |_| ComparisonOp::Gt),
    ))
    .parse(input)
}

// --- Primaries ---

fn primary(input: &str) -> PResult<'_, Operand> {
    alt((
        map(function_call, Operand::Call),
        map(literal, Operand::Literal),
        map(filter_query, Operand::Query),
    ))
    .parse(input)
}

fn literal(input: &str) -> PResult<'_, Literal> {
    alt((
        map(number, Literal::Number),
        map(string_literal, Literal::String),
        map(keyword("true"), |_| Literal::Bool(true)),
        map(keyword("false"), |_| Literal::Bool(false)),
        map(keyword("null"), |_| Literal::Null),
    ))
    .parse(input)
}

pub(crate) fn filter_query(input: &str) -> PResult<'_, FilterQuery> {
    let (rest, root) = alt((
        map(symbol('@'), |_| QueryRoot::Current),
        map(symbol('$'), |_| QueryRoot::Root),
    ))
    .parse(input)?;
    let (rest, segments) = segments(rest)?;
    Ok((
        rest,
        FilterQuery {
            root,
            query: Query { segments },
        },
    ))
}

// --- Function calls ---

fn function_call(input: &str) -> PResult<'_, FunctionCall> {
    let (rest, name) = function_name(input)?;
    let (rest, _) = symbol('(').parse(rest)?;
    let Some(function) = Function::from_name(name) else {
        return Err(ParseFailure::syntax(input, format!("unknown function '{name}'")));
    };

    let (rest, _) = blank(rest)?;
    let (rest, args) = separated_list0((blank, symbol(','), blank), positioned_argument).parse(rest)?;
    let (rest, _) = cut((blank, symbol(')'))).parse(rest)?;

    Ok((rest, check_call(input, function, args)?))
}

fn positioned_argument(input: &str) -> PResult<'_, (&str, Operand)> {
    let (rest, operand) = function_argument(input)?;
    Ok((rest, (input, operand)))
}

fn function_argument(input: &str) -> PResult<'_, Operand> {
    match terminated(primary, argument_end).parse(input) {
        Err(nom::Err::Error(_)) => {
            // Anything longer than a single primary is a logical expression, and no
            // built-in function takes one.
            let (rest, _) = logical_expr(input)?;
            if argument_end(rest).is_err() {
                return Err(ParseFailure::syntax(rest, "expected ',' or ')'"));
            }
            Err(ParseFailure::type_error(
                input,
                "a logical expression is not a valid function argument",
            ))
        }
        result => result,
    }
}

fn argument_end(input: &str) -> PResult<'_, char> {
    peek(preceded(blank, alt((symbol(','), symbol(')'))))).parse(input)
}

fn check_call<'a>(
    at: &'a str,
    function: Function,
    args: Vec<(&'a str, Operand)>,
) -> Result<FunctionCall, nom::Err<ParseFailure<'a>>> {
    let parameters = function.parameters();
    if args.len() != parameters.len() {
        return Err(ParseFailure::type_error(
            at,
            format!(
                "{function}() takes {} argument(s) but {} were given",
                parameters.len(),
                args.len()
            ),
        ));
    }
    for ((arg_at, arg), expected) in args.iter().zip(parameters) {
        check_argument(arg_at, function, arg, *expected)?;
    }

    let args: Vec<Operand> = args.into_iter().map(|(_, arg)| arg).collect();
    let pattern = match (function, args.get(1)) {
        (Function::Match | Function::Search, Some(Operand::Literal(Literal::String(source)))) => {
            Pattern::compile(source, function)
                .inspect_err(|err| trace!("{function}() pattern {source:?} does not compile: {err}"))
                .ok()
        }
        _ => None,
    };

    Ok(FunctionCall {
        function,
        args,
        pattern,
    })
}

fn check_argument<'a>(
    at: &'a str,
    function: Function,
    arg: &Operand,
    expected: FunctionType,
) -> Result<(), nom::Err<ParseFailure<'a>>> {
    let well_typed = match (expected, arg) {
        (FunctionType::Value, Operand::Literal(_)) => true,
        (FunctionType::Value, Operand::Query(query)) => query.is_singular(),
        (FunctionType::Value, Operand::Call(call)) => call.function.result() == FunctionType::Value,
        (FunctionType::Nodes, Operand::Query(_)) => true,
        (FunctionType::Nodes, Operand::Call(call)) => call.function.result() == FunctionType::Nodes,
        (FunctionType::Logical, Operand::Query(_)) => true,
        (FunctionType::Logical, Operand::Call(call)) => call.function.result() != FunctionType::Value,
        (FunctionType::Nodes | FunctionType::Logical, Operand::Literal(_)) => false,
    };
    if well_typed {
        Ok(())
    } else {
        Err(ParseFailure::type_error(
            at,
            format!("argument '{arg}' of {function}() is not of type {expected}"),
        ))
    }
}

// --- Type checks for the two operand positions ---

fn into_comparable<'a>(at: &'a str, operand: Operand) -> Result<Operand, nom::Err<ParseFailure<'a>>> {
    match &operand {
        Operand::Literal(_) => Ok(operand),
        Operand::Query(query) if query.is_singular() => Ok(operand),
        Operand::Query(query) => Err(ParseFailure::type_error(
            at,
            format!("non-singular query '{query}' cannot be compared"),
        )),
        Operand::Call(call) if call.function.result() == FunctionType::Value => Ok(operand),
        Operand::Call(call) => Err(ParseFailure::type_error(
            at,
            format!("the result of {}() cannot be compared", call.function),
        )),
    }
}

fn into_test<'a>(at: &'a str, operand: Operand) -> Result<Predicate, nom::Err<ParseFailure<'a>>> {
    match operand {
        Operand::Query(query) => Ok(Predicate::Exists(query)),
        Operand::Call(call) if call.function.result() != FunctionType::Value => Ok(Predicate::Call(call)),
        Operand::Call(call) => Err(ParseFailure::type_error(
            at,
            format!("the result of {}() must be compared", call.function),
        )),
        Operand::Literal(literal) => Err(ParseFailure::type_error(
            at,
            format!("literal {literal} must be compared"),
        )),
    }
}
