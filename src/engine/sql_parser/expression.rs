//! Precedence climbing expression parser: OR < AND < comparison < additive
//! < multiplicative < primary. All binary operators associate left.
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, one_of};
use nom::combinator::{consumed, map, opt};
use nom::error::{ContextError, ErrorKind, ParseError};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

use crate::engine::objects::{BinaryOperator, Expr};

use super::common::{keyword, maybe_take_whitespace, parse_identifier, parse_sql_string, symbol};
use super::{DecimalLiteral, ParsingOptions};

pub(super) fn parse_expression<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    parse_or(input, options)
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

fn fold_binary(first: Expr, rest: Vec<(BinaryOperator, Expr)>) -> Expr {
    rest.into_iter()
        .fold(first, |left, (op, right)| binary(left, op, right))
}

fn parse_or<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    let (input, first) = parse_and(input, options)?;
    let (input, rest) = many0(map(
        preceded(keyword("or"), |i| parse_and(i, options)),
        |right| (BinaryOperator::Or, right),
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn parse_and<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    let (input, first) = parse_comparison(input, options)?;
    let (input, rest) = many0(map(
        preceded(keyword("and"), |i| parse_comparison(i, options)),
        |right| (BinaryOperator::And, right),
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn parse_comparison<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    let (input, first) = parse_additive(input, options)?;
    let (input, rest) = many0(pair(
        preceded(maybe_take_whitespace, parse_comparison_operator),
        |i| parse_additive(i, options),
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn parse_comparison_operator<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, BinaryOperator, E> {
    //Two character operators have to match ahead of their one character prefixes
    alt((
        map(tag("<>"), |_| BinaryOperator::NotEq),
        map(tag("!="), |_| BinaryOperator::NotEq),
        map(tag("<="), |_| BinaryOperator::LtEq),
        map(tag(">="), |_| BinaryOperator::GtEq),
        map(tag("="), |_| BinaryOperator::Eq),
        map(tag("<"), |_| BinaryOperator::Lt),
        map(tag(">"), |_| BinaryOperator::Gt),
    ))(input)
}

fn parse_additive<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    let (input, first) = parse_multiplicative(input, options)?;
    let (input, rest) = many0(pair(
        preceded(
            maybe_take_whitespace,
            alt((
                map(tag("+"), |_| BinaryOperator::Plus),
                map(tag("-"), |_| BinaryOperator::Minus),
            )),
        ),
        |i| parse_multiplicative(i, options),
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn parse_multiplicative<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    let (input, first) = parse_primary(input, options)?;
    let (input, rest) = many0(pair(
        preceded(
            maybe_take_whitespace,
            alt((
                map(tag("*"), |_| BinaryOperator::Multiply),
                map(tag("/"), |_| BinaryOperator::Divide),
            )),
        ),
        |i| parse_primary(i, options),
    ))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn parse_primary<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    preceded(
        maybe_take_whitespace,
        alt((
            map(keyword("null"), |_| Expr::NullLiteral),
            map(keyword("true"), |_| Expr::BooleanLiteral(true)),
            map(keyword("false"), |_| Expr::BooleanLiteral(false)),
            |i| parse_number(i, options),
            map(parse_sql_string, Expr::StringLiteral),
            //Positions are assigned by the driver once the whole tree exists
            map(tag("?"), |_| Expr::Parameter(0)),
            delimited(symbol("("), |i| parse_expression(i, options), symbol(")")),
            map(parse_identifier, Expr::Identifier),
        )),
    )(input)
}

fn parse_number<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Expr, E> {
    let (rest, (text, (_, fraction, exponent))) = consumed(tuple((
        digit1,
        opt(preceded(tag("."), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)?;

    let number = if exponent.is_some() {
        //Scientific notation is always a double, no matter the options
        Expr::DoubleLiteral(parse_finite_double(text, input)?)
    } else if fraction.is_some() {
        match options.decimal_literal {
            DecimalLiteral::AsDouble => Expr::DoubleLiteral(parse_finite_double(text, input)?),
            DecimalLiteral::AsDecimal => Expr::DecimalLiteral(text.to_string()),
        }
    } else {
        let value = text
            .parse::<i64>()
            .map_err(|_| nom::Err::Failure(E::from_error_kind(input, ErrorKind::Digit)))?;
        Expr::IntegerLiteral(value)
    };

    Ok((rest, number))
}

// An exponent like 1e999 overflows to infinity, which has no literal form
// the formatter could emit, so it is rejected like integer overflow.
fn parse_finite_double<'a, E: ParseError<&'a str>>(
    text: &str,
    input: &'a str,
) -> Result<f64, nom::Err<E>> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(nom::Err::Failure(E::from_error_kind(
            input,
            ErrorKind::Float,
        ))),
    }
}
