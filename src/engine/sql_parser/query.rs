use nom::branch::alt;
use nom::character::complete::digit1;
use nom::combinator::{cut, map, opt};
use nom::error::{ContextError, ErrorKind, ParseError};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use crate::engine::objects::{Expr, Query, Select, SelectItem, Statement, Values};

use super::common::{
    keyword, maybe_take_whitespace, parse_identifier, parse_qualified_name, symbol,
};
use super::expression::parse_expression;
use super::ParsingOptions;

pub(super) fn parse_query<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Statement, E> {
    alt((|i| parse_select(i, options), |i| parse_values(i, options)))(input)
}

fn parse_select<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("select")(input)?;
    let (input, items) = cut(separated_list1(symbol(","), |i| {
        parse_select_item(i, options)
    }))(input)?;
    let (input, from) = opt(preceded(keyword("from"), parse_qualified_name))(input)?;
    let (input, where_clause) = opt(preceded(keyword("where"), |i| parse_expression(i, options)))(input)?;
    let (input, limit) = opt(preceded(keyword("limit"), parse_limit_count))(input)?;

    Ok((
        input,
        Statement::Query(Query::Select(Select {
            items,
            from,
            where_clause,
            limit,
        })),
    ))
}

fn parse_select_item<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, SelectItem, E> {
    alt((
        map(symbol("*"), |_| SelectItem::AllColumns),
        map(
            pair(
                |i| parse_expression(i, options),
                //Aliases require AS, a bare alias would be ambiguous with FROM
                opt(preceded(keyword("as"), parse_identifier)),
            ),
            |(expr, alias)| SelectItem::Expression { expr, alias },
        ),
    ))(input)
}

fn parse_limit_count<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, u64, E> {
    let (input, _) = maybe_take_whitespace(input)?;
    let (rest, digits) = digit1(input)?;
    let count = digits
        .parse::<u64>()
        .map_err(|_| nom::Err::Failure(E::from_error_kind(input, ErrorKind::Digit)))?;
    Ok((rest, count))
}

fn parse_values<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Statement, E> {
    let (input, _) = keyword("values")(input)?;
    let (input, rows) = cut(separated_list1(symbol(","), |i| parse_values_row(i, options)))(input)?;

    Ok((input, Statement::Query(Query::Values(Values { rows }))))
}

fn parse_values_row<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Vec<Expr>, E> {
    delimited(
        symbol("("),
        separated_list1(symbol(","), |i| parse_expression(i, options)),
        symbol(")"),
    )(input)
}
