use nom::bytes::complete::{escaped_transform, tag, tag_no_case, take_while1};
use nom::character::complete::{multispace0, none_of};
use nom::combinator::{map_parser, not, recognize, verify};
use nom::error::{ContextError, ParseError};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, preceded, terminated};
use nom::IResult;

use crate::engine::objects::{is_reserved, Ident, QualifiedName};

pub(super) fn maybe_take_whitespace<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    multispace0(input)
}
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Matches a keyword without consuming a longer identifier it prefixes,
/// eating any leading whitespace.
pub(super) fn keyword<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    kw: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str, E> {
    preceded(
        maybe_take_whitespace,
        terminated(tag_no_case(kw), not(take_while1(is_ident_char))),
    )
}

pub(super) fn symbol<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    s: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str, E> {
    preceded(maybe_take_whitespace, tag(s))
}

pub(super) fn parse_identifier<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Ident, E> {
    let (input, _) = maybe_take_whitespace(input)?;
    if input.starts_with('"') {
        let (input, value) = parse_quoted_identifier(input)?;
        Ok((input, Ident { value }))
    } else {
        let (input, value) = parse_bare_identifier(input)?;
        Ok((input, Ident::new(value)))
    }
}

fn parse_bare_identifier<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    verify(recognize(take_while1(is_ident_char)), |s: &str| {
        !s.starts_with(|c: char| c.is_ascii_digit()) && !is_reserved(s)
    })(input)
}

fn parse_quoted_identifier<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, String, E> {
    //Same shape as the quoted string parser below, with " doubled instead of '
    let seq = recognize(separated_list1(tag("\"\""), many0(none_of("\""))));
    let unquote = escaped_transform(none_of("\""), '"', tag("\""));
    delimited(tag("\""), map_parser(seq, unquote), tag("\""))(input)
}

// Single quoted SQL string with '' as the escape for a literal quote
//Code from here: https://stackoverflow.com/a/58520871
pub(super) fn parse_sql_string<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, String, E> {
    let seq = recognize(separated_list1(tag("''"), many0(none_of("'"))));
    let unquote = escaped_transform(none_of("'"), '\'', tag("'"));
    let (input, value) = preceded(
        maybe_take_whitespace,
        delimited(tag("'"), map_parser(seq, unquote), tag("'")),
    )(input)?;
    Ok((input, value))
}

pub(super) fn parse_qualified_name<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, QualifiedName, E> {
    let (input, parts) = separated_list1(tag("."), parse_identifier)(input)?;
    Ok((input, QualifiedName { parts }))
}
