//! Top level of the sql parsing engine. The grammar is split per statement
//! family with shared token parsers in common.
mod common;
mod explain;
mod expression;
mod query;
mod show;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::multispace0;
use nom::combinator::{all_consuming, opt};
use nom::error::{convert_error, ContextError, ParseError, VerboseError};
use nom::sequence::{terminated, tuple};
use nom::Finish;
use nom::IResult;
use thiserror::Error;

use super::objects::{Expr, Query, Select, SelectItem, Statement, Values};
use explain::{parse_describe, parse_explain};
use query::parse_query;
use show::parse_show;

/// How the parser interprets a fractional numeric literal like `1.5`.
/// Scientific notation is always a double.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecimalLiteral {
    AsDouble,
    AsDecimal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsingOptions {
    pub decimal_literal: DecimalLiteral,
}

impl Default for ParsingOptions {
    fn default() -> Self {
        ParsingOptions {
            decimal_literal: DecimalLiteral::AsDouble,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SqlParser;

impl SqlParser {
    pub fn parse(
        &self,
        input: &str,
        options: &ParsingOptions,
    ) -> Result<Statement, SqlParserError> {
        match SqlParser::nom_parse::<VerboseError<&str>>(input, options).finish() {
            Ok((_, mut statement)) => {
                number_parameters(&mut statement);
                Ok(statement)
            }
            Err(e) => Err(SqlParserError::ParseError(convert_error(input, e))),
        }
    }

    fn nom_parse<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
        input: &'a str,
        options: &ParsingOptions,
    ) -> IResult<&'a str, Statement, E> {
        all_consuming(terminated(
            |i| parse_statement(i, options),
            tuple((multispace0, opt(tag(";")), multispace0)),
        ))(input)
    }
}

fn parse_statement<'a, E: ParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    options: &ParsingOptions,
) -> IResult<&'a str, Statement, E> {
    alt((
        |i| parse_explain(i, options),
        parse_describe,
        parse_show,
        |i| parse_query(i, options),
    ))(input)
}

// Parameter markers all come out of the grammar as position zero, the real
// 1-based positions are assigned here in source order so that reparsing
// formatted SQL reproduces them exactly.
fn number_parameters(statement: &mut Statement) {
    let mut next = 1;
    number_statement(statement, &mut next);
}

fn number_statement(statement: &mut Statement, next: &mut usize) {
    match statement {
        Statement::Query(query) => number_query(query, next),
        Statement::Explain { statement } => number_statement(statement, next),
        Statement::DescribeInput { .. }
        | Statement::DescribeOutput { .. }
        | Statement::ShowTables { .. }
        | Statement::ShowSchemas
        | Statement::ShowStats { .. } => {}
    }
}

fn number_query(query: &mut Query, next: &mut usize) {
    match query {
        Query::Select(Select {
            items,
            where_clause,
            ..
        }) => {
            for item in items {
                if let SelectItem::Expression { expr, .. } = item {
                    number_expr(expr, next);
                }
            }
            if let Some(predicate) = where_clause {
                number_expr(predicate, next);
            }
        }
        Query::Values(Values { rows }) => {
            for row in rows {
                for expr in row {
                    number_expr(expr, next);
                }
            }
        }
    }
}

fn number_expr(expr: &mut Expr, next: &mut usize) {
    match expr {
        Expr::Parameter(position) => {
            *position = *next;
            *next += 1;
        }
        Expr::BinaryOp { left, right, .. } => {
            number_expr(left, next);
            number_expr(right, next);
        }
        _ => {}
    }
}

#[derive(Debug, Error)]
pub enum SqlParserError {
    #[error("SQL Parse Error {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use crate::engine::objects::{BinaryOperator, Ident, QualifiedName};

    use super::*;

    #[test]
    fn test_parse_statement_families() -> Result<(), Box<dyn std::error::Error>> {
        let parser = SqlParser;
        let options = ParsingOptions::default();

        assert!(matches!(
            parser.parse("SELECT 1", &options)?,
            Statement::Query(_)
        ));
        assert!(matches!(
            parser.parse("EXPLAIN SELECT 1", &options)?,
            Statement::Explain { .. }
        ));
        assert!(matches!(
            parser.parse("SHOW TABLES;", &options)?,
            Statement::ShowTables { .. }
        ));
        assert!(matches!(
            parser.parse("DESCRIBE OUTPUT q", &options)?,
            Statement::DescribeOutput { .. }
        ));

        Ok(())
    }

    #[test]
    fn test_trailing_garbage_is_an_error() {
        let parser = SqlParser;
        let options = ParsingOptions::default();

        assert!(parser.parse("SELECT 1 EXTRA", &options).is_err());
        assert!(parser.parse("SELECT 1; SELECT 2", &options).is_err());
    }

    #[test]
    fn test_parse_error_is_readable() {
        let parser = SqlParser;
        let options = ParsingOptions::default();

        let err = parser
            .parse("completely wrong", &options)
            .expect_err("should not parse");
        let message = err.to_string();
        assert!(message.contains("SQL Parse Error"), "got: {}", message);
    }

    #[test]
    fn test_parameters_numbered_in_source_order() -> Result<(), Box<dyn std::error::Error>> {
        let parser = SqlParser;
        let options = ParsingOptions::default();

        let statement =
            parser.parse("SELECT ? FROM t WHERE a = ? AND b = ?", &options)?;
        let select = match statement {
            Statement::Query(Query::Select(s)) => s,
            _ => panic!("Wrong type"),
        };

        assert_eq!(
            select.items,
            vec![SelectItem::Expression {
                expr: Expr::Parameter(1),
                alias: None,
            }]
        );

        // a = ?2 AND b = ?3
        let expected_where = Expr::BinaryOp {
            left: Box::new(Expr::BinaryOp {
                left: Box::new(Expr::Identifier(Ident::new("a"))),
                op: BinaryOperator::Eq,
                right: Box::new(Expr::Parameter(2)),
            }),
            op: BinaryOperator::And,
            right: Box::new(Expr::BinaryOp {
                left: Box::new(Expr::Identifier(Ident::new("b"))),
                op: BinaryOperator::Eq,
                right: Box::new(Expr::Parameter(3)),
            }),
        };
        assert_eq!(select.where_clause, Some(expected_where));
        assert_eq!(select.from, Some(QualifiedName::of(&["t"])));

        Ok(())
    }
}
