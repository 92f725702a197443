//! Round-trip verification for the formatter/parser pair: format a tree,
//! reparse the text, and prove the result is structurally identical to what
//! we started with. On a mismatch the trees are linearized and diffed so the
//! failure names the first diverging node instead of dumping two full trees.
use thiserror::Error;

use super::formatter::format_statement;
use super::linearizer::linearize;
use super::objects::Statement;
use super::sql_parser::{ParsingOptions, SqlParser, SqlParserError};
use super::tree_diff::{assert_sequences_equal, TreeDiffError};

pub fn assert_formatted_sql(
    parser: &SqlParser,
    options: &ParsingOptions,
    expected: &Statement,
) -> Result<(), VerifierError> {
    let formatted = format_statement(expected);

    // verify round-trip of formatting already-formatted SQL
    let actual = parse_formatted(parser, options, &formatted, expected)?;
    let reformatted = format_statement(&actual);
    if reformatted != formatted {
        return Err(VerifierError::NotIdempotent {
            expected: formatted,
            actual: reformatted,
        });
    }

    // compare parsed tree with parsed tree of formatted SQL
    if actual != *expected {
        // simplify finding the non-equal part of the tree
        assert_sequences_equal(&linearize(&actual), &linearize(expected))?;
    }
    if actual != *expected {
        return Err(VerifierError::NotEqual {
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        });
    }
    Ok(())
}

fn parse_formatted(
    parser: &SqlParser,
    options: &ParsingOptions,
    sql: &str,
    tree: &Statement,
) -> Result<Statement, VerifierError> {
    parser
        .parse(sql, options)
        .map_err(|e| VerifierError::ParseFailure {
            sql: sql.to_string(),
            source: e,
            tree: format!("{:?}", tree),
        })
}

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("failed to parse formatted SQL: {sql}\nerror: {source}\ntree: {tree}")]
    ParseFailure {
        sql: String,
        #[source]
        source: SqlParserError,
        tree: String,
    },
    #[error("formatting is not idempotent, expected [{expected}] but found [{actual}]")]
    NotIdempotent { expected: String, actual: String },
    #[error(transparent)]
    TreeDiff(#[from] TreeDiffError),
    #[error("expected [{expected}] but found [{actual}]")]
    NotEqual { expected: String, actual: String },
}

#[cfg(test)]
mod tests {
    use crate::engine::objects::{Expr, Query, Select, SelectItem};

    use super::*;

    fn parse(sql: &str) -> Statement {
        SqlParser
            .parse(sql, &ParsingOptions::default())
            .expect("should parse")
    }

    #[test]
    fn test_select_one_round_trips() -> Result<(), Box<dyn std::error::Error>> {
        let statement = parse("SELECT 1");
        assert_eq!(format_statement(&statement), "SELECT 1");
        assert_formatted_sql(&SqlParser, &ParsingOptions::default(), &statement)?;
        Ok(())
    }

    #[test]
    fn test_hand_built_tree_round_trips() -> Result<(), Box<dyn std::error::Error>> {
        let statement = Statement::Query(Query::Select(Select {
            items: vec![SelectItem::Expression {
                expr: Expr::StringLiteral("it's".to_string()),
                alias: Some(crate::engine::objects::Ident::new("Query Plan")),
            }],
            from: None,
            where_clause: None,
            limit: None,
        }));
        assert_formatted_sql(&SqlParser, &ParsingOptions::default(), &statement)?;
        Ok(())
    }

    #[test]
    fn test_unparsable_formatter_output_is_a_parse_failure() {
        // A decimal literal is formatted verbatim, so a nonsense payload
        // stands in for a formatter defect producing unparsable text
        let statement = Statement::Query(Query::Select(Select {
            items: vec![SelectItem::Expression {
                expr: Expr::DecimalLiteral("@@@".to_string()),
                alias: None,
            }],
            from: None,
            where_clause: None,
            limit: None,
        }));

        let err = assert_formatted_sql(&SqlParser, &ParsingOptions::default(), &statement)
            .expect_err("should fail");
        match err {
            VerifierError::ParseFailure { sql, .. } => assert_eq!(sql, "SELECT @@@"),
            other => panic!("Wrong error: {:?}", other),
        }
    }

    #[test]
    fn test_structural_mismatch_names_first_index() {
        // 'abc' as a decimal literal formats to bare abc, which reparses as
        // an identifier: same shape, different node, caught by the diff
        let statement = Statement::Query(Query::Select(Select {
            items: vec![SelectItem::Expression {
                expr: Expr::DecimalLiteral("abc".to_string()),
                alias: None,
            }],
            from: None,
            where_clause: None,
            limit: None,
        }));

        let err = assert_formatted_sql(&SqlParser, &ParsingOptions::default(), &statement)
            .expect_err("should fail");
        match err {
            VerifierError::TreeDiff(TreeDiffError::NotEqualAt { index, .. }) => {
                assert_eq!(index, 0)
            }
            other => panic!("Wrong error: {:?}", other),
        }
    }
}
