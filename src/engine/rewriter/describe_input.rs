//! Rewrites DESCRIBE INPUT into a VALUES listing of the referenced prepared
//! statement's parameter positions and their bound types.
use crate::engine::linearizer::{linearize, NodeRef};
use crate::engine::objects::{Expr, Statement};

use super::{empty_result, values_statement, Rewrite, RewriteEnv, RewriterError};

pub struct DescribeInputRewrite;

impl Rewrite for DescribeInputRewrite {
    fn name(&self) -> &'static str {
        "describe_input"
    }

    fn rewrite(
        &self,
        env: &RewriteEnv,
        statement: Statement,
    ) -> Result<Option<Statement>, RewriterError> {
        let name = match statement {
            Statement::DescribeInput { name } => name,
            other => return Ok(Some(other)),
        };

        let sql = env
            .session
            .get_prepared_statement(&name.value)
            .ok_or_else(|| RewriterError::UnknownPreparedStatement(name.value.clone()))?;
        let prepared = env
            .parser
            .parse(sql, env.parsing_options)
            .map_err(|e| RewriterError::PreparedStatementParse {
                name: name.value.clone(),
                source: e,
            })?;

        let mut positions: Vec<usize> = linearize(&prepared)
            .iter()
            .filter_map(|node| match node {
                NodeRef::Expr(Expr::Parameter(position)) => Some(*position),
                _ => None,
            })
            .collect();
        positions.sort_unstable();

        if positions.is_empty() {
            return Ok(Some(empty_result("position")));
        }

        let rows = positions
            .into_iter()
            .map(|position| {
                let bound_type = parameter_type(env.parameter_lookup.get(&position));
                vec![
                    Expr::IntegerLiteral(position as i64),
                    Expr::StringLiteral(bound_type.to_string()),
                ]
            })
            .collect();
        Ok(Some(values_statement(rows)))
    }
}

// Best effort type naming from the bound expression; unbound parameters are
// unknown until execution time.
fn parameter_type(binding: Option<&Expr>) -> &'static str {
    match binding {
        Some(Expr::StringLiteral(_)) => "varchar",
        Some(Expr::IntegerLiteral(_)) => "integer",
        Some(Expr::DoubleLiteral(_)) => "double",
        Some(Expr::DecimalLiteral(_)) => "decimal",
        Some(Expr::BooleanLiteral(_)) => "boolean",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::objects::{Ident, Query, Values};
    use crate::engine::test_objects::TestEnv;

    use super::*;

    fn describe_input(name: &str) -> Statement {
        Statement::DescribeInput {
            name: Ident::new(name),
        }
    }

    #[test]
    fn test_lists_parameters_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let mut fixture = TestEnv::new();
        fixture.session.add_prepared_statement(
            "q1".to_string(),
            "SELECT * FROM orders WHERE id = ? AND name = ?".to_string(),
        );
        fixture
            .parameter_lookup
            .insert(1, Expr::IntegerLiteral(42));

        let result = DescribeInputRewrite
            .rewrite(&fixture.env(), describe_input("q1"))?
            .expect("should produce a statement");

        let expected = Statement::Query(Query::Values(Values {
            rows: vec![
                vec![
                    Expr::IntegerLiteral(1),
                    Expr::StringLiteral("integer".to_string()),
                ],
                vec![
                    Expr::IntegerLiteral(2),
                    Expr::StringLiteral("unknown".to_string()),
                ],
            ],
        }));
        assert_eq!(result, expected);
        Ok(())
    }

    #[test]
    fn test_no_parameters_yields_empty_shape() -> Result<(), Box<dyn std::error::Error>> {
        let mut fixture = TestEnv::new();
        fixture
            .session
            .add_prepared_statement("q1".to_string(), "SELECT 1".to_string());

        let result = DescribeInputRewrite
            .rewrite(&fixture.env(), describe_input("q1"))?
            .expect("should produce a statement");
        assert_eq!(result, super::super::empty_result("position"));
        Ok(())
    }

    #[test]
    fn test_unknown_prepared_statement() {
        let fixture = TestEnv::new();

        let err = DescribeInputRewrite
            .rewrite(&fixture.env(), describe_input("nope"))
            .expect_err("should fail");
        match err {
            RewriterError::UnknownPreparedStatement(name) => assert_eq!(name, "nope"),
            other => panic!("Wrong error: {:?}", other),
        }
    }

    #[test]
    fn test_other_statements_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = TestEnv::new();
        let statement = Statement::ShowSchemas;

        let result = DescribeInputRewrite
            .rewrite(&fixture.env(), statement.clone())?
            .expect("should produce a statement");
        assert_eq!(result, statement);
        Ok(())
    }
}
