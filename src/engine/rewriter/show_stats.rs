//! Rewrites SHOW STATS FOR into a VALUES listing of table statistics.
//! Missing statistics are not an error, they yield NULL plus a warning.
use std::convert::TryFrom;

use crate::engine::objects::{Expr, Statement, Warning};

use super::{values_statement, Rewrite, RewriteEnv, RewriterError};

pub struct ShowStatsRewrite;

impl Rewrite for ShowStatsRewrite {
    fn name(&self) -> &'static str {
        "show_stats"
    }

    fn rewrite(
        &self,
        env: &RewriteEnv,
        statement: Statement,
    ) -> Result<Option<Statement>, RewriterError> {
        let table = match statement {
            Statement::ShowStats { table } => table,
            other => return Ok(Some(other)),
        };

        //A count beyond i64 range has no literal form, treat it like missing stats
        let row_count = match env
            .metadata
            .table_stats(&table)
            .and_then(|stats| i64::try_from(stats.row_count).ok())
        {
            Some(count) => Expr::IntegerLiteral(count),
            None => {
                env.warnings.warn(Warning::new(
                    "STATS_NOT_AVAILABLE",
                    format!("No statistics available for table {}", table),
                ));
                Expr::NullLiteral
            }
        };

        Ok(Some(values_statement(vec![vec![
            Expr::StringLiteral("row_count".to_string()),
            row_count,
        ]])))
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::metadata::TableStats;
    use crate::engine::objects::{QualifiedName, Query, Values};
    use crate::engine::test_objects::TestEnv;

    use super::*;

    #[test]
    fn test_stats_present() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = TestEnv::new();

        let result = ShowStatsRewrite
            .rewrite(
                &fixture.env(),
                Statement::ShowStats {
                    table: QualifiedName::of(&["public", "orders"]),
                },
            )?
            .expect("should produce a statement");

        let expected = Statement::Query(Query::Values(Values {
            rows: vec![vec![
                Expr::StringLiteral("row_count".to_string()),
                Expr::IntegerLiteral(42),
            ]],
        }));
        assert_eq!(result, expected);
        assert!(fixture.warnings.drain().is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_stats_warn_and_yield_null() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = TestEnv::new();

        let result = ShowStatsRewrite
            .rewrite(
                &fixture.env(),
                Statement::ShowStats {
                    table: QualifiedName::of(&["public", "mystery"]),
                },
            )?
            .expect("should produce a statement");

        let expected = Statement::Query(Query::Values(Values {
            rows: vec![vec![
                Expr::StringLiteral("row_count".to_string()),
                Expr::NullLiteral,
            ]],
        }));
        assert_eq!(result, expected);

        let warnings = fixture.warnings.drain();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "STATS_NOT_AVAILABLE");
        assert!(warnings[0].message.contains("public.mystery"));
        Ok(())
    }

    #[test]
    fn test_row_count_beyond_i64_treated_as_missing() -> Result<(), Box<dyn std::error::Error>> {
        let mut fixture = TestEnv::new();
        fixture.metadata.stats.insert(
            "public.huge".to_string(),
            TableStats {
                row_count: u64::MAX,
            },
        );

        let result = ShowStatsRewrite
            .rewrite(
                &fixture.env(),
                Statement::ShowStats {
                    table: QualifiedName::of(&["public", "huge"]),
                },
            )?
            .expect("should produce a statement");

        let expected = Statement::Query(Query::Values(Values {
            rows: vec![vec![
                Expr::StringLiteral("row_count".to_string()),
                Expr::NullLiteral,
            ]],
        }));
        assert_eq!(result, expected);

        let warnings = fixture.warnings.drain();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "STATS_NOT_AVAILABLE");
        Ok(())
    }
}
