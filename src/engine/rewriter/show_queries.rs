//! Rewrites the SHOW family (SHOW SCHEMAS, SHOW TABLES) into plain queries
//! over the metadata catalog, after checking the caller may see the listing.
use crate::engine::objects::{Expr, Statement};

use super::{empty_result, values_statement, Rewrite, RewriteEnv, RewriterError};

pub struct ShowQueriesRewrite;

impl Rewrite for ShowQueriesRewrite {
    fn name(&self) -> &'static str {
        "show_queries"
    }

    fn rewrite(
        &self,
        env: &RewriteEnv,
        statement: Statement,
    ) -> Result<Option<Statement>, RewriterError> {
        match statement {
            Statement::ShowSchemas => {
                let mut schemas = env.metadata.list_schemas();
                schemas.sort_unstable();
                Ok(Some(string_listing(schemas, "schema_name")))
            }
            Statement::ShowTables { schema } => {
                let schema_name = match schema {
                    Some(ident) => ident.value,
                    None => env
                        .session
                        .schema
                        .clone()
                        .ok_or(RewriterError::SchemaNotSpecified)?,
                };
                env.access_control
                    .check_can_show_tables(env.session, &schema_name)?;

                let mut tables = env.metadata.list_tables(&schema_name);
                tables.sort_unstable();
                Ok(Some(string_listing(tables, "table_name")))
            }
            other => Ok(Some(other)),
        }
    }
}

fn string_listing(names: Vec<String>, column_name: &str) -> Statement {
    if names.is_empty() {
        return empty_result(column_name);
    }
    values_statement(
        names
            .into_iter()
            .map(|name| vec![Expr::StringLiteral(name)])
            .collect(),
    )
}
