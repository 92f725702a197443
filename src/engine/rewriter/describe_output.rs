//! Rewrites DESCRIBE OUTPUT into a VALUES listing of the column names the
//! referenced prepared statement would produce.
use crate::engine::objects::{Expr, Query, SelectItem, Statement};

use super::{empty_result, values_statement, Rewrite, RewriteEnv, RewriterError};

pub struct DescribeOutputRewrite;

impl Rewrite for DescribeOutputRewrite {
    fn name(&self) -> &'static str {
        "describe_output"
    }

    fn rewrite(
        &self,
        env: &RewriteEnv,
        statement: Statement,
    ) -> Result<Option<Statement>, RewriterError> {
        let name = match statement {
            Statement::DescribeOutput { name } => name,
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

        let columns = output_columns(&prepared);
        if columns.is_empty() {
            return Ok(Some(empty_result("column_name")));
        }

        let rows = columns
            .into_iter()
            .map(|column| vec![Expr::StringLiteral(column)])
            .collect();
        Ok(Some(values_statement(rows)))
    }
}

fn output_columns(statement: &Statement) -> Vec<String> {
    match statement {
        Statement::Query(Query::Select(select)) => select
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                SelectItem::AllColumns => "*".to_string(),
                SelectItem::Expression {
                    alias: Some(alias), ..
                } => alias.value.clone(),
                SelectItem::Expression {
                    expr: Expr::Identifier(ident),
                    ..
                } => ident.value.clone(),
                SelectItem::Expression { .. } => format!("_col{}", i),
            })
            .collect(),
        Statement::Query(Query::Values(values)) => match values.rows.first() {
            Some(row) => (0..row.len()).map(|i| format!("_col{}", i)).collect(),
            None => vec![],
        },
        //Utility statements answer with a single synthetic column
        _ => vec!["_col0".to_string()],
    }
}
