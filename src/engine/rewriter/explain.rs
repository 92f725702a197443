//! Rewrites EXPLAIN into a single column query carrying the plan text.
use crate::engine::formatter::format_statement;
use crate::engine::objects::Statement;

use super::{single_column_select, Rewrite, RewriteEnv, RewriterError};

pub struct ExplainRewrite;

impl Rewrite for ExplainRewrite {
    fn name(&self) -> &'static str {
        "explain"
    }

    fn rewrite(
        &self,
        env: &RewriteEnv,
        statement: Statement,
    ) -> Result<Option<Statement>, RewriterError> {
        let inner = match statement {
            Statement::Explain { statement } => statement,
            other => return Ok(Some(other)),
        };

        let plan = match env.explainer {
            Some(explainer) => explainer.explain(env.session, &inner),
            //Without a planner attached the best explanation we have is the
            //canonical text of the statement itself
            None => format_statement(&inner),
        };

        Ok(Some(single_column_select(plan, "Query Plan")))
    }
}
