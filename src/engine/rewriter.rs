//! The statement rewrite pipeline. A parsed statement is threaded through a
//! fixed, ordered list of passes before planning; each pass either returns
//! the statement (possibly transformed) or a replacement for it. The order
//! is significant: a later pass may rely on an earlier pass having already
//! canonicalized a construct.
mod describe_input;
pub use describe_input::DescribeInputRewrite;

mod describe_output;
pub use describe_output::DescribeOutputRewrite;

mod show_queries;
pub use show_queries::ShowQueriesRewrite;

mod show_stats;
pub use show_stats::ShowStatsRewrite;

mod explain;
pub use explain::ExplainRewrite;

use std::collections::HashMap;

use thiserror::Error;

use super::access_control::{AccessControl, AccessDeniedError};
use super::metadata::Metadata;
use super::objects::{
    Expr, Ident, Query, Select, SelectItem, Session, Statement, Values, WarningSink,
};
use super::sql_parser::{ParsingOptions, SqlParser, SqlParserError};

/// Read-only collaborators handed through unchanged to every pass.
pub struct RewriteEnv<'a> {
    pub session: &'a Session,
    pub metadata: &'a dyn Metadata,
    pub parser: &'a SqlParser,
    pub parsing_options: &'a ParsingOptions,
    pub explainer: Option<&'a dyn QueryExplainer>,
    pub parameters: &'a [Expr],
    pub parameter_lookup: &'a HashMap<usize, Expr>,
    pub access_control: &'a dyn AccessControl,
    pub warnings: &'a dyn WarningSink,
}

/// One transformation step. `Ok(None)` is a contract violation, not a valid
/// way to drop a statement; the pipeline aborts on it naming the pass.
pub trait Rewrite: Send + Sync {
    fn name(&self) -> &'static str;

    fn rewrite(
        &self,
        env: &RewriteEnv,
        statement: Statement,
    ) -> Result<Option<Statement>, RewriterError>;
}

/// Produces the plan text for EXPLAIN. Optional; without one the rewrite
/// falls back to echoing the formatted statement.
pub trait QueryExplainer {
    fn explain(&self, session: &Session, statement: &Statement) -> String;
}

/// Immutable ordered pass registry. Built once and never mutated, safe to
/// share across concurrent rewrites.
pub struct Rewriter {
    passes: Vec<Box<dyn Rewrite>>,
}

impl Rewriter {
    pub fn new() -> Rewriter {
        Rewriter::with_passes(vec![
            Box::new(DescribeInputRewrite),
            Box::new(DescribeOutputRewrite),
            Box::new(ShowQueriesRewrite),
            Box::new(ShowStatsRewrite),
            Box::new(ExplainRewrite),
        ])
    }

    pub fn with_passes(passes: Vec<Box<dyn Rewrite>>) -> Rewriter {
        Rewriter { passes }
    }

    pub fn rewrite(
        &self,
        env: &RewriteEnv,
        mut statement: Statement,
    ) -> Result<Statement, RewriterError> {
        for pass in &self.passes {
            debug!("Applying statement rewrite {}", pass.name());
            statement = pass
                .rewrite(env, statement)?
                .ok_or(RewriterError::AbsentResult(pass.name()))?;
        }
        Ok(statement)
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Rewriter::new()
    }
}

#[derive(Debug, Error)]
pub enum RewriterError {
    #[error("Statement rewrite {0} returned an absent result")]
    AbsentResult(&'static str),
    #[error("Unknown prepared statement {0}")]
    UnknownPreparedStatement(String),
    #[error("Failed to parse prepared statement {name}: {source}")]
    PreparedStatementParse {
        name: String,
        #[source]
        source: SqlParserError,
    },
    #[error("Schema must be specified when session schema is not set")]
    SchemaNotSpecified,
    #[error(transparent)]
    AccessDenied(#[from] AccessDeniedError),
}

// Shared result builders for the passes below.

fn values_statement(rows: Vec<Vec<Expr>>) -> Statement {
    Statement::Query(Query::Values(Values { rows }))
}

// An empty VALUES has no textual form, so zero-row results canonicalize to
// a one column select with LIMIT 0.
fn empty_result(column_name: &str) -> Statement {
    Statement::Query(Query::Select(Select {
        items: vec![SelectItem::Expression {
            expr: Expr::StringLiteral(String::new()),
            alias: Some(Ident::new(column_name)),
        }],
        from: None,
        where_clause: None,
        limit: Some(0),
    }))
}

fn single_column_select(value: String, column_name: &str) -> Statement {
    Statement::Query(Query::Select(Select {
        items: vec![SelectItem::Expression {
            expr: Expr::StringLiteral(value),
            alias: Some(Ident::new(column_name)),
        }],
        from: None,
        where_clause: None,
        limit: None,
    }))
}

#[cfg(test)]
mod tests {
    use crate::engine::test_objects::TestEnv;

    use super::*;

    struct PassThrough;
    impl Rewrite for PassThrough {
        fn name(&self) -> &'static str {
            "pass_through"
        }
        fn rewrite(
            &self,
            _env: &RewriteEnv,
            statement: Statement,
        ) -> Result<Option<Statement>, RewriterError> {
            Ok(Some(statement))
        }
    }

    struct Absent;
    impl Rewrite for Absent {
        fn name(&self) -> &'static str {
            "absent"
        }
        fn rewrite(
            &self,
            _env: &RewriteEnv,
            _statement: Statement,
        ) -> Result<Option<Statement>, RewriterError> {
            Ok(None)
        }
    }

    struct MustNotRun;
    impl Rewrite for MustNotRun {
        fn name(&self) -> &'static str {
            "must_not_run"
        }
        fn rewrite(
            &self,
            _env: &RewriteEnv,
            _statement: Statement,
        ) -> Result<Option<Statement>, RewriterError> {
            panic!("pipeline must abort before this pass runs");
        }
    }

    #[test]
    fn test_empty_registry_returns_input() -> Result<(), Box<dyn std::error::Error>> {
        let fixture = TestEnv::new();
        let rewriter = Rewriter::with_passes(vec![]);

        let statement = Statement::ShowSchemas;
        let result = rewriter.rewrite(&fixture.env(), statement.clone())?;
        assert_eq!(result, statement);
        Ok(())
    }

    #[test]
    fn test_absent_result_aborts_before_later_passes() {
        let fixture = TestEnv::new();
        let rewriter =
            Rewriter::with_passes(vec![Box::new(PassThrough), Box::new(Absent), Box::new(MustNotRun)]);

        let err = rewriter
            .rewrite(&fixture.env(), Statement::ShowSchemas)
            .expect_err("should fail");
        match err {
            RewriterError::AbsentResult(name) => assert_eq!(name, "absent"),
            other => panic!("Wrong error: {:?}", other),
        }
    }
}
