//! Set of fixtures used for unit testing instead of copying them everywhere
use std::collections::HashMap;
use std::sync::Mutex;

use super::access_control::{AccessControl, AccessDeniedError, AllowAllAccessControl};
use super::metadata::{Metadata, TableStats};
use super::objects::{Expr, QualifiedName, Session, Statement, Warning, WarningSink};
use super::rewriter::{QueryExplainer, RewriteEnv};
use super::sql_parser::{ParsingOptions, SqlParser};

/// In-memory catalog with a couple of schemas and tables.
#[derive(Clone, Debug, Default)]
pub struct TestMetadata {
    pub schemas: Vec<String>,
    pub tables: HashMap<String, Vec<String>>,
    pub stats: HashMap<String, TableStats>,
}

impl TestMetadata {
    pub fn with_sample_catalog() -> TestMetadata {
        let mut tables = HashMap::new();
        tables.insert(
            "public".to_string(),
            vec!["orders".to_string(), "customers".to_string()],
        );

        let mut stats = HashMap::new();
        stats.insert("public.orders".to_string(), TableStats { row_count: 42 });

        TestMetadata {
            schemas: vec!["public".to_string(), "information_schema".to_string()],
            tables,
            stats,
        }
    }
}

impl Metadata for TestMetadata {
    fn list_schemas(&self) -> Vec<String> {
        self.schemas.clone()
    }

    fn list_tables(&self, schema: &str) -> Vec<String> {
        self.tables.get(schema).cloned().unwrap_or_default()
    }

    fn table_stats(&self, table: &QualifiedName) -> Option<TableStats> {
        self.stats.get(&table.to_string()).copied()
    }
}

pub struct DenyAllAccessControl;

impl AccessControl for DenyAllAccessControl {
    fn check_can_show_tables(
        &self,
        session: &Session,
        schema: &str,
    ) -> Result<(), AccessDeniedError> {
        Err(AccessDeniedError(format!(
            "User {} may not show tables of schema {}",
            session.user, schema
        )))
    }
}

/// Collects warnings so tests can assert on them.
#[derive(Default)]
pub struct CollectingWarningSink {
    warnings: Mutex<Vec<Warning>>,
}

impl CollectingWarningSink {
    pub fn new() -> CollectingWarningSink {
        CollectingWarningSink::default()
    }

    pub fn drain(&self) -> Vec<Warning> {
        self.warnings.lock().unwrap().drain(..).collect()
    }
}

impl WarningSink for CollectingWarningSink {
    fn warn(&self, warning: Warning) {
        self.warnings.lock().unwrap().push(warning);
    }
}

/// Explainer that always answers with a fixed plan.
pub struct StaticExplainer {
    pub plan: String,
}

impl QueryExplainer for StaticExplainer {
    fn explain(&self, _session: &Session, _statement: &Statement) -> String {
        self.plan.clone()
    }
}

pub fn test_session() -> Session {
    Session::new(
        "postgres".to_string(),
        Some("prequel".to_string()),
        Some("public".to_string()),
    )
}

/// Owns everything a RewriteEnv borrows, so a test can build an env in one
/// line and still reach in and tweak individual collaborators first.
pub struct TestEnv {
    pub session: Session,
    pub metadata: TestMetadata,
    pub parser: SqlParser,
    pub parsing_options: ParsingOptions,
    pub parameters: Vec<Expr>,
    pub parameter_lookup: HashMap<usize, Expr>,
    pub access_control: Box<dyn AccessControl>,
    pub warnings: CollectingWarningSink,
}

impl TestEnv {
    pub fn new() -> TestEnv {
        TestEnv {
            session: test_session(),
            metadata: TestMetadata::with_sample_catalog(),
            parser: SqlParser,
            parsing_options: ParsingOptions::default(),
            parameters: Vec::new(),
            parameter_lookup: HashMap::new(),
            access_control: Box::new(AllowAllAccessControl),
            warnings: CollectingWarningSink::new(),
        }
    }

    pub fn env(&self) -> RewriteEnv<'_> {
        RewriteEnv {
            session: &self.session,
            metadata: &self.metadata,
            parser: &self.parser,
            parsing_options: &self.parsing_options,
            explainer: None,
            parameters: &self.parameters,
            parameter_lookup: &self.parameter_lookup,
            access_control: self.access_control.as_ref(),
            warnings: &self.warnings,
        }
    }

    pub fn env_with_explainer<'a>(
        &'a self,
        explainer: &'a dyn QueryExplainer,
    ) -> RewriteEnv<'a> {
        RewriteEnv {
            explainer: Some(explainer),
            ..self.env()
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        TestEnv::new()
    }
}
