pub mod access_control;
pub use access_control::AccessControl;
pub use access_control::AccessDeniedError;
pub use access_control::AllowAllAccessControl;

pub mod formatter;

pub mod linearizer;
pub use linearizer::NodeRef;

pub mod metadata;
pub use metadata::Metadata;
pub use metadata::TableStats;

pub mod objects;
use objects::{Session, Statement, WarningSink};

pub mod rewriter;
pub use rewriter::Rewriter;
pub use rewriter::RewriterError;

pub mod sql_parser;
pub use sql_parser::SqlParser;
pub use sql_parser::SqlParserError;

pub mod tree_diff;

pub mod verifier;
pub use verifier::VerifierError;

pub mod test_objects;

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use rewriter::RewriteEnv;
use sql_parser::ParsingOptions;

/// The front half of a query engine: parse the SQL text, then thread the
/// statement through the rewrite pipeline. Planning and execution live
/// behind this boundary and are not part of this crate.
#[derive(Clone)]
pub struct Engine {
    parser: SqlParser,
    rewriter: Arc<Rewriter>,
    metadata: Arc<dyn Metadata + Send + Sync>,
    access_control: Arc<dyn AccessControl + Send + Sync>,
}

impl Engine {
    pub fn new(
        metadata: Arc<dyn Metadata + Send + Sync>,
        access_control: Arc<dyn AccessControl + Send + Sync>,
    ) -> Engine {
        Engine {
            parser: SqlParser,
            rewriter: Arc::new(Rewriter::new()),
            metadata,
            access_control,
        }
    }

    pub fn process_statement(
        &self,
        session: &Session,
        warnings: &dyn WarningSink,
        sql: &str,
    ) -> Result<Statement, EngineError> {
        debug!("Processing {}", sql);

        //Parse it
        let options = ParsingOptions::default();
        let statement = self.parser.parse(sql, &options)?;

        //Rewrite it
        let parameters = Vec::new();
        let parameter_lookup = HashMap::new();
        let env = RewriteEnv {
            session,
            metadata: self.metadata.as_ref(),
            parser: &self.parser,
            parsing_options: &options,
            explainer: None,
            parameters: &parameters,
            parameter_lookup: &parameter_lookup,
            access_control: self.access_control.as_ref(),
            warnings,
        };
        let rewritten = self.rewriter.rewrite(&env, statement)?;

        Ok(rewritten)
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    ParseError(#[from] SqlParserError),
    #[error(transparent)]
    RewriterError(#[from] RewriterError),
}
