//! Catalog handle consumed by the rewrite passes. The real backing store is
//! someone else's problem, the rewriter only needs these read-only lookups.
use super::objects::QualifiedName;

pub trait Metadata {
    fn list_schemas(&self) -> Vec<String>;

    fn list_tables(&self, schema: &str) -> Vec<String>;

    fn table_stats(&self, table: &QualifiedName) -> Option<TableStats>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableStats {
    pub row_count: u64,
}
