use std::collections::HashMap;
use uuid::Uuid;

/// Read-only view of the connected client for the rewrite passes. Prepared
/// statements are stored as raw SQL text and reparsed on demand.
#[derive(Clone, Debug)]
pub struct Session {
    pub query_id: Uuid,
    pub user: String,
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub prepared_statements: HashMap<String, String>,
}

impl Session {
    pub fn new(user: String, catalog: Option<String>, schema: Option<String>) -> Session {
        Session {
            query_id: Uuid::new_v4(),
            user,
            catalog,
            schema,
            prepared_statements: HashMap::new(),
        }
    }

    pub fn add_prepared_statement(&mut self, name: String, sql: String) {
        self.prepared_statements.insert(name, sql);
    }

    pub fn get_prepared_statement(&self, name: &str) -> Option<&String> {
        self.prepared_statements.get(name)
    }
}
