//! Flattens a statement tree into an ordered sequence of node references so
//! two trees can be compared position by position.
//!
//! The traversal appends every structural child (left to right) before the
//! node itself. The comparison in tree_diff only needs the order to be
//! deterministic and identical for both trees, so this order is kept stable
//! and must not be changed independently of the diff semantics.
use std::fmt;

use super::formatter::{format_expr, format_query, format_select_item, format_statement};
use super::objects::{Expr, Query, Select, SelectItem, Statement, Values};

/// Borrowed view of one node in a statement tree. Equality is the deep
/// structural equality of the referenced node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeRef<'a> {
    Statement(&'a Statement),
    Query(&'a Query),
    SelectItem(&'a SelectItem),
    Expr(&'a Expr),
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Statement(s) => write!(f, "{}", format_statement(s)),
            NodeRef::Query(q) => write!(f, "{}", format_query(q)),
            NodeRef::SelectItem(i) => write!(f, "{}", format_select_item(i)),
            NodeRef::Expr(e) => write!(f, "{}", format_expr(e)),
        }
    }
}

/// Eagerly materializes the node sequence for one tree. Visits every node
/// exactly once, a single node tree yields a one element sequence.
pub fn linearize(statement: &Statement) -> Vec<NodeRef<'_>> {
    let mut nodes = Vec::new();
    visit_statement(statement, &mut nodes);
    nodes
}

fn visit_statement<'a>(statement: &'a Statement, nodes: &mut Vec<NodeRef<'a>>) {
    match statement {
        Statement::Query(query) => visit_query(query, nodes),
        Statement::Explain { statement } => visit_statement(statement, nodes),
        Statement::DescribeInput { .. }
        | Statement::DescribeOutput { .. }
        | Statement::ShowTables { .. }
        | Statement::ShowSchemas
        | Statement::ShowStats { .. } => {}
    }
    nodes.push(NodeRef::Statement(statement));
}

fn visit_query<'a>(query: &'a Query, nodes: &mut Vec<NodeRef<'a>>) {
    match query {
        Query::Select(Select {
            items,
            where_clause,
            ..
        }) => {
            for item in items {
                visit_select_item(item, nodes);
            }
            if let Some(predicate) = where_clause {
                visit_expr(predicate, nodes);
            }
        }
        Query::Values(Values { rows }) => {
            for row in rows {
                for expr in row {
                    visit_expr(expr, nodes);
                }
            }
        }
    }
    nodes.push(NodeRef::Query(query));
}

fn visit_select_item<'a>(item: &'a SelectItem, nodes: &mut Vec<NodeRef<'a>>) {
    if let SelectItem::Expression { expr, .. } = item {
        visit_expr(expr, nodes);
    }
    nodes.push(NodeRef::SelectItem(item));
}

fn visit_expr<'a>(expr: &'a Expr, nodes: &mut Vec<NodeRef<'a>>) {
    if let Expr::BinaryOp { left, right, .. } = expr {
        visit_expr(left, nodes);
        visit_expr(right, nodes);
    }
    nodes.push(NodeRef::Expr(expr));
}
