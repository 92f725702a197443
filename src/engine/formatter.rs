//! Renders a statement tree back to canonical SQL text. Must be total for
//! well-formed trees and a fixed point under reparse-and-format, the
//! round-trip verifier leans on both properties.
use super::objects::{BinaryOperator, Expr, Query, Select, SelectItem, Statement, Values};

pub fn format_statement(statement: &Statement) -> String {
    match statement {
        Statement::Query(query) => format_query(query),
        Statement::Explain { statement } => format!("EXPLAIN {}", format_statement(statement)),
        Statement::DescribeInput { name } => format!("DESCRIBE INPUT {}", name),
        Statement::DescribeOutput { name } => format!("DESCRIBE OUTPUT {}", name),
        Statement::ShowTables { schema: None } => "SHOW TABLES".to_string(),
        Statement::ShowTables {
            schema: Some(schema),
        } => format!("SHOW TABLES FROM {}", schema),
        Statement::ShowSchemas => "SHOW SCHEMAS".to_string(),
        Statement::ShowStats { table } => format!("SHOW STATS FOR {}", table),
    }
}

pub fn format_query(query: &Query) -> String {
    match query {
        Query::Select(select) => format_select(select),
        Query::Values(values) => format_values(values),
    }
}

fn format_select(select: &Select) -> String {
    let items = select
        .items
        .iter()
        .map(format_select_item)
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("SELECT {}", items);
    if let Some(from) = &select.from {
        sql.push_str(&format!(" FROM {}", from));
    }
    if let Some(predicate) = &select.where_clause {
        sql.push_str(&format!(" WHERE {}", format_expr(predicate)));
    }
    if let Some(limit) = select.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }
    sql
}

pub fn format_select_item(item: &SelectItem) -> String {
    match item {
        SelectItem::AllColumns => "*".to_string(),
        SelectItem::Expression { expr, alias: None } => format_expr(expr),
        SelectItem::Expression {
            expr,
            alias: Some(alias),
        } => format!("{} AS {}", format_expr(expr), alias),
    }
}

fn format_values(values: &Values) -> String {
    let rows = values
        .rows
        .iter()
        .map(|row| {
            let exprs = row.iter().map(format_expr).collect::<Vec<_>>().join(", ");
            format!("({})", exprs)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("VALUES {}", rows)
}

pub fn format_expr(expr: &Expr) -> String {
    match expr {
        Expr::Identifier(ident) => ident.to_string(),
        Expr::StringLiteral(value) => format!("'{}'", value.replace('\'', "''")),
        Expr::IntegerLiteral(value) => value.to_string(),
        //Debug rendering keeps a decimal point or exponent so the text
        //reparses as a double instead of an integer
        Expr::DoubleLiteral(value) => format!("{:?}", value),
        Expr::DecimalLiteral(text) => text.clone(),
        Expr::BooleanLiteral(true) => "TRUE".to_string(),
        Expr::BooleanLiteral(false) => "FALSE".to_string(),
        Expr::NullLiteral => "NULL".to_string(),
        Expr::Parameter(_) => "?".to_string(),
        Expr::BinaryOp { left, op, right } => {
            let precedence = operator_precedence(*op);
            format!(
                "{} {} {}",
                parenthesize(left, precedence, false),
                operator_text(*op),
                parenthesize(right, precedence, true)
            )
        }
    }
}

// Operators associate left, so a right operand at the same precedence level
// needs parentheses to survive a reparse while a left one does not.
fn parenthesize(child: &Expr, parent_precedence: u8, right_side: bool) -> String {
    let needs_parens = match child {
        Expr::BinaryOp { op, .. } => {
            let child_precedence = operator_precedence(*op);
            child_precedence < parent_precedence
                || (right_side && child_precedence == parent_precedence)
        }
        _ => false,
    };

    if needs_parens {
        format!("({})", format_expr(child))
    } else {
        format_expr(child)
    }
}

fn operator_precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Or => 1,
        BinaryOperator::And => 2,
        BinaryOperator::Eq
        | BinaryOperator::NotEq
        | BinaryOperator::Lt
        | BinaryOperator::LtEq
        | BinaryOperator::Gt
        | BinaryOperator::GtEq => 3,
        BinaryOperator::Plus | BinaryOperator::Minus => 4,
        BinaryOperator::Multiply | BinaryOperator::Divide => 5,
    }
}

fn operator_text(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Or => "OR",
        BinaryOperator::And => "AND",
        BinaryOperator::Eq => "=",
        BinaryOperator::NotEq => "<>",
        BinaryOperator::Lt => "<",
        BinaryOperator::LtEq => "<=",
        BinaryOperator::Gt => ">",
        BinaryOperator::GtEq => ">=",
        BinaryOperator::Plus => "+",
        BinaryOperator::Minus => "-",
        BinaryOperator::Multiply => "*",
        BinaryOperator::Divide => "/",
    }
}
