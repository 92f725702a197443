//! The statement tree produced by the parser and consumed by the rewriter,
//! formatter and verifier. Plain owned enums, deep equality via PartialEq.
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Query(Query),
    Explain { statement: Box<Statement> },
    DescribeInput { name: Ident },
    DescribeOutput { name: Ident },
    ShowTables { schema: Option<Ident> },
    ShowSchemas,
    ShowStats { table: QualifiedName },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    Select(Select),
    Values(Values),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Select {
    pub items: Vec<SelectItem>,
    pub from: Option<QualifiedName>,
    pub where_clause: Option<Expr>,
    pub limit: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectItem {
    AllColumns,
    Expression { expr: Expr, alias: Option<Ident> },
}

/// At least one row; rewrites never build an empty VALUES since it has no
/// textual form the parser accepts.
#[derive(Clone, Debug, PartialEq)]
pub struct Values {
    pub rows: Vec<Vec<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Identifier(Ident),
    StringLiteral(String),
    IntegerLiteral(i64),
    DoubleLiteral(f64),
    DecimalLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    /// 1-based position, assigned in source order by the parser.
    Parameter(usize),
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinaryOperator {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Multiply,
    Divide,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    pub value: String,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Ident {
        Ident {
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QualifiedName {
    pub parts: Vec<Ident>,
}

impl QualifiedName {
    pub fn of(parts: &[&str]) -> QualifiedName {
        QualifiedName {
            parts: parts.iter().map(|p| Ident::new(*p)).collect(),
        }
    }
}

//Words the parser will not accept as bare identifiers and the formatter
//must therefore quote
pub(crate) const RESERVED_WORDS: [&str; 19] = [
    "select", "from", "where", "limit", "as", "values", "explain", "describe", "input", "output",
    "show", "tables", "schemas", "stats", "for", "and", "or", "true", "false",
];

pub(crate) fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|r| r.eq_ignore_ascii_case(word))
        || word.eq_ignore_ascii_case("null")
}

pub(crate) fn is_bare_safe(value: &str) -> bool {
    let mut chars = value.chars();
    let leading_ok = match chars.next() {
        Some(c) => c.is_ascii_alphabetic() || c == '_',
        None => false,
    };
    leading_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !is_reserved(value)
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_bare_safe(&self.value) {
            write!(f, "{}", self.value)
        } else {
            write!(f, "\"{}\"", self.value.replace('"', "\"\""))
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", part)?;
            first = false;
        }
        Ok(())
    }
}
