mod ast;
pub use ast::BinaryOperator;
pub use ast::Expr;
pub use ast::Ident;
pub use ast::QualifiedName;
pub use ast::Query;
pub use ast::Select;
pub use ast::SelectItem;
pub use ast::Statement;
pub use ast::Values;
pub(crate) use ast::is_reserved;

mod session;
pub use session::Session;

mod warning;
pub use warning::NoopWarningSink;
pub use warning::Warning;
pub use warning::WarningSink;
