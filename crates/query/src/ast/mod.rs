//! AST module for query statements and expressions.
//!
//! The SQL front-end (`crate::sql`) lowers parser output into these types;
//! the planner and the evaluator consume them.

mod expr;
mod statement;

pub use expr::{BinaryOp, ColumnRef, Expr};
pub use statement::{
    FromItem, JoinItem, SelectItem, SelectStatement, SetOperator, Statement, TableRef,
};
