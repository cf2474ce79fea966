//! Expression and predicate evaluation.
//!
//! Expressions are bound once against a schema, which turns every column
//! reference into a tuple position and checks that arithmetic and boolean
//! nodes are used where they belong. The bound forms are then evaluated per
//! tuple without any name lookups.

use crate::ast::{BinaryOp, ColumnRef, Expr};
use sluice_core::schema::Schema;
use sluice_core::{Error, Result, Tuple};
use std::cmp::Ordering;
use std::fmt;

/// An integer expression bound to schema positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundExpr {
    /// Value at a tuple position. The reference is kept for error messages.
    Column { index: usize, column: ColumnRef },
    /// Constant.
    Literal(i64),
    /// `+ - * /` over two integer operands.
    Arithmetic {
        left: Box<BoundExpr>,
        op: BinaryOp,
        right: Box<BoundExpr>,
    },
    /// Parenthesized expression.
    Nested(Box<BoundExpr>),
}

impl BoundExpr {
    /// Binds an arithmetic expression against `schema`.
    pub fn bind(expr: &Expr, schema: &Schema) -> Result<Self> {
        match expr {
            Expr::Column(col) => {
                let index = schema.index_of(col.table(), &col.column)?;
                Ok(BoundExpr::Column {
                    index,
                    column: col.clone(),
                })
            }
            Expr::Literal(value) => Ok(BoundExpr::Literal(*value)),
            Expr::BinaryOp { left, op, right } if op.is_arithmetic() => Ok(BoundExpr::Arithmetic {
                left: Box::new(BoundExpr::bind(left, schema)?),
                op: *op,
                right: Box::new(BoundExpr::bind(right, schema)?),
            }),
            Expr::BinaryOp { .. } => Err(Error::type_mismatch("integer", expr.to_string())),
            Expr::Nested(inner) => Ok(BoundExpr::Nested(Box::new(BoundExpr::bind(inner, schema)?))),
        }
    }

    /// Evaluates the expression for one tuple.
    pub fn eval(&self, tuple: &Tuple) -> Result<i64> {
        match self {
            BoundExpr::Column { index, column } => {
                tuple.get(*index).ok_or_else(|| Error::ColumnIndexOutOfRange {
                    column: column.to_string(),
                    index: *index,
                    arity: tuple.len(),
                })
            }
            BoundExpr::Literal(value) => Ok(*value),
            BoundExpr::Arithmetic { left, op, right } => {
                let l = left.eval(tuple)?;
                let r = right.eval(tuple)?;
                self.apply(*op, l, r)
            }
            BoundExpr::Nested(inner) => inner.eval(tuple),
        }
    }

    fn apply(&self, op: BinaryOp, l: i64, r: i64) -> Result<i64> {
        let result = match op {
            BinaryOp::Add => l.checked_add(r),
            BinaryOp::Sub => l.checked_sub(r),
            BinaryOp::Mul => l.checked_mul(r),
            BinaryOp::Div => {
                if r == 0 {
                    return Err(Error::division_by_zero(self.to_string()));
                }
                // truncates toward zero
                l.checked_div(r)
            }
            _ => unreachable!("bind only admits arithmetic operators"),
        };
        result.ok_or_else(|| Error::overflow(self.to_string()))
    }
}

impl fmt::Display for BoundExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundExpr::Column { column, .. } => write!(f, "{}", column),
            BoundExpr::Literal(value) => write!(f, "{}", value),
            BoundExpr::Arithmetic { left, op, right } => write!(f, "{} {} {}", left, op.symbol(), right),
            BoundExpr::Nested(inner) => write!(f, "({})", inner),
        }
    }
}

/// A boolean expression bound to schema positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundPredicate {
    /// Integer comparison.
    Compare {
        left: BoundExpr,
        op: BinaryOp,
        right: BoundExpr,
    },
    /// Short-circuit conjunction.
    And(Box<BoundPredicate>, Box<BoundPredicate>),
}

impl BoundPredicate {
    /// Binds a boolean expression against `schema`.
    pub fn bind(expr: &Expr, schema: &Schema) -> Result<Self> {
        match expr {
            Expr::BinaryOp { left, op, right } if op.is_comparison() => Ok(BoundPredicate::Compare {
                left: BoundExpr::bind(left, schema)?,
                op: *op,
                right: BoundExpr::bind(right, schema)?,
            }),
            Expr::BinaryOp {
                left,
                op: BinaryOp::And,
                right,
            } => Ok(BoundPredicate::And(
                Box::new(BoundPredicate::bind(left, schema)?),
                Box::new(BoundPredicate::bind(right, schema)?),
            )),
            Expr::Nested(inner) => BoundPredicate::bind(inner, schema),
            Expr::Column(_) | Expr::Literal(_) | Expr::BinaryOp { .. } => {
                Err(Error::type_mismatch("boolean", expr.to_string()))
            }
        }
    }

    /// Evaluates the predicate for one tuple. The right side of an AND is
    /// not evaluated when the left side is false.
    pub fn eval(&self, tuple: &Tuple) -> Result<bool> {
        match self {
            BoundPredicate::Compare { left, op, right } => {
                let ordering = left.eval(tuple)?.cmp(&right.eval(tuple)?);
                Ok(match op {
                    BinaryOp::Eq => ordering == Ordering::Equal,
                    BinaryOp::Ne => ordering != Ordering::Equal,
                    BinaryOp::Lt => ordering == Ordering::Less,
                    BinaryOp::Le => ordering != Ordering::Greater,
                    BinaryOp::Gt => ordering == Ordering::Greater,
                    BinaryOp::Ge => ordering != Ordering::Less,
                    _ => unreachable!("bind only admits comparison operators"),
                })
            }
            BoundPredicate::And(left, right) => Ok(left.eval(tuple)? && right.eval(tuple)?),
        }
    }
}

/// Evaluates an arithmetic expression against a (tuple, schema) pair.
pub fn evaluate(expr: &Expr, tuple: &Tuple, schema: &Schema) -> Result<i64> {
    BoundExpr::bind(expr, schema)?.eval(tuple)
}

/// Evaluates a boolean expression against a (tuple, schema) pair.
pub fn evaluate_predicate(expr: &Expr, tuple: &Tuple, schema: &Schema) -> Result<bool> {
    BoundPredicate::bind(expr, schema)?.eval(tuple)
}
