//! Select executor.

use crate::ast::Expr;
use crate::eval::BoundPredicate;
use crate::executor::Operator;
use sluice_core::schema::Schema;
use sluice_core::{Result, Tuple};

/// Select executor - passes through child tuples satisfying a predicate.
pub struct SelectExecutor {
    child: Box<dyn Operator>,
    predicate: Expr,
    bound: BoundPredicate,
}

impl SelectExecutor {
    /// Creates a selection over `child`. The predicate is bound against the
    /// child schema here, so unknown columns and type misuse fail before any
    /// tuple is read.
    pub fn new(child: Box<dyn Operator>, predicate: Expr) -> Result<Self> {
        let bound = BoundPredicate::bind(&predicate, child.schema())?;
        Ok(Self {
            child,
            predicate,
            bound,
        })
    }

    /// Returns the predicate.
    pub fn predicate(&self) -> &Expr {
        &self.predicate
    }
}

impl Operator for SelectExecutor {
    fn schema(&self) -> &Schema {
        self.child.schema()
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        while let Some(tuple) = self.child.next()? {
            if self.bound.eval(&tuple)? {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<()> {
        self.child.reset()
    }

    fn label(&self) -> String {
        format!("Select [{}]", self.predicate)
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }
}
