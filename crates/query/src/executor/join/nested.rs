//! Nested Loop Join implementation.

use crate::ast::Expr;
use crate::eval::BoundPredicate;
use crate::executor::Operator;
use sluice_core::schema::Schema;
use sluice_core::{Result, Tuple};

/// Tuple nested loop join.
///
/// Holds one left tuple at a time and rescans the whole right input for
/// it. Every pair is compared, so the cost is O(|left| x |right|). Without
/// a predicate the join is a cross product.
pub struct NestedLoopJoin {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    schema: Schema,
    predicate: Option<(Expr, BoundPredicate)>,
    /// Left tuple currently being matched.
    current: Option<Tuple>,
}

impl NestedLoopJoin {
    /// Creates a join whose output schema is the left schema followed by the
    /// right schema. The predicate is bound against that schema.
    pub fn new(left: Box<dyn Operator>, right: Box<dyn Operator>, predicate: Option<Expr>) -> Result<Self> {
        let schema = left.schema().join(right.schema())?;
        let predicate = match predicate {
            Some(expr) => {
                let bound = BoundPredicate::bind(&expr, &schema)?;
                Some((expr, bound))
            }
            None => None,
        };
        Ok(Self {
            left,
            right,
            schema,
            predicate,
            current: None,
        })
    }

    /// Creates a cross product.
    pub fn cross(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Result<Self> {
        Self::new(left, right, None)
    }

    /// Returns the join predicate, if any.
    pub fn predicate(&self) -> Option<&Expr> {
        self.predicate.as_ref().map(|(expr, _)| expr)
    }
}

impl Operator for NestedLoopJoin {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        loop {
            if self.current.is_none() {
                match self.left.next()? {
                    Some(tuple) => {
                        self.right.reset()?;
                        self.current = Some(tuple);
                    }
                    None => return Ok(None),
                }
            }

            if let Some(left) = &self.current {
                while let Some(right) = self.right.next()? {
                    let joined = left.concat(&right);
                    let accept = match &self.predicate {
                        Some((_, bound)) => bound.eval(&joined)?,
                        None => true,
                    };
                    if accept {
                        return Ok(Some(joined));
                    }
                }
            }
            self.current = None;
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.current = None;
        self.left.reset()?;
        self.right.reset()
    }

    fn label(&self) -> String {
        match self.predicate() {
            Some(expr) => format!("NestedLoopJoin [{}]", expr),
            None => "NestedLoopJoin".to_string(),
        }
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.left.as_ref(), self.right.as_ref()]
    }
}
