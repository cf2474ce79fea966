//! Project executor.

use crate::ast::{Expr, SelectItem};
use crate::executor::Operator;
use sluice_core::schema::Schema;
use sluice_core::{Error, Result, Tuple};

/// Project executor - re-selects child columns by position.
pub struct ProjectExecutor {
    child: Box<dyn Operator>,
    schema: Schema,
    /// Child positions to copy, or `None` to pass child tuples through.
    indices: Option<Vec<usize>>,
}

impl ProjectExecutor {
    /// Creates a projection for a SELECT item list.
    ///
    /// A wildcard expands to every child column; a column item contributes
    /// that column. Columns may repeat and appear in any order.
    pub fn new(child: Box<dyn Operator>, items: &[SelectItem]) -> Result<Self> {
        if let [SelectItem::Wildcard] = items {
            let schema = child.schema().clone();
            return Ok(Self {
                child,
                schema,
                indices: None,
            });
        }

        let input = child.schema();
        let mut indices = Vec::with_capacity(items.len());
        for item in items {
            match item {
                SelectItem::Wildcard => indices.extend(0..input.len()),
                SelectItem::Expr(Expr::Column(col)) => {
                    indices.push(input.index_of(col.table(), &col.column)?);
                }
                SelectItem::Expr(expr) => {
                    return Err(Error::unsupported(format!("expression in SELECT list: {}", expr)));
                }
            }
        }

        let columns = indices
            .iter()
            .filter_map(|&i| input.column(i).cloned())
            .collect();
        Ok(Self {
            schema: Schema::new_unchecked(columns),
            child,
            indices: Some(indices),
        })
    }
}

impl Operator for ProjectExecutor {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        let Some(tuple) = self.child.next()? else {
            return Ok(None);
        };
        match &self.indices {
            None => Ok(Some(tuple)),
            Some(indices) => tuple.project(indices).map(Some).ok_or_else(|| {
                Error::ColumnIndexOutOfRange {
                    column: self.schema.to_string(),
                    index: indices.iter().copied().max().unwrap_or(0),
                    arity: tuple.len(),
                }
            }),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.child.reset()
    }

    fn label(&self) -> String {
        match self.indices {
            None => "Project [*]".to_string(),
            Some(_) => format!("Project [{}]", self.schema),
        }
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }
}
