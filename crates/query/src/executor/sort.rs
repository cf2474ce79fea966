//! Sort executor.

use crate::ast::ColumnRef;
use crate::executor::Operator;
use sluice_core::schema::Schema;
use sluice_core::{Result, Tuple};
use std::cmp::Ordering;
use tracing::trace;

/// Sort executor - blocking in-memory sort.
///
/// The first pull drains the child and sorts once. Later pulls, and pulls
/// after `reset`, are served from the buffer.
pub struct SortExecutor {
    child: Box<dyn Operator>,
    /// Key columns as written, for `explain`.
    keys: Vec<ColumnRef>,
    /// Key positions followed by every remaining position in schema order.
    order: Vec<usize>,
    buffer: Option<Vec<Tuple>>,
    cursor: usize,
}

impl SortExecutor {
    /// Creates a sort on the given columns, ascending in listed order. Ties
    /// are broken by the remaining columns in schema order, so the result is
    /// totally ordered.
    pub fn new(child: Box<dyn Operator>, keys: &[ColumnRef]) -> Result<Self> {
        let schema = child.schema();
        let mut order = Vec::with_capacity(schema.len());
        for key in keys {
            let index = schema.index_of(key.table(), &key.column)?;
            if !order.contains(&index) {
                order.push(index);
            }
        }
        for index in 0..schema.len() {
            if !order.contains(&index) {
                order.push(index);
            }
        }
        Ok(Self {
            child,
            keys: keys.to_vec(),
            order,
            buffer: None,
            cursor: 0,
        })
    }

    /// Creates a sort over every column in schema order.
    pub fn full_schema(child: Box<dyn Operator>) -> Self {
        let order = (0..child.schema().len()).collect();
        Self {
            child,
            keys: Vec::new(),
            order,
            buffer: None,
            cursor: 0,
        }
    }

    fn compare(order: &[usize], a: &Tuple, b: &Tuple) -> Ordering {
        order
            .iter()
            .map(|&i| a.get(i).cmp(&b.get(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    fn materialize(&mut self) -> Result<Vec<Tuple>> {
        let mut tuples = self.child.collect_tuples()?;
        let order = &self.order;
        tuples.sort_by(|a, b| Self::compare(order, a, b));
        trace!(tuples = tuples.len(), "sort buffer materialized");
        Ok(tuples)
    }
}

impl Operator for SortExecutor {
    fn schema(&self) -> &Schema {
        self.child.schema()
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        if self.buffer.is_none() {
            self.buffer = Some(self.materialize()?);
            self.cursor = 0;
        }
        let tuple = self
            .buffer
            .as_ref()
            .and_then(|buffer| buffer.get(self.cursor))
            .cloned();
        if tuple.is_some() {
            self.cursor += 1;
        }
        Ok(tuple)
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn label(&self) -> String {
        if self.keys.is_empty() {
            format!("Sort [{}]", self.child.schema())
        } else {
            let keys: Vec<String> = self.keys.iter().map(ToString::to_string).collect();
            format!("Sort [{}]", keys.join(", "))
        }
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }
}
