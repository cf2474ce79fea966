//! Duplicate elimination executor.

use crate::executor::Operator;
use sluice_core::schema::Schema;
use sluice_core::{Result, Tuple};

/// Removes adjacent duplicate tuples.
///
/// The input must be sorted over all output columns for this to yield
/// distinct tuples; the operator does not check it.
pub struct DuplicateEliminationExecutor {
    child: Box<dyn Operator>,
    last: Option<Tuple>,
}

impl DuplicateEliminationExecutor {
    /// Creates a duplicate elimination over a sorted child.
    pub fn new(child: Box<dyn Operator>) -> Self {
        Self { child, last: None }
    }
}

impl Operator for DuplicateEliminationExecutor {
    fn schema(&self) -> &Schema {
        self.child.schema()
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        while let Some(tuple) = self.child.next()? {
            if self.last.as_ref() != Some(&tuple) {
                self.last = Some(tuple.clone());
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<()> {
        self.last = None;
        self.child.reset()
    }

    fn label(&self) -> String {
        "DuplicateElimination".to_string()
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{SortExecutor, ValuesExecutor};

    fn source(rows: Vec<Vec<i64>>) -> Box<dyn Operator> {
        Box::new(ValuesExecutor::from_rows("R", ["G", "H"], rows))
    }

    #[test]
    fn test_distinct_sorted_input() {
        let child = source(vec![vec![1, 1], vec![1, 1], vec![1, 2], vec![2, 2], vec![2, 2]]);
        let mut distinct = DuplicateEliminationExecutor::new(child);
        let tuples = distinct.collect_tuples().unwrap();
        assert_eq!(
            tuples,
            vec![Tuple::new(vec![1, 1]), Tuple::new(vec![1, 2]), Tuple::new(vec![2, 2])]
        );
    }

    #[test]
    fn test_distinct_only_adjacent() {
        let child = source(vec![vec![1, 1], vec![2, 2], vec![1, 1]]);
        let mut distinct = DuplicateEliminationExecutor::new(child);
        assert_eq!(distinct.collect_tuples().unwrap().len(), 3);
    }

    #[test]
    fn test_distinct_after_full_sort() {
        let child = source(vec![vec![1, 1], vec![2, 2], vec![1, 1], vec![2, 2], vec![0, 5]]);
        let mut distinct = DuplicateEliminationExecutor::new(Box::new(SortExecutor::full_schema(child)));
        let tuples = distinct.collect_tuples().unwrap();
        assert_eq!(
            tuples,
            vec![Tuple::new(vec![0, 5]), Tuple::new(vec![1, 1]), Tuple::new(vec![2, 2])]
        );
    }

    #[test]
    fn test_distinct_reset() {
        let child = source(vec![vec![1, 1], vec![1, 1], vec![3, 3]]);
        let mut distinct = DuplicateEliminationExecutor::new(child);
        let first = distinct.collect_tuples().unwrap();
        distinct.reset().unwrap();
        assert_eq!(distinct.collect_tuples().unwrap(), first);
    }
}
