//! In-memory tuple source.

use crate::executor::Operator;
use sluice_core::schema::Schema;
use sluice_core::{Result, Tuple};

/// Serves a fixed list of tuples. Useful for tests and benchmarks, and for
/// feeding operators from data that is already in memory.
pub struct ValuesExecutor {
    schema: Schema,
    tuples: Vec<Tuple>,
    cursor: usize,
}

impl ValuesExecutor {
    /// Creates a source over `tuples`. Every tuple should match the schema
    /// arity.
    pub fn new(schema: Schema, tuples: Vec<Tuple>) -> Self {
        Self {
            schema,
            tuples,
            cursor: 0,
        }
    }

    /// Creates a source for a table qualifier from raw rows.
    pub fn from_rows<I, S>(table: &str, columns: I, rows: Vec<Vec<i64>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            Schema::for_table(table, columns),
            rows.into_iter().map(Tuple::from).collect(),
        )
    }
}

impl Operator for ValuesExecutor {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        let tuple = self.tuples.get(self.cursor).cloned();
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
        format!("Values [{} rows]", self.tuples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_drain_and_reset() {
        let mut source = ValuesExecutor::from_rows("R", ["G", "H"], vec![vec![1, 101], vec![2, 102]]);
        assert_eq!(source.schema().to_string(), "R.G, R.H");

        let first = source.collect_tuples().unwrap();
        assert_eq!(first, vec![Tuple::new(vec![1, 101]), Tuple::new(vec![2, 102])]);
        assert_eq!(source.next().unwrap(), None);

        source.reset().unwrap();
        assert_eq!(source.collect_tuples().unwrap(), first);
    }

    #[test]
    fn test_dump_writes_storage_format() {
        let mut source = ValuesExecutor::from_rows("R", ["G", "H"], vec![vec![1, -101], vec![2, 102]]);
        let mut out = Vec::new();
        let count = source.dump(&mut out).unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "1,-101\n2,102\n");
    }
}
