//! Schema module for Sluice.
//!
//! A `Schema` is the ordered list of columns an operator produces. The
//! position of a column is the index of its value in every tuple of that
//! operator, and it is the only addressing mechanism evaluators use: names
//! are translated to positions once, when an operator is built.

mod column;

pub use column::Column;

use crate::error::{Error, Result};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Ordered column descriptors defining a tuple layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Creates a schema from the given columns, rejecting repeated
    /// (table, name) pairs.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].contains(col) {
                return Err(Error::duplicate_column(col.table(), col.name()));
            }
        }
        Ok(Self { columns })
    }

    /// Creates a schema without the uniqueness check. Projections may
    /// legitimately repeat a column.
    pub fn new_unchecked(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Creates a schema for a base table, every column qualified by `table`.
    pub fn for_table<I, S>(table: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = names.into_iter().map(|n| Column::new(table, n)).collect();
        Self { columns }
    }

    /// Returns the columns.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column at `index`.
    #[inline]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Returns the number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolves a column reference to its position.
    ///
    /// A qualified reference must match exactly one column. An unqualified
    /// reference resolves to the first column with that name.
    pub fn index_of(&self, table: Option<&str>, name: &str) -> Result<usize> {
        let mut matches = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(table, name))
            .map(|(i, _)| i);

        let first = matches
            .next()
            .ok_or_else(|| Error::column_not_found(table, name))?;

        if let Some(table) = table {
            if matches.next().is_some() {
                return Err(Error::ambiguous_column(table, name));
            }
        }
        Ok(first)
    }

    /// Returns true if any column carries the given qualifier.
    pub fn has_table(&self, table: &str) -> bool {
        self.columns.iter().any(|c| c.table() == table)
    }

    /// Returns the distinct qualifiers in column order.
    pub fn tables(&self) -> Vec<&str> {
        let mut tables: Vec<&str> = Vec::new();
        for col in &self.columns {
            if !tables.contains(&col.table()) {
                tables.push(col.table());
            }
        }
        tables
    }

    /// Returns a copy of this schema with every column requalified.
    pub fn with_table(&self, table: &str) -> Self {
        Self {
            columns: self.columns.iter().map(|c| c.with_table(table)).collect(),
        }
    }

    /// Concatenates two schemas, as produced by a join.
    pub fn join(&self, right: &Schema) -> Result<Self> {
        let mut columns = Vec::with_capacity(self.len() + right.len());
        columns.extend_from_slice(&self.columns);
        columns.extend_from_slice(&right.columns);
        Schema::new(columns)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", col)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn sailors() -> Schema {
        Schema::for_table("Sailors", ["A", "B", "C"])
    }

    #[test]
    fn test_index_of_qualified() {
        let schema = sailors();
        assert_eq!(schema.index_of(Some("Sailors"), "A").unwrap(), 0);
        assert_eq!(schema.index_of(Some("Sailors"), "C").unwrap(), 2);
        assert!(matches!(
            schema.index_of(Some("Reserves"), "A"),
            Err(Error::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_index_of_unqualified_takes_first() {
        let left = Schema::for_table("S", ["A", "B"]);
        let right = Schema::for_table("T", ["B", "C"]);
        let joined = left.join(&right).unwrap();
        assert_eq!(joined.index_of(None, "B").unwrap(), 1);
        assert_eq!(joined.index_of(Some("T"), "B").unwrap(), 2);
        assert!(joined.index_of(None, "Z").is_err());
    }

    #[test]
    fn test_index_of_ambiguous() {
        let schema = Schema::new_unchecked(vec![Column::new("S", "A"), Column::new("S", "A")]);
        assert!(matches!(
            schema.index_of(Some("S"), "A"),
            Err(Error::AmbiguousColumn { .. })
        ));
        // unqualified lookups still pick the first match
        assert_eq!(schema.index_of(None, "A").unwrap(), 0);
    }

    #[test]
    fn test_join_rejects_duplicates() {
        let schema = sailors();
        assert!(matches!(schema.join(&schema), Err(Error::DuplicateColumn { .. })));

        let aliased = schema.with_table("S");
        let joined = schema.join(&aliased).unwrap();
        assert_eq!(joined.len(), 6);
        assert_eq!(joined.tables(), vec!["Sailors", "S"]);
        assert_eq!(joined.to_string(), "Sailors.A, Sailors.B, Sailors.C, S.A, S.B, S.C");
    }

    #[test]
    fn test_has_table() {
        let schema = sailors().with_table("S");
        assert!(schema.has_table("S"));
        assert!(!schema.has_table("Sailors"));
    }
}
