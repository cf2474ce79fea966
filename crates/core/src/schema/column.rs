//! Column descriptor for Sluice schemas.

use alloc::string::String;
use core::fmt;

/// A column of an operator's output, identified by its owning table (or
/// alias) and its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Column {
    /// Table name or alias that qualifies this column.
    table: String,
    /// Column name.
    name: String,
}

impl Column {
    /// Creates a new column descriptor.
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
        }
    }

    /// Returns the table qualifier.
    #[inline]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this column owned by another qualifier.
    pub fn with_table(&self, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: self.name.clone(),
        }
    }

    /// Returns true if this column answers to the given reference.
    /// An unqualified reference matches on name alone.
    pub fn matches(&self, table: Option<&str>, name: &str) -> bool {
        self.name == name && table.map_or(true, |t| t == self.table)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}
