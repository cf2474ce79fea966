//! Table scan executor.

use crate::executor::Operator;
use sluice_core::schema::Schema;
use sluice_core::{Result, Tuple};
use sluice_storage::{Catalog, TupleReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Table scan executor - reads a relation file one tuple per line.
///
/// The file is opened on the first pull. `reset` drops the reader and opens
/// the file again.
pub struct TableScanExecutor {
    /// Real table name.
    table: String,
    /// Name the columns are qualified by (alias or table name).
    qualifier: String,
    schema: Schema,
    path: PathBuf,
    reader: Option<TupleReader>,
}

impl TableScanExecutor {
    /// Creates a scan over a table or alias registered in `catalog`.
    pub fn new(catalog: &Catalog, name: &str) -> Result<Self> {
        let schema = catalog.schema_for(name)?;
        Ok(Self {
            table: catalog.resolve(name).to_string(),
            qualifier: name.to_string(),
            schema,
            path: catalog.location_for(name),
            reader: None,
        })
    }

    /// Creates a scan over an explicit file, bypassing the catalog.
    pub fn with_location(table: impl Into<String>, schema: Schema, path: impl Into<PathBuf>) -> Self {
        let table = table.into();
        Self {
            qualifier: table.clone(),
            table,
            schema,
            path: path.into(),
            reader: None,
        }
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<TupleReader> {
        debug!(table = %self.table, path = %self.path.display(), "scan open");
        Ok(TupleReader::open(&self.path)?.with_arity(self.schema.len()))
    }
}

impl Operator for TableScanExecutor {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> Result<Option<Tuple>> {
        if self.reader.is_none() {
            self.reader = Some(self.open()?);
        }
        match &mut self.reader {
            Some(reader) => reader.next_tuple(),
            None => Ok(None),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.reader = None;
        self.reader = Some(self.open()?);
        Ok(())
    }

    fn label(&self) -> String {
        if self.qualifier == self.table {
            format!("TableScan {}", self.table)
        } else {
            format!("TableScan {} AS {}", self.table, self.qualifier)
        }
    }
}
