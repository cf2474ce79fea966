//! Catalog for Sluice.
//!
//! The `Catalog` maps table names to their schema and data file, and keeps a
//! one-level alias table filled in while FROM clauses are planned. It is an
//! explicit handle: the plan builder borrows it mutably to register aliases,
//! scans borrow it immutably to look up schemas and locations.

use hashbrown::HashMap;
use sluice_core::schema::{Column, Schema};
use sluice_core::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A registered table.
#[derive(Clone, Debug)]
pub struct TableEntry {
    /// Schema with every column qualified by the real table name.
    schema: Schema,
    /// Explicit data file, overriding `<data_dir>/<table>`.
    location: Option<PathBuf>,
}

impl TableEntry {
    /// Returns the table schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// Registry of tables, their storage locations and FROM-clause aliases.
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Directory holding one data file per table.
    data_dir: PathBuf,
    /// Table name → entry.
    tables: HashMap<String, TableEntry>,
    /// Alias → real table name.
    aliases: HashMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog whose tables live under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Returns the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads a schema description, one table per line:
    /// `TableName col1 col2 ...`. Blank lines are skipped.
    ///
    /// Returns the number of tables registered.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut count = 0;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::invalid_schema(e.to_string()))?;
            let mut tokens = line.split_whitespace();
            let Some(table) = tokens.next() else {
                continue;
            };
            let columns: Vec<&str> = tokens.collect();
            if columns.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "line {}: table {} has no columns",
                    line_no + 1,
                    table
                )));
            }
            self.register_table(table, columns)?;
            count += 1;
        }
        info!(tables = count, data_dir = %self.data_dir.display(), "catalog loaded");
        Ok(count)
    }

    /// Loads a schema description file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path.display().to_string(), e.to_string()))?;
        self.load(BufReader::new(file))
    }

    /// Registers a table stored at `<data_dir>/<name>`.
    pub fn register_table<I, S>(&mut self, name: &str, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_table(name, columns, None)
    }

    /// Registers a table stored at an explicit location.
    pub fn register_table_at<I, S>(&mut self, name: &str, columns: I, location: impl Into<PathBuf>) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_table(name, columns, Some(location.into()))
    }

    fn insert_table<I, S>(&mut self, name: &str, columns: I, location: Option<PathBuf>) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.tables.contains_key(name) {
            return Err(Error::invalid_schema(format!("Table already exists: {}", name)));
        }
        let schema = Schema::new(columns.into_iter().map(|c| Column::new(name, c)).collect())?;
        self.tables.insert(name.to_string(), TableEntry { schema, location });
        Ok(())
    }

    /// Maps `alias` to `table`. Re-registering overwrites; aliases of
    /// aliases are not followed.
    pub fn register_alias(&mut self, alias: &str, table: &str) {
        debug!(alias, table, "alias registered");
        self.aliases.insert(alias.to_string(), table.to_string());
    }

    /// Resolves an alias to its table name. Unmapped names resolve to
    /// themselves.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Checks if a name or alias resolves to a registered table.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(self.resolve(name))
    }

    /// Returns the entry for a name or alias.
    pub fn get_table(&self, name: &str) -> Option<&TableEntry> {
        self.tables.get(self.resolve(name))
    }

    /// Returns all registered table names, sorted.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the schema for a name or alias, with columns qualified by
    /// `name` as written (so an alias yields alias-qualified columns).
    pub fn schema_for(&self, name: &str) -> Result<Schema> {
        let resolved = self.resolve(name);
        let entry = self
            .tables
            .get(resolved)
            .ok_or_else(|| Error::table_not_found(resolved))?;
        Ok(entry.schema.with_table(name))
    }

    /// Returns the data file for a name or alias. This never fails; a
    /// missing file surfaces when a scan opens it.
    pub fn location_for(&self, name: &str) -> PathBuf {
        let resolved = self.resolve(name);
        match self.tables.get(resolved).and_then(|e| e.location.clone()) {
            Some(location) => location,
            None => self.data_dir.join(resolved),
        }
    }
}
