//! Database facade.

use crate::config::DatabaseConfig;
use sluice_core::Result;
use sluice_query::executor::Operator;
use sluice_query::planner::QueryPlanner;
use sluice_query::sql;
use sluice_storage::Catalog;
use std::io;
use tracing::debug;

/// A directory of flat-file relations opened for querying.
///
/// Owns the catalog. Aliases introduced by one query stay registered for
/// later ones.
pub struct Database {
    config: DatabaseConfig,
    catalog: Catalog,
}

impl Database {
    /// Opens a database: loads the schema description into a fresh catalog.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        let mut catalog = Catalog::new(config.data_path());
        catalog.load_file(config.schema_path())?;
        Ok(Self { config, catalog })
    }

    /// Wraps an already populated catalog.
    pub fn with_catalog(config: DatabaseConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the catalog mutably, e.g. to register extra tables.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Parses and plans a query. The returned operator reads nothing until
    /// it is pulled.
    pub fn query(&mut self, text: &str) -> Result<Box<dyn Operator>> {
        debug!(query = text, "planning");
        let statement = sql::parse(text)?;
        QueryPlanner::new(&mut self.catalog).plan(&statement)
    }

    /// Runs a query and writes its result to `sink`, one tuple per line.
    /// Returns the number of tuples written.
    pub fn execute(&mut self, text: &str, sink: &mut dyn io::Write) -> Result<usize> {
        let mut plan = self.query(text)?;
        plan.dump(sink)
    }
}
