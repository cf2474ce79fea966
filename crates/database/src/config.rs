//! Database configuration.

use std::path::{Path, PathBuf};

/// Default name of the schema description file.
pub const DEFAULT_SCHEMA_FILE: &str = "schema.txt";
/// Default name of the directory holding table data files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Where a database lives on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    root: PathBuf,
    schema_file: PathBuf,
    data_dir: PathBuf,
}

impl DatabaseConfig {
    /// Creates a configuration rooted at `root` with the default layout
    /// (`schema.txt` and `data/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            schema_file: PathBuf::from(DEFAULT_SCHEMA_FILE),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    /// Sets the schema file, relative to the root unless absolute.
    pub fn schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_file = path.into();
        self
    }

    /// Sets the data directory, relative to the root unless absolute.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the resolved schema file path.
    pub fn schema_path(&self) -> PathBuf {
        self.root.join(&self.schema_file)
    }

    /// Returns the resolved data directory path.
    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }
}
