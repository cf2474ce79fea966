//! Sluice Database - entry point for querying a directory of flat files.
//!
//! A database directory holds a schema description and one data file per
//! table:
//!
//! ```text
//! db/
//!   schema.txt      Sailors A B C
//!                   Reserves G H
//!   data/
//!     Sailors       1,200,50
//!     Reserves      1,101
//! ```
//!
//! # Example
//!
//! ```
//! use sluice_database::{Database, DatabaseConfig};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("schema.txt"), "Sailors A B C\n").unwrap();
//! std::fs::create_dir(dir.path().join("data")).unwrap();
//! std::fs::write(dir.path().join("data/Sailors"), "1,200,50\n2,200,200\n3,100,105\n").unwrap();
//!
//! let mut db = Database::open(DatabaseConfig::new(dir.path())).unwrap();
//! let mut out = Vec::new();
//! let count = db
//!     .execute("SELECT Sailors.A FROM Sailors WHERE Sailors.B >= Sailors.C", &mut out)
//!     .unwrap();
//! assert_eq!(count, 2);
//! assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
//! ```

mod config;
mod database;

pub use config::DatabaseConfig;
pub use database::Database;

pub use sluice_core::{Error, ErrorKind, Result, Tuple};
pub use sluice_query::executor::Operator;
