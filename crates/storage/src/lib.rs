//! Sluice Storage - Catalog and flat-file relation storage.
//!
//! This crate provides the storage layer:
//!
//! - `Catalog`: Table name → (schema, data file) registry with one-level aliases
//! - `TupleReader`: Line-oriented reader decoding a relation file into tuples
//!
//! Relations are stored one file per table, one tuple per line, as
//! comma-separated integers with no header row.
//!
//! # Example
//!
//! ```rust
//! use sluice_storage::Catalog;
//!
//! let mut catalog = Catalog::new("/var/db/data");
//! catalog.load("Sailors A B C\nReserves G H\n".as_bytes()).unwrap();
//! catalog.register_alias("S", "Sailors");
//!
//! let schema = catalog.schema_for("S").unwrap();
//! assert_eq!(schema.to_string(), "S.A, S.B, S.C");
//! assert!(catalog.location_for("S").ends_with("Sailors"));
//! ```

mod catalog;
mod reader;

pub use catalog::{Catalog, TableEntry};
pub use reader::TupleReader;
