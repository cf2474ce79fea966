//! Sluice Core - Core types for the Sluice query engine.
//!
//! This crate provides the foundational types shared by every other crate:
//!
//! - `Tuple`: An immutable, fixed-arity sequence of integer values
//! - `schema`: Ordered column descriptors (`Column`, `Schema`)
//! - `Error`: Error types for planning and execution, classified by `ErrorKind`
//!
//! # Example
//!
//! ```rust
//! use sluice_core::Tuple;
//! use sluice_core::schema::Schema;
//!
//! let schema = Schema::for_table("Sailors", ["A", "B", "C"]);
//! let tuple: Tuple = "1,200,50".parse().unwrap();
//!
//! let idx = schema.index_of(Some("Sailors"), "B").unwrap();
//! assert_eq!(tuple.get(idx), Some(200));
//! assert_eq!(tuple.to_string(), "1,200,50");
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod schema;
mod tuple;

pub use error::{Error, ErrorKind, Result};
pub use tuple::Tuple;
