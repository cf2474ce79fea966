//! Sluice Query - query engine for Sluice flat-file relations.
//!
//! This crate provides:
//!
//! - `ast`: closed statement and expression AST
//! - `sql`: SQL text to AST lowering
//! - `eval`: expression and predicate evaluation
//! - `executor`: pull-based physical operators (scan, select, project, join, sort, dedup)
//! - `planner`: SELECT statement to operator tree
//!
//! # Example
//!
//! ```
//! use sluice_query::executor::Operator;
//! use sluice_query::planner::QueryPlanner;
//! use sluice_storage::Catalog;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("Sailors"), "1,200,50\n2,200,200\n3,100,105\n").unwrap();
//! let mut catalog = Catalog::new(dir.path());
//! catalog.load("Sailors A B C\n".as_bytes()).unwrap();
//!
//! let stmt = sluice_query::sql::parse("SELECT A FROM Sailors WHERE B >= C").unwrap();
//! let mut plan = QueryPlanner::new(&mut catalog).plan(&stmt).unwrap();
//! let mut out = Vec::new();
//! assert_eq!(plan.dump(&mut out).unwrap(), 2);
//! assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
//! ```

pub mod ast;
pub mod eval;
pub mod executor;
pub mod planner;
pub mod sql;
