//! Query executor module.
//!
//! Physical operators behind the pull-based [`Operator`] trait.

mod distinct;
pub mod join;
mod operator;
mod project;
mod scan;
mod select;
mod sort;
mod values;

pub use distinct::DuplicateEliminationExecutor;
pub use join::NestedLoopJoin;
pub use operator::{explain, Operator};
pub use project::ProjectExecutor;
pub use scan::TableScanExecutor;
pub use select::SelectExecutor;
pub use sort::SortExecutor;
pub use values::ValuesExecutor;
