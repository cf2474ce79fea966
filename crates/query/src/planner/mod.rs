//! Query planner module.

mod conjunct;
mod query_planner;

pub use conjunct::{classify, referenced_tables, split_conjuncts, FromTable, Placement};
pub use query_planner::QueryPlanner;
