//! Join executors.

mod nested;

pub use nested::NestedLoopJoin;
