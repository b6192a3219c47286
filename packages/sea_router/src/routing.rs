//! The three path engines, the instrumentation which times them and the
//! comparison of their results

pub mod astar;
pub mod bellman_ford;
pub mod common;
pub mod comparator;
pub mod dijkstra;
pub mod instrument;
pub mod query;
pub mod structs;
