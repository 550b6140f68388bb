//! Aggregation over the salary record set.

pub mod aggregator;
pub mod coerce;

pub use aggregator::*;
