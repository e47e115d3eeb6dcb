//! FieldPlan scheduling engine - deterministic re-prioritization from
//! environmental signals.

#![warn(missing_docs)]

pub mod optimizer;

pub use optimizer::{optimize_schedule, OptimizeOutcome};
