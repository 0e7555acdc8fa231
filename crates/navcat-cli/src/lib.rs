//! CLI library components for the navcat inspector.

pub mod logging;
pub mod report;
