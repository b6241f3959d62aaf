//! CLI library components for the association analyzer.

pub mod logging;
pub mod pipeline;
