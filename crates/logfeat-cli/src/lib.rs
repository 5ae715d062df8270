//! CLI library components for the log feature pipeline.

pub mod logging;
pub mod pipeline;
