//! CLI library components for the AE standardization studio.

pub mod logging;
pub mod pipeline;
