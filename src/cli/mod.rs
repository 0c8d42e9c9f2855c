//! CLI command implementations for the glimpse binary.

pub mod analyze_cmd;
pub mod models_cmd;
