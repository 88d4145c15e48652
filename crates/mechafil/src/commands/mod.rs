//! CLI command implementations

pub mod doctor;
pub mod mcp;
pub mod prompt;
