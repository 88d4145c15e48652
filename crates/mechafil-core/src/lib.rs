// Core modules
pub mod config;
pub mod error;
pub mod template;
pub mod upstream;

// Re-export commonly used types
pub use error::{MechafilError, Result};
