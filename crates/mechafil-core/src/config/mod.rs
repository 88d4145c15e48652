//! Configuration: defaults, `mechafil.toml` and environment overrides

pub mod consts;
pub mod model;

pub use model::{Config, PromptConfig, UpstreamConfig, default_template};
