//! Configuration loading and types for tagpress.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading and validating configs from files and the environment (`load`)

mod load;
mod types;

pub use types::{ScriptTarget, SidebarConfig, TagAlignment, TagpressConfig, TagsConfig, WriteMode};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("invalid selector for '{key}': {selector}")]
    InvalidSelector { key: &'static str, selector: String },

    #[error("{0}")]
    Validation(String),
}
