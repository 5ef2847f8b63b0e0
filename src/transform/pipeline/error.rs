//! Pipeline error types.

use std::path::PathBuf;

/// Errors that can occur while transforming an index document.
///
/// Every variant aborts the run before anything is written.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("document has no element matching '{anchor}'")]
    Structure { anchor: String },

    #[error("cannot pair {blocks} metadata block(s) with {tag_sets} tag set(s): {detail}")]
    Alignment {
        blocks: usize,
        tag_sets: usize,
        detail: String,
    },

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Create an error for a missing anchor element.
    pub fn structure(anchor: impl Into<String>) -> Self {
        Self::Structure {
            anchor: anchor.into(),
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
