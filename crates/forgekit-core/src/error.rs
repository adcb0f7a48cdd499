//! Unified error types for the forgekit engine.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during forgekit operations.
#[derive(Error, Debug)]
pub enum ForgeError {
    // --- Configuration ---

    /// The configuration file (`forgekit.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Definitions ---

    /// No scaffold template with this name exists in the index.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// No prompt with this name exists in the index.
    #[error("prompt not found: {0}")]
    PromptNotFound(String),

    /// A definition on disk is structurally unusable for the requested
    /// operation (wrong content kind, missing `files/` subtree, ...).
    #[error("invalid definition at {path}: {reason}")]
    InvalidDefinition { path: PathBuf, reason: String },

    /// A definition failed the advisory completeness check and the caller
    /// chose to reject it. Carries every individual failure.
    #[error("validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    // --- Resources ---

    /// A referenced resource file does not exist.
    #[error("resource not found: {0}")]
    ResourceMissing(PathBuf),

    // --- Rendering ---

    /// A `{{ placeholder }}` in the template had no matching context entry.
    /// The single most common, user-actionable failure, so it carries the
    /// offending variable name rather than folding into a generic error.
    #[error("missing variable '{variable}' in render context")]
    MissingVariable { variable: String },

    /// The template engine rejected the template (syntax error or other
    /// non-variable rendering failure).
    #[error("template rendering failed: {0}")]
    Render(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, ForgeError>`.
pub type Result<T> = std::result::Result<T, ForgeError>;
