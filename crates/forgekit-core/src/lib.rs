//! Core library for forgekit, the template & prompt rendering engine.
//!
//! Provides the shared metadata model, strict `{{ variable }}` rendering,
//! discovery/indexing of template and prompt definitions, recursive
//! file-tree scaffolding, and the prompt library with its persistence
//! round trip. The CLI in `forgekit-cli` is a thin consumer of the four
//! manager-level operations: discover, list, get/render, instantiate/save.

pub mod config;
pub mod definition;
pub mod discover;
pub mod error;
pub mod metadata;
pub mod prompts;
pub mod render;
pub mod scaffold;
pub mod tree;

pub use config::ForgeConfig;
pub use definition::{PromptRecord, TemplateContent, TemplateDefinition};
pub use discover::{DiscoveryReport, SkippedEntry, TemplateIndex};
pub use error::{ForgeError, Result};
pub use metadata::{TemplateKind, TemplateMetadata};
pub use prompts::PromptLibrary;
pub use render::{RenderContext, TemplateRenderer};
pub use scaffold::ScaffoldManager;
pub use tree::{TemplateTree, TreeEntry, TreeEntryKind};
