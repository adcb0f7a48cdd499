//! Prompt library: discovery, lookup, rendering, and persistence of
//! prompt definitions.
//!
//! A library is rooted at one directory of JSON prompt records. The index
//! is rebuilt wholesale by [`discover`](PromptLibrary::discover);
//! [`save`](PromptLibrary::save) is the single exception that also
//! point-updates the in-memory index, so a freshly saved prompt is
//! immediately visible to `get`/`render` without a new discovery pass.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::definition::{PromptRecord, TemplateDefinition};
use crate::discover::{discover_prompts, DiscoveryReport, TemplateIndex};
use crate::error::{ForgeError, Result};
use crate::metadata::TemplateKind;
use crate::render::{RenderContext, TemplateRenderer};

/// Manages a library of prompt definitions rooted at one directory.
///
/// `discover` and `save` are the only mutators; readers of a stable index
/// are safe to share, but mutation must be serialized by the owner.
pub struct PromptLibrary {
    root: PathBuf,
    index: TemplateIndex,
    renderer: TemplateRenderer,
}

impl PromptLibrary {
    /// Create a library for the given prompt root. The index starts empty;
    /// call [`discover`](Self::discover) to populate it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: TemplateIndex::new(),
            renderer: TemplateRenderer::new(),
        }
    }

    /// Rebuild the index from the prompt root.
    pub fn discover(&mut self) -> Result<DiscoveryReport> {
        let (index, report) = discover_prompts(&self.root)?;
        info!(
            root = %self.root.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "prompt discovery complete"
        );
        self.index = index;
        Ok(report)
    }

    /// Prompt names in discovery order, optionally filtered by category.
    pub fn list(&self, kind: Option<TemplateKind>) -> Vec<String> {
        match kind {
            Some(kind) => self.index.names_by_kind(kind).to_vec(),
            None => self.index.names().to_vec(),
        }
    }

    /// Look up a prompt by name. Absent is not an error.
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.index.get(name)
    }

    /// Render the named prompt against a context.
    ///
    /// # Errors
    ///
    /// [`ForgeError::PromptNotFound`] for an unknown name;
    /// [`ForgeError::MissingVariable`] when the content references a
    /// variable the context does not supply.
    pub fn render(&self, name: &str, context: &RenderContext) -> Result<String> {
        let definition = self
            .index
            .get(name)
            .ok_or_else(|| ForgeError::PromptNotFound(name.to_string()))?;
        let content = definition
            .prompt_content()
            .ok_or_else(|| ForgeError::InvalidDefinition {
                path: self.root.join(name),
                reason: "definition has a file tree, not prompt content".to_string(),
            })?;
        self.renderer.render(content, context)
    }

    /// Persist a prompt definition under the library root and insert it
    /// into the in-memory index.
    ///
    /// The file location is derived from the name as `<root>/<name>.json`;
    /// `/`-separated names land in subdirectories, which are created as
    /// needed. Re-saving an existing name overwrites the file in place and
    /// replaces the indexed definition. Returns the written path.
    ///
    /// # Errors
    ///
    /// [`ForgeError::InvalidDefinition`] if the definition carries a file
    /// tree instead of prompt content; otherwise any I/O failure.
    pub fn save(&mut self, definition: &TemplateDefinition) -> Result<PathBuf> {
        let content = definition
            .prompt_content()
            .ok_or_else(|| ForgeError::InvalidDefinition {
                path: self.root.join(definition.name()),
                reason: "only prompt definitions can be saved to a prompt library".to_string(),
            })?;

        let record = PromptRecord {
            metadata: definition.metadata.clone(),
            content: content.to_string(),
        };
        let path = self.root.join(format!("{}.json", definition.name()));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&record).map_err(anyhow::Error::from)?;
        std::fs::write(&path, json)?;

        self.index.insert(definition.clone());
        debug!(name = definition.name(), path = %path.display(), "prompt saved");
        Ok(path)
    }
}

impl std::fmt::Debug for PromptLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptLibrary")
            .field("root", &self.root)
            .field("prompts", &self.index.len())
            .finish()
    }
}
