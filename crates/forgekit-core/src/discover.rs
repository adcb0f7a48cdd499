//! Definition discovery and the in-memory index.
//!
//! Discovery walks a library root, loads metadata and content for every
//! definition it recognizes, and builds a [`TemplateIndex`]. A malformed
//! entry is never fatal: it is skipped, logged, and reported through the
//! [`DiscoveryReport`], so one poison-pill definition cannot block the
//! rest of the library. Discovery is read-only and idempotent.
//!
//! Two layouts are recognized:
//! - **scaffolds**: each immediate child directory of the root containing a
//!   `template.json` descriptor plus a `files/` subtree;
//! - **prompts**: every `*.json` file under the root (recursively), holding
//!   a `{ "metadata": ..., "content": ... }` record.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::definition::{PromptRecord, TemplateDefinition};
use crate::error::{ForgeError, Result};
use crate::metadata::{TemplateKind, TemplateMetadata};
use crate::tree::TemplateTree;

/// Descriptor file name inside a scaffold template directory.
pub const TEMPLATE_DESCRIPTOR: &str = "template.json";

/// Subdirectory holding a scaffold's templated file tree.
pub const FILES_DIR: &str = "files";

/// One discovery candidate that could not be loaded.
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome summary of one discovery pass.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Number of definitions loaded into the index.
    pub loaded: usize,
    /// Candidates that were skipped, with the reason for each.
    pub skipped: Vec<SkippedEntry>,
}

impl DiscoveryReport {
    fn skip(&mut self, path: &Path, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(path = %path.display(), %reason, "skipping definition");
        self.skipped.push(SkippedEntry {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Name and category lookup structure over loaded definitions.
///
/// Rebuilt wholesale by each discovery pass; the only point mutation is
/// [`insert`](Self::insert), used by the prompt library's save path.
#[derive(Debug, Clone, Default)]
pub struct TemplateIndex {
    by_name: HashMap<String, TemplateDefinition>,
    by_kind: BTreeMap<TemplateKind, Vec<String>>,
    order: Vec<String>,
}

impl TemplateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, overwriting any previous one with the same name.
    ///
    /// A new name is appended to the discovery order; an overwritten name
    /// keeps its original position.
    pub fn insert(&mut self, definition: TemplateDefinition) {
        let name = definition.name().to_string();
        let kind = definition.kind();
        match self.by_name.insert(name.clone(), definition) {
            Some(previous) => {
                if previous.kind() != kind {
                    if let Some(names) = self.by_kind.get_mut(&previous.kind()) {
                        names.retain(|n| n != &name);
                    }
                    self.by_kind.entry(kind).or_default().push(name);
                }
            }
            None => {
                self.order.push(name.clone());
                self.by_kind.entry(kind).or_default().push(name);
            }
        }
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All names in discovery order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Names indexed under one kind, in discovery order.
    pub fn names_by_kind(&self, kind: TemplateKind) -> &[String] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Discover scaffold templates under `root`.
///
/// Each immediate child directory is a candidate; it must contain a
/// `template.json` descriptor and a `files/` subtree. Name collisions keep
/// the later-discovered definition (children are visited in sorted order,
/// so walk order is deterministic).
///
/// # Errors
///
/// Only an unreadable `root` itself is an error; per-candidate failures
/// land in the report.
pub fn discover_templates(root: &Path) -> Result<(TemplateIndex, DiscoveryReport)> {
    let mut index = TemplateIndex::new();
    let mut report = DiscoveryReport::default();

    for path in sorted_children(root)? {
        if !path.is_dir() {
            continue;
        }
        match load_scaffold(&path) {
            Ok(definition) => {
                debug!(name = definition.name(), path = %path.display(), "loaded template");
                index.insert(definition);
                report.loaded += 1;
            }
            Err(e) => report.skip(&path, e.to_string()),
        }
    }

    Ok((index, report))
}

/// Discover prompt definitions under `root`, recursively.
///
/// Every `*.json` file is a candidate. Directory grouping is free-form;
/// the category comes from the metadata, not from the path.
///
/// # Errors
///
/// Only an unreadable directory is an error; per-candidate failures land
/// in the report.
pub fn discover_prompts(root: &Path) -> Result<(TemplateIndex, DiscoveryReport)> {
    let mut index = TemplateIndex::new();
    let mut report = DiscoveryReport::default();
    discover_prompts_recursive(root, &mut index, &mut report)?;
    Ok((index, report))
}

fn discover_prompts_recursive(
    dir: &Path,
    index: &mut TemplateIndex,
    report: &mut DiscoveryReport,
) -> Result<()> {
    for path in sorted_children(dir)? {
        if path.is_dir() {
            discover_prompts_recursive(&path, index, report)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("json") {
            match load_prompt(&path) {
                Ok(definition) => {
                    debug!(name = definition.name(), path = %path.display(), "loaded prompt");
                    index.insert(definition);
                    report.loaded += 1;
                }
                Err(e) => report.skip(&path, e.to_string()),
            }
        }
    }
    Ok(())
}

/// Load one scaffold template directory into a definition.
pub fn load_scaffold(dir: &Path) -> Result<TemplateDefinition> {
    let descriptor = dir.join(TEMPLATE_DESCRIPTOR);
    let contents = std::fs::read_to_string(&descriptor).map_err(|e| {
        ForgeError::InvalidDefinition {
            path: dir.to_path_buf(),
            reason: format!("missing {TEMPLATE_DESCRIPTOR}: {e}"),
        }
    })?;
    let metadata: TemplateMetadata =
        serde_json::from_str(&contents).map_err(|e| ForgeError::InvalidDefinition {
            path: descriptor.clone(),
            reason: format!("invalid metadata: {e}"),
        })?;
    if metadata.name.trim().is_empty() {
        return Err(ForgeError::InvalidDefinition {
            path: descriptor,
            reason: "metadata name is empty".to_string(),
        });
    }

    let files_dir = dir.join(FILES_DIR);
    if !files_dir.is_dir() {
        return Err(ForgeError::InvalidDefinition {
            path: dir.to_path_buf(),
            reason: format!("missing {FILES_DIR}/ subtree"),
        });
    }
    let tree = TemplateTree::from_dir(&files_dir)?;

    Ok(TemplateDefinition::scaffold(metadata, tree))
}

/// Load one prompt definition file.
pub fn load_prompt(path: &Path) -> Result<TemplateDefinition> {
    let contents = std::fs::read_to_string(path)?;
    let record: PromptRecord =
        serde_json::from_str(&contents).map_err(|e| ForgeError::InvalidDefinition {
            path: path.to_path_buf(),
            reason: format!("invalid prompt record: {e}"),
        })?;
    if record.metadata.name.trim().is_empty() {
        return Err(ForgeError::InvalidDefinition {
            path: path.to_path_buf(),
            reason: "metadata name is empty".to_string(),
        });
    }
    Ok(record.into_definition())
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    children.sort();
    Ok(children)
}
