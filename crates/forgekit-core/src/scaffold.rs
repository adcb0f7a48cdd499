//! Project and component scaffolding: instantiating a template's file
//! tree into a target directory.
//!
//! Instantiation renders every relative path and every file body through
//! the strict renderer *before* touching the filesystem, so the first
//! missing variable aborts with nothing written. When the target does not
//! exist yet, the rendered tree is additionally staged into a sibling
//! temporary directory and promoted with a single rename, so an I/O
//! failure mid-write never leaves a half-built scaffold at the intended
//! destination. Re-instantiating into an existing target overwrites the
//! produced paths in place; with the same context this is idempotent and
//! byte-identical.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::definition::TemplateDefinition;
use crate::discover::{discover_templates, DiscoveryReport, TemplateIndex};
use crate::error::{ForgeError, Result};
use crate::metadata::TemplateKind;
use crate::render::{RenderContext, TemplateRenderer};
use crate::tree::{TemplateTree, TreeEntryKind};

/// One fully rendered tree entry, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    /// Rendered path, relative to the target directory.
    pub path: PathBuf,
    /// Rendered file body; `None` for directories.
    pub content: Option<String>,
}

/// Render an entire tree against a context without touching the filesystem.
///
/// Entries come back in the tree's parent-before-child order. Fails on the
/// first missing variable, on a non-UTF-8 source path, or when a rendered
/// path would escape the target (absolute, or containing `..`).
pub fn render_tree(
    tree: &TemplateTree,
    context: &RenderContext,
    renderer: &TemplateRenderer,
) -> Result<Vec<RenderedEntry>> {
    let mut rendered = Vec::with_capacity(tree.len());
    for entry in tree.entries() {
        let raw = entry.relative_path.to_str().ok_or_else(|| {
            ForgeError::Render(format!(
                "non-UTF-8 path in template tree: {}",
                entry.relative_path.display()
            ))
        })?;
        let path_str = renderer.render(raw, context)?;
        let path = PathBuf::from(&path_str);
        if path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ForgeError::Render(format!(
                "rendered path escapes the target directory: {path_str}"
            )));
        }
        let content = match &entry.kind {
            TreeEntryKind::Directory => None,
            TreeEntryKind::File { content } => Some(renderer.render(content, context)?),
        };
        rendered.push(RenderedEntry { path, content });
    }
    Ok(rendered)
}

/// Write rendered entries under `target`, returning the created paths in
/// write order. Existing files are overwritten.
fn write_entries(entries: &[RenderedEntry], target: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(target)?;
    let mut created = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = target.join(&entry.path);
        match &entry.content {
            None => std::fs::create_dir_all(&path)?,
            Some(content) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, content)?;
            }
        }
        created.push(path);
    }
    Ok(created)
}

/// Instantiate a definition's file tree into `target`.
///
/// Everything is rendered up front, so a substitution failure aborts the
/// whole operation before any path is created.
///
/// # Errors
///
/// [`ForgeError::InvalidDefinition`] if the definition is not a scaffold;
/// otherwise any rendering or I/O failure.
pub fn instantiate(
    definition: &TemplateDefinition,
    target: &Path,
    context: &RenderContext,
) -> Result<Vec<PathBuf>> {
    let tree = definition
        .tree()
        .ok_or_else(|| ForgeError::InvalidDefinition {
            path: PathBuf::from(definition.name()),
            reason: "definition has prompt content, not a file tree".to_string(),
        })?;
    let rendered = render_tree(tree, context, &TemplateRenderer::new())?;
    write_entries(&rendered, target)
}

/// Manages a library of scaffold templates rooted at one directory.
///
/// Single-owner by contract: `discover` is the only mutator, so concurrent
/// reads against a stable index are safe, but callers must serialize
/// discovery against readers themselves.
pub struct ScaffoldManager {
    root: PathBuf,
    index: TemplateIndex,
    renderer: TemplateRenderer,
}

impl ScaffoldManager {
    /// Create a manager for the given template root. The index starts
    /// empty; call [`discover`](Self::discover) to populate it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: TemplateIndex::new(),
            renderer: TemplateRenderer::new(),
        }
    }

    /// Rebuild the index from the template root.
    pub fn discover(&mut self) -> Result<DiscoveryReport> {
        let (index, report) = discover_templates(&self.root)?;
        info!(
            root = %self.root.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "template discovery complete"
        );
        self.index = index;
        Ok(report)
    }

    /// Template names in discovery order, optionally filtered by kind.
    pub fn list(&self, kind: Option<TemplateKind>) -> Vec<String> {
        match kind {
            Some(kind) => self.index.names_by_kind(kind).to_vec(),
            None => self.index.names().to_vec(),
        }
    }

    /// Look up a template by name. Absent is not an error.
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.index.get(name)
    }

    /// Instantiate the named template into `target`.
    ///
    /// If `target` does not exist, the rendered tree is staged into a
    /// temporary sibling directory and promoted with one rename; an
    /// interrupted instantiation then leaves nothing at `target`. If
    /// `target` exists, entries are written into it directly, overwriting
    /// any paths the instantiation also produces.
    ///
    /// # Errors
    ///
    /// [`ForgeError::TemplateNotFound`] for an unknown name, plus any
    /// rendering or I/O failure.
    pub fn instantiate(
        &self,
        name: &str,
        target: &Path,
        context: &RenderContext,
    ) -> Result<Vec<PathBuf>> {
        let definition = self
            .index
            .get(name)
            .ok_or_else(|| ForgeError::TemplateNotFound(name.to_string()))?;
        let tree = definition
            .tree()
            .ok_or_else(|| ForgeError::InvalidDefinition {
                path: self.root.join(name),
                reason: "definition has prompt content, not a file tree".to_string(),
            })?;

        let rendered = render_tree(tree, context, &self.renderer)?;

        if target.exists() {
            debug!(template = name, target = %target.display(), "writing into existing target");
            return write_entries(&rendered, target);
        }

        // Fresh target: stage next to it (same filesystem, so the promote
        // rename cannot cross devices), then promote atomically.
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;
        let staging = tempfile::Builder::new()
            .prefix(".forgekit-stage-")
            .tempdir_in(parent)?;
        write_entries(&rendered, staging.path())?;
        std::fs::rename(staging.path(), target)?;
        // The staged directory was moved away; dropping the TempDir would
        // try to delete the old path, so dismiss it explicitly.
        let _ = staging.close();

        debug!(template = name, target = %target.display(), "scaffold promoted");
        Ok(rendered.iter().map(|e| target.join(&e.path)).collect())
    }
}

impl std::fmt::Debug for ScaffoldManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaffoldManager")
            .field("root", &self.root)
            .field("templates", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::metadata::TemplateMetadata;

    fn ctx(pairs: &[(&str, &str)]) -> RenderContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn widget_definition() -> TemplateDefinition {
        let metadata = TemplateMetadata::new(
            "py-component",
            "Python component",
            TemplateKind::Component,
            "0.1.0",
        )
        .unwrap();
        let mut tree = TemplateTree::new();
        tree.push_dir("src");
        tree.push_file("src/{{ component_name }}.py", "class {{ component_name }}:\n    pass\n");
        tree.push_file("README.md", "# {{ component_name }}\n");
        TemplateDefinition::scaffold(metadata, tree)
    }

    #[test]
    fn test_instantiate_renders_paths_and_bodies() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let created = instantiate(
            &widget_definition(),
            &target,
            &ctx(&[("component_name", "Widget")]),
        )
        .unwrap();

        assert_eq!(created.len(), 3);
        let body = fs::read_to_string(target.join("src/Widget.py")).unwrap();
        assert!(body.contains("class Widget:"));
        assert_eq!(
            fs::read_to_string(target.join("README.md")).unwrap(),
            "# Widget\n"
        );
    }

    #[test]
    fn test_missing_variable_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let err = instantiate(&widget_definition(), &target, &RenderContext::new()).unwrap_err();
        assert!(matches!(err, ForgeError::MissingVariable { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_reinstantiation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let context = ctx(&[("component_name", "Widget")]);

        instantiate(&widget_definition(), &target, &context).unwrap();
        let first = fs::read_to_string(target.join("src/Widget.py")).unwrap();
        instantiate(&widget_definition(), &target, &context).unwrap();
        let second = fs::read_to_string(target.join("src/Widget.py")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rendered_path_cannot_escape_target() {
        let metadata =
            TemplateMetadata::new("evil", "path escape", TemplateKind::Component, "0.1.0")
                .unwrap();
        let mut tree = TemplateTree::new();
        tree.push_file("{{ name }}.txt", "x");
        let def = TemplateDefinition::scaffold(metadata, tree);

        let dir = tempfile::tempdir().unwrap();
        let err = instantiate(&def, &dir.path().join("out"), &ctx(&[("name", "../escape")]))
            .unwrap_err();
        assert!(matches!(err, ForgeError::Render(_)));
    }

    #[test]
    fn test_manager_discover_and_instantiate() {
        let root = tempfile::tempdir().unwrap();
        let tpl = root.path().join("py-api");
        fs::create_dir_all(tpl.join("files/{{ project_name }}")).unwrap();
        fs::write(
            tpl.join("template.json"),
            r#"{"name": "py-api", "description": "API skeleton", "category": "project", "version": "0.1.0"}"#,
        )
        .unwrap();
        fs::write(
            tpl.join("files/{{ project_name }}/app.py"),
            "APP = '{{ project_name }}'\n",
        )
        .unwrap();

        let mut manager = ScaffoldManager::new(root.path());
        let report = manager.discover().unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(manager.list(None), ["py-api"]);
        assert_eq!(manager.list(Some(TemplateKind::Component)), Vec::<String>::new());

        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("scaffolded");
        manager
            .instantiate("py-api", &target, &ctx(&[("project_name", "demo")]))
            .unwrap();
        assert_eq!(
            fs::read_to_string(target.join("demo/app.py")).unwrap(),
            "APP = 'demo'\n"
        );
        // No staging leftovers next to the target
        let siblings: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
        assert_eq!(siblings.len(), 1);
    }

    #[test]
    fn test_manager_unknown_template() {
        let root = tempfile::tempdir().unwrap();
        let mut manager = ScaffoldManager::new(root.path());
        manager.discover().unwrap();

        let err = manager
            .instantiate("nonexistent", &root.path().join("out"), &RenderContext::new())
            .unwrap_err();
        assert!(matches!(err, ForgeError::TemplateNotFound(_)));
    }
}
