//! In-memory model of a scaffold's `files/` subtree.
//!
//! The tree is read from disk once, at discovery time, into an ordered
//! list of entries. Instantiation then works purely against this model,
//! which keeps the rendering logic independent of live filesystem
//! traversal and lets tests drive it with hand-built trees.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// What a single tree entry is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntryKind {
    /// A directory (may be empty).
    Directory,
    /// A regular file with its raw template content.
    File { content: String },
}

/// One entry of a template's file tree, addressed relative to the tree root.
///
/// Both the `relative_path` and any file content may contain
/// `{{ placeholder }}` markers; both are rendered at instantiation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub relative_path: PathBuf,
    pub kind: TreeEntryKind,
}

/// An ordered file tree: parents always precede their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTree {
    entries: Vec<TreeEntry>,
}

impl TemplateTree {
    /// An empty tree. Populate with [`push_dir`](Self::push_dir) and
    /// [`push_file`](Self::push_file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directory entry.
    pub fn push_dir(&mut self, relative_path: impl Into<PathBuf>) {
        self.entries.push(TreeEntry {
            relative_path: relative_path.into(),
            kind: TreeEntryKind::Directory,
        });
    }

    /// Append a file entry with its template content.
    pub fn push_file(&mut self, relative_path: impl Into<PathBuf>, content: impl Into<String>) {
        self.entries.push(TreeEntry {
            relative_path: relative_path.into(),
            kind: TreeEntryKind::File {
                content: content.into(),
            },
        });
    }

    /// Load a tree from a directory on disk.
    ///
    /// Entries are collected depth-first with each directory's children
    /// sorted by name (`read_dir` order is platform-dependent), so the
    /// resulting order is deterministic and parent-before-child.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a directory cannot be read or a file is not
    /// valid UTF-8 text.
    pub fn from_dir(root: &Path) -> Result<Self> {
        let mut tree = Self::new();
        collect_entries(root, root, &mut tree)?;
        Ok(tree)
    }

    /// The entries in instantiation order.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn collect_entries(base: &Path, current: &Path, tree: &mut TemplateTree) -> Result<()> {
    let mut children: Vec<PathBuf> = std::fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    children.sort();

    for path in children {
        // base is a prefix of everything under it
        let relative = path.strip_prefix(base).map_err(anyhow::Error::from)?;
        if path.is_dir() {
            tree.push_dir(relative);
            collect_entries(base, &path, tree)?;
        } else {
            let content = std::fs::read_to_string(&path)?;
            tree.push_file(relative, content);
        }
    }
    Ok(())
}
