//! Template and prompt metadata: the shared descriptor model.
//!
//! Every definition in a library, whether a scaffold template or a prompt,
//! carries a [`TemplateMetadata`] record describing what it is, who wrote
//! it, and which variables its content expects. Metadata is a plain value
//! type; the richer per-kind completeness check lives in
//! [`validation_errors`](TemplateMetadata::validation_errors) and is
//! advisory, so callers decide whether an incomplete definition is fatal.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// Category of a definition.
///
/// Scaffolds use [`Project`](Self::Project) / [`Component`](Self::Component);
/// prompts use the fixed [`System`](Self::System) / [`User`](Self::User) /
/// [`Developer`](Self::Developer) set. The enum is closed on purpose: index
/// lookups stay exhaustive and a typo in a definition file is a parse
/// error, not a silent new category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// A full project skeleton.
    Project,
    /// A reusable component dropped into an existing project.
    Component,
    /// A system prompt fragment.
    System,
    /// A user prompt fragment.
    User,
    /// A developer prompt fragment.
    Developer,
}

impl TemplateKind {
    /// All kinds, in serialization-tag order.
    pub const ALL: [TemplateKind; 5] = [
        TemplateKind::Project,
        TemplateKind::Component,
        TemplateKind::System,
        TemplateKind::User,
        TemplateKind::Developer,
    ];

    /// The lower-case serialized tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Component => "component",
            Self::System => "system",
            Self::User => "user",
            Self::Developer => "developer",
        }
    }

    /// Resolve a kind by its lower-case tag.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "project" => Some(Self::Project),
            "component" => Some(Self::Component),
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "developer" => Some(Self::Developer),
            _ => None,
        }
    }

    /// Whether this kind denotes a prompt (as opposed to a scaffold).
    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::System | Self::User | Self::Developer)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable descriptor for a template or prompt definition.
///
/// `variables` declares the full variable contract of the content: a
/// mapping from variable name to a human-readable description. A variable
/// absent from the map may still appear in content, but presence here is
/// what documentation and validation tooling key off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Definition name, unique within its kind. Never empty.
    pub name: String,
    /// One-line human description.
    pub description: String,
    /// Category, serialized as its lower-case tag.
    #[serde(rename = "category")]
    pub kind: TemplateKind,
    /// Free-form semver-like version string.
    #[serde(default)]
    pub version: String,
    /// Author, if known.
    #[serde(default)]
    pub author: Option<String>,
    /// Classification tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Declared variable contract: name → description.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl TemplateMetadata {
    /// Create metadata with the required scalar fields.
    ///
    /// Author, tags, and variables start empty; use the `with_*` helpers
    /// to fill them in.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Validation`] if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: TemplateKind,
        version: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ForgeError::Validation {
                errors: vec!["name must not be empty".to_string()],
            });
        }
        Ok(Self {
            name,
            description: description.into(),
            kind,
            version: version.into(),
            author: None,
            tags: BTreeSet::new(),
            variables: BTreeMap::new(),
        })
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Add a classification tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Declare a variable with its human-readable description.
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.variables.insert(name.into(), description.into());
        self
    }

    /// Per-kind completeness check; returns every failure found.
    ///
    /// Prompt kinds require a version, an author, at least one tag, and at
    /// least one declared variable. Scaffold kinds only require a name.
    /// This never fails: an incomplete definition is reported, and the
    /// caller decides whether to reject it.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("name must not be empty".to_string());
        }
        if self.kind.is_prompt() {
            if self.version.trim().is_empty() {
                errors.push("prompt metadata requires a version".to_string());
            }
            match &self.author {
                Some(a) if !a.trim().is_empty() => {}
                _ => errors.push("prompt metadata requires an author".to_string()),
            }
            if self.tags.is_empty() {
                errors.push("prompt metadata requires at least one tag".to_string());
            }
            if self.variables.is_empty() {
                errors.push("prompt metadata requires at least one declared variable".to_string());
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt_metadata() -> TemplateMetadata {
        TemplateMetadata::new("greeting", "A friendly greeting", TemplateKind::System, "1.0.0")
            .unwrap()
            .with_author("forgekit contributors")
            .with_tag("demo")
            .with_variable("name", "Who to greet")
    }

    #[test]
    fn test_kind_tag_roundtrip() {
        for kind in TemplateKind::ALL {
            assert_eq!(TemplateKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(TemplateKind::from_name("diagram"), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TemplateKind::System).unwrap();
        assert_eq!(json, "\"system\"");
        let json = serde_json::to_string(&TemplateKind::Project).unwrap();
        assert_eq!(json, "\"project\"");
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let err = TemplateMetadata::new("", "desc", TemplateKind::Project, "0.1.0");
        assert!(err.is_err());
        let err = TemplateMetadata::new("   ", "desc", TemplateKind::Project, "0.1.0");
        assert!(err.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = prompt_metadata();
        let json = serde_json::to_string(&m).unwrap();
        let back: TemplateMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_complete_prompt_metadata_validates() {
        assert!(prompt_metadata().validation_errors().is_empty());
    }

    #[test]
    fn test_prompt_metadata_missing_fields_reported() {
        let m = TemplateMetadata::new("bare", "desc", TemplateKind::User, "").unwrap();
        let errors = m.validation_errors();
        // version, author, tags, variables all missing
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_scaffold_metadata_is_lenient() {
        let m = TemplateMetadata::new("api", "REST API skeleton", TemplateKind::Project, "")
            .unwrap();
        assert!(m.validation_errors().is_empty());
    }
}
