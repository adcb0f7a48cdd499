//! Template definitions: metadata paired with renderable content.

use serde::{Deserialize, Serialize};

use crate::metadata::{TemplateKind, TemplateMetadata};
use crate::tree::TemplateTree;

/// The renderable half of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    /// A single template string (prompt case).
    Prompt(String),
    /// A file tree with templated paths and bodies (scaffold case).
    Tree(TemplateTree),
}

/// A complete definition: metadata plus content.
///
/// Definitions are owned by the index that loaded them; callers get shared
/// references and rendering never mutates a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    pub metadata: TemplateMetadata,
    content: TemplateContent,
}

impl TemplateDefinition {
    /// Create a prompt definition.
    pub fn prompt(metadata: TemplateMetadata, content: impl Into<String>) -> Self {
        Self {
            metadata,
            content: TemplateContent::Prompt(content.into()),
        }
    }

    /// Create a scaffold definition.
    pub fn scaffold(metadata: TemplateMetadata, tree: TemplateTree) -> Self {
        Self {
            metadata,
            content: TemplateContent::Tree(tree),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn kind(&self) -> TemplateKind {
        self.metadata.kind
    }

    pub fn content(&self) -> &TemplateContent {
        &self.content
    }

    /// The prompt text, if this is a prompt definition.
    pub fn prompt_content(&self) -> Option<&str> {
        match &self.content {
            TemplateContent::Prompt(text) => Some(text),
            TemplateContent::Tree(_) => None,
        }
    }

    /// The file tree, if this is a scaffold definition.
    pub fn tree(&self) -> Option<&TemplateTree> {
        match &self.content {
            TemplateContent::Tree(tree) => Some(tree),
            TemplateContent::Prompt(_) => None,
        }
    }

    /// Completeness check over metadata and content; returns every failure.
    ///
    /// Extends [`TemplateMetadata::validation_errors`] with the content
    /// requirements: prompts must have non-empty text, scaffolds a
    /// non-empty tree.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = self.metadata.validation_errors();
        match &self.content {
            TemplateContent::Prompt(text) => {
                if text.trim().is_empty() {
                    errors.push("prompt content must not be empty".to_string());
                }
            }
            TemplateContent::Tree(tree) => {
                if tree.is_empty() {
                    errors.push("scaffold file tree must not be empty".to_string());
                }
            }
        }
        errors
    }

    /// Advisory validity check: `true` when no completeness failure exists.
    /// Never errors; use [`validation_errors`](Self::validation_errors) for
    /// the individual failures.
    pub fn validate(&self) -> bool {
        self.validation_errors().is_empty()
    }
}

/// The on-disk shape of a prompt definition file: a `metadata` object next
/// to a `content` string. One JSON file per prompt under the library root;
/// category lives in the metadata, not in the directory structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    pub metadata: TemplateMetadata,
    pub content: String,
}

impl PromptRecord {
    /// Convert into an in-memory definition.
    pub fn into_definition(self) -> TemplateDefinition {
        TemplateDefinition::prompt(self.metadata, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TemplateKind;

    fn prompt_definition(content: &str) -> TemplateDefinition {
        let metadata =
            TemplateMetadata::new("greeting", "A greeting", TemplateKind::System, "1.0.0")
                .unwrap()
                .with_author("forgekit contributors")
                .with_tag("demo")
                .with_variable("name", "Who to greet");
        TemplateDefinition::prompt(metadata, content)
    }

    #[test]
    fn test_complete_prompt_validates() {
        let def = prompt_definition("Hello {{ name }}!");
        assert!(def.validate());
        assert!(def.validation_errors().is_empty());
    }

    #[test]
    fn test_empty_content_fails_validation_but_constructs() {
        let def = prompt_definition("   ");
        assert!(!def.validate());
        assert!(def
            .validation_errors()
            .iter()
            .any(|e| e.contains("content")));
    }

    #[test]
    fn test_empty_tags_fail_validation() {
        let metadata =
            TemplateMetadata::new("greeting", "A greeting", TemplateKind::System, "1.0.0")
                .unwrap()
                .with_author("someone")
                .with_variable("name", "Who to greet");
        let def = TemplateDefinition::prompt(metadata, "Hello {{ name }}!");
        assert!(!def.validate());
    }

    #[test]
    fn test_prompt_record_roundtrip() {
        let def = prompt_definition("Hello {{ name }}!");
        let record = PromptRecord {
            metadata: def.metadata.clone(),
            content: def.prompt_content().unwrap().to_string(),
        };
        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: PromptRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_definition(), def);
    }

    #[test]
    fn test_content_accessors() {
        let def = prompt_definition("Hello");
        assert_eq!(def.prompt_content(), Some("Hello"));
        assert!(def.tree().is_none());
    }
}
