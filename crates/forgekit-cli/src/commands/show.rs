use std::path::Path;

use anyhow::Result;

use forgekit_core::{ForgeConfig, PromptLibrary, ScaffoldManager, TemplateDefinition};

use crate::output;

/// Show one definition's metadata and declared variable contract.
///
/// Prompts are checked first, then scaffold templates.
pub fn run(config_path: &Path, name: &str) -> Result<()> {
    let config = ForgeConfig::load(config_path)?;

    let mut library = PromptLibrary::new(&config.prompts_dir);
    library.discover()?;
    if let Some(def) = library.get(name) {
        print_definition(def);
        return Ok(());
    }

    let mut manager = ScaffoldManager::new(&config.templates_dir);
    manager.discover()?;
    match manager.get(name) {
        Some(def) => {
            print_definition(def);
            Ok(())
        }
        None => anyhow::bail!("no template or prompt named '{name}'"),
    }
}

fn print_definition(def: &TemplateDefinition) {
    let m = &def.metadata;
    output::print_header(&m.name);
    output::print_key_value("description", &m.description);
    output::print_key_value("category", m.kind.as_str());
    output::print_key_value("version", &m.version);
    if let Some(author) = &m.author {
        output::print_key_value("author", author);
    }
    if !m.tags.is_empty() {
        let tags: Vec<&str> = m.tags.iter().map(String::as_str).collect();
        output::print_key_value("tags", &tags.join(", "));
    }
    if !m.variables.is_empty() {
        println!("\n  variables:");
        for (name, description) in &m.variables {
            output::print_key_value(name, description);
        }
    }
    if let Some(tree) = def.tree() {
        output::print_key_value("tree entries", &tree.len().to_string());
    }

    let errors = def.validation_errors();
    if !errors.is_empty() {
        println!();
        for error in errors {
            output::print_warning(&error);
        }
    }
}
