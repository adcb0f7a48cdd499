use std::path::Path;

use anyhow::Result;

use forgekit_core::{ForgeConfig, PromptLibrary, ScaffoldManager, TemplateKind};

use crate::output;

/// List template and prompt names, optionally filtered to one category.
pub fn run(config_path: &Path, kind: Option<TemplateKind>) -> Result<()> {
    let config = ForgeConfig::load(config_path)?;

    let show_templates = kind.map(|k| !k.is_prompt()).unwrap_or(true);
    let show_prompts = kind.map(|k| k.is_prompt()).unwrap_or(true);

    if show_templates {
        let mut manager = ScaffoldManager::new(&config.templates_dir);
        let report = manager.discover()?;
        output::print_header("Templates");
        for name in manager.list(kind) {
            if let Some(def) = manager.get(&name) {
                output::print_list_item(&name, def.kind().as_str());
            }
        }
        warn_skipped(&report.skipped);
    }

    if show_prompts {
        let mut library = PromptLibrary::new(&config.prompts_dir);
        let report = library.discover()?;
        output::print_header("Prompts");
        for name in library.list(kind) {
            if let Some(def) = library.get(&name) {
                output::print_list_item(&name, def.kind().as_str());
            }
        }
        warn_skipped(&report.skipped);
    }

    Ok(())
}

fn warn_skipped(skipped: &[forgekit_core::SkippedEntry]) {
    for entry in skipped {
        output::print_warning(&format!("skipped {}: {}", entry.path.display(), entry.reason));
    }
}
