use std::path::Path;

use anyhow::Result;

use forgekit_core::{ForgeConfig, ScaffoldManager};

use crate::commands::build_context;
use crate::output;

/// Instantiate a scaffold template into a target directory.
pub fn run(
    config_path: &Path,
    template: &str,
    target: Option<&Path>,
    vars: Vec<(String, String)>,
) -> Result<()> {
    let config = ForgeConfig::load(config_path)?;

    let mut manager = ScaffoldManager::new(&config.templates_dir);
    manager.discover()?;

    let default_target = config.output_dir.join(template);
    let target = target.unwrap_or(&default_target);

    output::print_header(&format!("forgekit new: {template}"));
    let created = manager.instantiate(template, target, &build_context(vars))?;

    output::print_success(&format!(
        "created {} paths under {}",
        created.len(),
        target.display()
    ));
    Ok(())
}
