use std::path::Path;

use anyhow::Result;

use forgekit_core::config::{ForgeConfig, CONFIG_FILE};

use crate::output;

/// Create a `forgekit.json` config under `base` and the four library roots
/// it points at. Refuses to overwrite an existing config.
pub fn run(base: &Path) -> Result<()> {
    output::print_header("forgekit init");

    let config_path = base.join(CONFIG_FILE);
    if config_path.exists() {
        output::print_warning(&format!("{} already exists, leaving it alone", config_path.display()));
        return Ok(());
    }

    std::fs::create_dir_all(base)?;
    let config = ForgeConfig::under(base);
    config.ensure_roots()?;
    config.save(&config_path)?;

    output::print_success(&format!("wrote {}", config_path.display()));
    output::print_key_value("templates", &config.templates_dir.display().to_string());
    output::print_key_value("prompts", &config.prompts_dir.display().to_string());
    output::print_key_value("resources", &config.resources_dir.display().to_string());
    output::print_key_value("output", &config.output_dir.display().to_string());

    Ok(())
}
