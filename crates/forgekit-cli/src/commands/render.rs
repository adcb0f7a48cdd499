use std::path::Path;

use anyhow::Result;

use forgekit_core::{ForgeConfig, PromptLibrary};

use crate::commands::build_context;
use crate::output;

/// Render a prompt against `--var` context entries, to stdout or a file.
pub fn run(
    config_path: &Path,
    name: &str,
    vars: Vec<(String, String)>,
    out: Option<&Path>,
) -> Result<()> {
    let config = ForgeConfig::load(config_path)?;

    let mut library = PromptLibrary::new(&config.prompts_dir);
    library.discover()?;

    let rendered = library.render(name, &build_context(vars))?;

    match out {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            output::print_success(&format!("rendered '{name}' to {}", path.display()));
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
