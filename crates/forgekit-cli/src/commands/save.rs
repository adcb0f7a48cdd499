use std::path::Path;

use anyhow::Result;

use forgekit_core::{ForgeConfig, ForgeError, PromptLibrary, PromptRecord};

use crate::output;

/// Import a JSON prompt record into the prompt library.
///
/// With `--strict`, a record that fails the completeness check is rejected
/// with the full failure list; otherwise failures are printed as warnings
/// and the record is saved anyway.
pub fn run(config_path: &Path, file: &Path, strict: bool) -> Result<()> {
    let config = ForgeConfig::load(config_path)?;

    let contents = std::fs::read_to_string(file)?;
    let record: PromptRecord = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid prompt record {}: {e}", file.display()))?;
    let definition = record.into_definition();

    let errors = definition.validation_errors();
    if !errors.is_empty() {
        if strict {
            return Err(ForgeError::Validation { errors }.into());
        }
        for error in &errors {
            output::print_warning(error);
        }
    }

    let mut library = PromptLibrary::new(&config.prompts_dir);
    library.discover()?;
    let path = library.save(&definition)?;

    output::print_success(&format!(
        "saved prompt '{}' to {}",
        definition.name(),
        path.display()
    ));
    Ok(())
}
