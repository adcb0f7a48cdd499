//! Root-directory configuration for the engine.
//!
//! Managers take their root explicitly in the constructor; nothing reads
//! process-global state, so several independent libraries can coexist in
//! one process. `ForgeConfig` is the collaborator that owns the top-level
//! roots: it creates them and hands them to the managers, which never
//! create top-level roots themselves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// Default config file name.
pub const CONFIG_FILE: &str = "forgekit.json";

/// The four root directories the engine works against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Scaffold template library root.
    pub templates_dir: PathBuf,
    /// Prompt library root.
    pub prompts_dir: PathBuf,
    /// Static resource files referenced by generated artifacts.
    pub resources_dir: PathBuf,
    /// Default destination for instantiated scaffolds.
    pub output_dir: PathBuf,
}

impl ForgeConfig {
    /// Conventional layout rooted at one base directory:
    /// `templates/`, `prompts/`, `resources/`, `output/`.
    pub fn under(base: &Path) -> Self {
        Self {
            templates_dir: base.join("templates"),
            prompts_dir: base.join("prompts"),
            resources_dir: base.join("resources"),
            output_dir: base.join("output"),
        }
    }

    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// [`ForgeError::ConfigNotFound`] if the file is missing,
    /// [`ForgeError::ConfigParse`] if it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ForgeError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| ForgeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ForgeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Create all four roots if absent.
    pub fn ensure_roots(&self) -> Result<()> {
        for dir in [
            &self.templates_dir,
            &self.prompts_dir,
            &self.resources_dir,
            &self.output_dir,
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Resolve a file under the resource root.
    ///
    /// # Errors
    ///
    /// [`ForgeError::ResourceMissing`] when the file does not exist.
    pub fn resource(&self, name: &str) -> Result<PathBuf> {
        let path = self.resources_dir.join(name);
        if !path.is_file() {
            return Err(ForgeError::ResourceMissing(path));
        }
        Ok(path)
    }
}
