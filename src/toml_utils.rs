// -- imports
use serde::Deserialize;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::prepare::PrepareArgs;

// -- config

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    prepare: PrepareArgs,
}

impl TomlConfig {
    /// Parse TOML config file, resolving relative paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if:
    /// - The path is not a valid toml file
    /// - File read fails
    /// - TOML parsing fails
    pub fn from_toml(toml_path: &Path, base_dir: &Path) -> Result<Self> {
        if !toml_path.is_file() || toml_path.extension().is_none_or(|ext| ext != "toml") {
            return Err(AppError::Config(format!(
                "TOML config path is not a valid .toml file: {:?}",
                toml_path
            )));
        }

        let content = std::fs::read_to_string(toml_path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.resolve_paths(base_dir);

        Ok(config)
    }

    /// Resolve relative paths against the config file's directory
    fn resolve_paths(&mut self, base_dir: &Path) {
        let prepare = &mut self.prepare;
        if !prepare.dest_dir.is_absolute() {
            prepare.dest_dir = base_dir.join(&prepare.dest_dir);
        }
        if !prepare.chromedriver.is_absolute() {
            prepare.chromedriver = base_dir.join(&prepare.chromedriver);
        }
    }
}

impl From<TomlConfig> for PrepareArgs {
    fn from(config: TomlConfig) -> Self {
        config.prepare
    }
}

// -- public API

/// Parse TOML config file and return PrepareArgs.
///
/// Relative `dest_dir` and `chromedriver` paths are taken relative to the file's directory.
///
/// # Errors
///
/// Returns `AppError` if TOML parsing or path resolution fails.
pub fn parse_toml(toml_path: &Path) -> Result<PrepareArgs> {
    let base_dir = toml_path.parent().unwrap_or(Path::new("."));
    TomlConfig::from_toml(toml_path, base_dir).map(Into::into)
}

// -- tests
