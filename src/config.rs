//! Contains the loader options and their TOML representation.

use std::{fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Opt-in validations of `ObjLoader`. All of them are off by default.
///
/// ```toml
/// strict_index_groups = true
/// check_index_bounds = false
/// strict_arity = false
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Validates texcoord and normal references in `f` index groups
    /// instead of discarding them, and rejects groups with more than
    /// three sub-fields.
    pub strict_index_groups: bool,

    /// Rejects faces referencing positions that are not defined anywhere
    /// in the file.
    pub check_index_bounds: bool,

    /// Rejects `v`, `vn` and `f` records with more than three values
    /// instead of ignoring the extras.
    pub strict_arity: bool,
}

impl LoaderConfig {
    /// Enables every validation.
    pub fn strict() -> LoaderConfig {
        LoaderConfig {
            strict_index_groups: true,
            check_index_bounds: true,
            strict_arity: true,
        }
    }

    pub fn from_toml_str(source: &str) -> Result<LoaderConfig> {
        let config = toml::from_str(source).context("Failed to parse loader config")?;
        Ok(config)
    }

    /// Reads the config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<LoaderConfig> {
        let path = path.as_ref();
        let source = read_to_string(path)
            .with_context(|| format!("Failed to read loader config {}", path.display()))?;
        LoaderConfig::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let text = toml::to_string(self).context("Failed to export loader config")?;
        Ok(text)
    }
}
