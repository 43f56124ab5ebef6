//! Sibling configuration via `siblings.toml`
//!
//! Holds the per-type default sibling scopes. Defaults are installed into
//! the schema once, at startup; requests never change them.

use serde::{Deserialize, Serialize};
use siblings_core::{Error, Result, ScopeSpec, SchemaRegistry, TypeName};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "siblings.toml";

/// Sibling configuration loaded from `siblings.toml`.
///
/// # Example
///
/// ```toml
/// [default_scopes]
/// Child = "parent"
/// Player = ["team", "position"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiblingsConfig {
    /// Default sibling scope per record type name
    #[serde(default)]
    pub default_scopes: BTreeMap<String, ScopeSpec>,
}

impl SiblingsConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Sibling scoping configuration
#
# Default sibling scope per record type, used when a call gives no scope.
# A scope is a single key or an ordered list of keys (lowest priority first).
# Types without an entry treat every record of the type as a sibling.
[default_scopes]
# Child = "parent"
# Player = ["team", "position"]
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: SiblingsConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        info!(target: "siblings::config", path = %path.display(), types = config.default_scopes.len(), "Loaded sibling config");
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set a type's default scope
    pub fn with_default_scope(mut self, type_name: &str, scope: impl Into<ScopeSpec>) -> Self {
        self.default_scopes.insert(type_name.to_string(), scope.into());
        self
    }

    /// Install every default scope into the schema
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a type name is not registered. Nothing is
    /// installed in that case.
    pub fn apply(&self, schema: &mut SchemaRegistry) -> Result<()> {
        if let Some(unknown) = self
            .default_scopes
            .keys()
            .find(|name| !schema.is_registered(&TypeName::from(name.as_str())))
        {
            return Err(Error::Config(format!(
                "default scope for unknown record type '{}'",
                unknown
            )));
        }

        for (name, scope) in &self.default_scopes {
            schema.set_default_sibling_scope(&TypeName::from(name.as_str()), scope.clone())?;
            info!(target: "siblings::config", record_type = %name, scope = ?scope.keys(), "Installed default sibling scope");
        }
        Ok(())
    }
}
