//! Generator configuration.

use crate::error::{GenError, GenResult};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Identity-retrieval fragment appended to INSERT statements (SQL Server).
pub const SCOPE_IDENTITY_SELECT: &str = "SELECT CAST(SCOPE_IDENTITY() as int)";

/// Settings shared by the INSERT and UPDATE builders.
///
/// Passed by value into each builder; nothing is kept in global state.
///
/// ```toml
/// ignored_fields = ["ModifiedBy", "RowVersion"]
/// identity_select = "SELECT CAST(SCOPE_IDENTITY() as int)"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Field names that exist on records but are never persisted (audit columns and the like).
    pub ignored_fields: BTreeSet<String>,
    /// Fragment appended to INSERT when identity retrieval is requested.
    pub identity_select: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ignored_fields: BTreeSet::new(),
            identity_select: SCOPE_IDENTITY_SELECT.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field name to the ignore-list.
    pub fn ignore(mut self, field: impl Into<String>) -> Self {
        self.ignored_fields.insert(field.into());
        self
    }

    /// Add several field names to the ignore-list.
    pub fn ignore_all<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Replace the identity-retrieval fragment.
    pub fn identity_select(mut self, fragment: impl Into<String>) -> Self {
        self.identity_select = fragment.into();
        self
    }

    /// Check if a field name is on the ignore-list.
    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored_fields.contains(field)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> GenResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GenError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            GenError::Config(msg) => GenError::config(format!(
                "failed to parse config file {}: {msg}",
                path.display()
            )),
            other => other,
        })
    }

    fn validate(&self) -> GenResult<()> {
        if let Some(empty) = self.ignored_fields.iter().find(|f| f.trim().is_empty()) {
            return Err(GenError::config(format!(
                "ignored_fields contains a blank entry: {empty:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.ignored_fields.is_empty());
        assert_eq!(config.identity_select, SCOPE_IDENTITY_SELECT);
    }

    #[test]
    fn test_builder_setters() {
        let config = GeneratorConfig::new()
            .ignore("ModifiedBy")
            .ignore_all(["RowVersion", "ModifiedBy"])
            .identity_select("SELECT LAST_INSERT_ID()");
        assert_eq!(config.ignored_fields.len(), 2);
        assert!(config.is_ignored("RowVersion"));
        assert!(!config.is_ignored("rowversion"));
        assert_eq!(config.identity_select, "SELECT LAST_INSERT_ID()");
    }

    #[test]
    fn test_from_toml_str() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            ignored_fields = ["ModifiedBy", "ModifiedOn"]
            "#,
        )
        .unwrap();
        assert!(config.is_ignored("ModifiedBy"));
        assert!(config.is_ignored("ModifiedOn"));
        assert_eq!(config.identity_select, SCOPE_IDENTITY_SELECT);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_keys() {
        let err = GeneratorConfig::from_toml_str("ignored = []").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_from_toml_str_rejects_blank_entries() {
        let err = GeneratorConfig::from_toml_str(r#"ignored_fields = [" "]"#).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = GeneratorConfig::from_path("/nonexistent/recordsql.toml").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("failed to read config file"));
    }
}
