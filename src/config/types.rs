//! Configuration types and validation.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// One failed validation check, addressed by JSON field path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    /// New error for a field path.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors raised while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more fields failed validation.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list formatting for validation failures.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings controlling catalog discovery and locale selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    /// Glob matched against paths relative to the scan root.
    pub catalog_pattern: String,

    /// Globs excluded from the scan.
    pub exclude_patterns: Vec<String>,

    /// Locale activated after discovery. Unset means the system locale.
    pub default_locale: Option<String>,

    /// Locales consulted when the active catalog misses, in order.
    pub fallback_locales: Vec<String>,

    /// Parallel loading configuration.
    pub indexing: IndexingConfig,
}

/// Parallel loading configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexingConfig {
    /// Parallel thread count for catalog loading.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            catalog_pattern: "**/*.ts".to_string(),
            exclude_patterns: vec![],
            default_locale: None,
            fallback_locales: vec![],
            indexing: IndexingConfig::default(),
        }
    }
}

impl CatalogSettings {
    /// # Errors
    /// - Empty or invalid glob pattern
    /// - Locale that does not parse as a language identifier
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.catalog_pattern.is_empty() {
            errors.push(ValidationError::new(
                "catalogPattern",
                "The pattern cannot be empty. Example: \"**/*.ts\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.catalog_pattern) {
            errors.push(ValidationError::new(
                "catalogPattern",
                format!("Invalid glob pattern '{}': {e}", self.catalog_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if let Some(locale) = &self.default_locale
            && locale.replace('_', "-").parse::<LanguageIdentifier>().is_err()
        {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!("'{locale}' is not a valid language identifier"),
            ));
        }

        for (index, locale) in self.fallback_locales.iter().enumerate() {
            if locale.replace('_', "-").parse::<LanguageIdentifier>().is_err() {
                errors.push(ValidationError::new(
                    format!("fallbackLocales[{index}]"),
                    format!("'{locale}' is not a valid language identifier"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
