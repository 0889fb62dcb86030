//! Settings for catalog discovery and lookup.

mod loader;
mod types;

use std::path::Path;

pub use types::{
    CatalogSettings,
    ConfigError,
    IndexingConfig,
    ValidationError,
};

/// Load and validate settings for a scan root.
///
/// Missing settings file means defaults.
///
/// # Errors
/// - File read or JSON parse error
/// - Validation error
pub fn load_settings(workspace_root: &Path) -> Result<CatalogSettings, ConfigError> {
    let settings = loader::load_from_workspace(workspace_root)?.map_or_else(
        CatalogSettings::default,
        |loaded| {
            tracing::debug!("Loaded workspace settings: {:?}", loaded);
            loaded
        },
    );

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    Ok(settings)
}
