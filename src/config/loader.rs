//! Settings file loader.

use std::path::Path;

use super::{
    CatalogSettings,
    ConfigError,
};

/// Name of the optional settings file at the scan root.
const SETTINGS_FILE: &str = ".linguist-catalog.json";

/// Read `.linguist-catalog.json` from the scan root.
///
/// # Returns
/// - `Ok(Some(settings))`: file found and parsed
/// - `Ok(None)`: no settings file
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<CatalogSettings>, ConfigError> {
    let config_path = workspace_root.join(SETTINGS_FILE);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: CatalogSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
