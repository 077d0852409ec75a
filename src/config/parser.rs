use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigError;
use std::io::ErrorKind;
use std::path::Path;

/// Loads settings from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Loaded and validated settings, or the defaults when the
///   file does not exist yet
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e.into()),
    };

    let settings: Settings = toml::from_str(&content)?;
    validate(&settings)?;

    Ok(settings)
}

/// Writes the settings to the given path, replacing its contents
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(settings)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
