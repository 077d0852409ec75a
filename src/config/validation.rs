use crate::config::types::Settings;
use crate::crawler::compile_exclude_pattern;
use crate::ConfigError;

/// Validates persisted settings
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.depth < 1 {
        return Err(ConfigError::InvalidDepth(settings.depth));
    }

    compile_exclude_pattern(&settings.exclude_pattern)?;

    Ok(())
}
