use crate::cli::global::GlobalArgs;
use hibc::{DecoderSettings, SettingsFile};
use std::path::Path;

/// Loads the effective settings for this invocation.
///
/// Built-in and discovered settings come first; a file named with
/// `--config` is applied last. Unlike discovered files, an explicit file
/// that cannot be loaded is an error.
pub fn load_settings(global: &GlobalArgs) -> Result<DecoderSettings, Box<dyn std::error::Error>> {
    let mut settings = DecoderSettings::load_with_overrides()?;

    if let Some(path) = &global.config {
        let expanded = shellexpand::tilde(path);
        let file = SettingsFile::load_from_file(Path::new(expanded.as_ref()))
            .map_err(|e| format!("Cannot load config '{}': {}", path, e))?;
        settings.merge(file.decoder);
        settings
            .validate()
            .map_err(|e| format!("Invalid config '{}': {}", path, e))?;
    }

    Ok(settings)
}
