//! Default locations for the engine config and user presets

use std::path::PathBuf;

/// Get the default configuration directory
///
/// Returns: `{config_dir}/polar-designer` (falls back to `./polar-designer`)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("polar-designer")
}

/// Get the default engine config file path
///
/// Returns: `{config_dir}/polar-designer/engine.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("engine.yaml")
}

/// Get the default directory for user presets
///
/// Returns: `~/Documents/PolarDesigner/Presets` (home dir if no documents dir)
pub fn default_preset_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("PolarDesigner")
        .join("Presets")
}
