//! Generic configuration I/O utilities
//!
//! YAML loading and saving for any serializable configuration type.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and parse a YAML config file
///
/// Returns `Ok(None)` if the file does not exist.
pub fn read_config<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    Ok(Some(config))
}

/// Load configuration from a YAML file, falling back to defaults
///
/// A missing file yields the default config. An unreadable or invalid file
/// logs a warning and also yields the default config.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match read_config(path) {
        Ok(Some(config)) => {
            log::info!("Loaded config from {:?}", path);
            config
        }
        Ok(None) => {
            log::info!("No config at {:?}, using defaults", path);
            T::default()
        }
        Err(e) => {
            log::warn!("{:#}, using defaults", e);
            T::default()
        }
    }
}

/// Save configuration to a YAML file, creating parent directories
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("Saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::types::InputFormat;

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: EngineConfig = load_config(Path::new("/nonexistent/path/polar.yaml"));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("polar.yaml");

        let config = EngineConfig {
            input_format: InputFormat::FrontBack,
            crossover_order_48k: 256,
            ..Default::default()
        };

        save_config(&config, &path).unwrap();
        let loaded: EngineConfig = load_config(&path);

        assert_eq!(loaded.input_format, InputFormat::FrontBack);
        assert_eq!(loaded.crossover_order_48k, 256);
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "input_format: [not, a, format").unwrap();

        let loaded: EngineConfig = load_config(&path);
        assert_eq!(loaded, EngineConfig::default());
    }

    #[test]
    fn test_read_config_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(read_config::<EngineConfig>(&missing).unwrap().is_none());

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "crossover_order_48k: many").unwrap();
        let err = read_config::<EngineConfig>(&broken).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.yaml");
        std::fs::write(&path, "proximity_epsilon: 0.01\n").unwrap();

        let loaded: EngineConfig = load_config(&path);
        assert_eq!(loaded.proximity_epsilon, 0.01);
        assert_eq!(loaded.crossover_order_48k, EngineConfig::default().crossover_order_48k);
    }
}
