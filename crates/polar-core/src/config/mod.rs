//! Configuration for the polar designer engine
//!
//! - Generic YAML config loading/saving
//! - `EngineConfig` with the engine's tunables
//! - Default config and preset locations
//!
//! # Usage
//!
//! ```ignore
//! use polar_core::config::{default_config_path, load_config, EngineConfig};
//!
//! let config: EngineConfig = load_config(&default_config_path());
//! ```

mod engine;
mod io;
mod paths;

pub use engine::EngineConfig;
pub use io::{load_config, read_config, save_config};
pub use paths::{default_config_dir, default_config_path, default_preset_dir};
