//! Configuration management for clipstore.
//!
//! This module handles path resolution and loading `clipstore.yaml`.

mod paths;
mod settings;

pub use paths::{Paths, CONFIG_FILE, DEFAULT_DATABASE};
pub use settings::{ColorSetting, Config, GeneralConfig, StorageConfig};
