// Configuration module for Flappilot
// Handles loading and managing configuration from TOML file

pub mod loader;
pub mod types;

pub use loader::{create_default_config, get_config_path, load_config};
pub use types::{Config, PhysicsConfig, SearchConfig, SimConfig};
