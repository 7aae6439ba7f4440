// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("flappilot");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from file, or create default if it doesn't exist
pub fn load_config() -> Result<Config, io::Error> {
    let config_path = get_config_path();

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse config file: {}", e);
                eprintln!("Using default configuration");
                Ok(Config::default())
            }
        }
    } else {
        // Create default config file
        create_default_config(&config_path)?;
        Ok(Config::default())
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    // Add helpful header comments
    let commented_toml = format!(
        "# Flappilot Configuration File\n\
         # Edit this file to tune the physics model and the lookahead search\n\
         # After editing, restart for changes to take effect\n\
         #\n\
         # [physics]  gravity, flap impulse, velocity clamps, pipe drift, geometry\n\
         # [search]   lookahead depth, result caps, score spread\n\
         # [sim]      headless episode count and frame cap\n\
         #\n\
         # Note: flap_impulse and pipe_vel_x must stay negative (up / left)\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    println!("Created default config file at: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        // Should round-trip cleanly - parsed values must match the original defaults
        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.physics.gravity, config.physics.gravity);
        assert_eq!(parsed.physics.flap_impulse, config.physics.flap_impulse);
        assert_eq!(parsed.search.max_desired_depth, config.search.max_desired_depth);
        assert_eq!(parsed.search.score_sigma, config.search.score_sigma);
        assert_eq!(parsed.sim.episodes, config.sim.episodes);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        // Should be able to parse partial config with #[serde(default)]
        let partial_toml = r#"
            [search]
            max_desired_depth = 8
        "#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        // Custom value
        assert_eq!(config.search.max_desired_depth, 8);

        // Default values should still be there
        assert_eq!(config.search.frame_skip, 3);
        assert_eq!(config.physics.gravity, 1.0);
    }
}
