// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("purrpong");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from file, or create a default file if none exists.
/// The returned config is already normalized (out-of-range values clamped).
pub fn load_config() -> Result<Config, io::Error> {
    let config_path = get_config_path();

    let mut config = if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to parse config file: {}", e);
                eprintln!("Using default configuration");
                Config::default()
            }
        }
    } else {
        create_default_config(&config_path)?;
        Config::default()
    };

    config.normalize();
    Ok(config)
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    // Add helpful header comments
    let commented_toml = format!(
        "# Purrpong Configuration File\n\
         # Edit this file to customize game behavior\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # skill_tier: 0 = Easy, 1 = Normal, 2 = Hard, 3 = Expert\n\
         # speed_multiplier: 0.8 (slow) to 2.0 (frantic)\n\
         # Colors: RGB values from 0-255\n\
         #\n\
         # commentary.endpoint: WebSocket URL of the phrase service; leave\n\
         # empty to play with the built-in phrases only\n\n\
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

        // Should round-trip cleanly: parsed values must match the original defaults
        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.game.skill_tier, config.game.skill_tier);
        assert_eq!(parsed.game.speed_multiplier, config.game.speed_multiplier);
        assert_eq!(parsed.physics.base_speed, config.physics.base_speed);
        assert_eq!(parsed.keybindings.paddle_up, config.keybindings.paddle_up);
        assert_eq!(parsed.display.target_fps, config.display.target_fps);
        assert_eq!(parsed.commentary.enabled, config.commentary.enabled);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        // Should be able to parse partial config with #[serde(default)]
        let partial_toml = r#"
            [game]
            skill_tier = 2
        "#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        // Custom value
        assert_eq!(config.game.skill_tier, 2);

        // Default values should still be there
        assert_eq!(config.game.speed_multiplier, 1.0);
        assert_eq!(config.physics.field_width, 800.0);
        assert_eq!(config.keybindings.paddle_up, "W");
    }
}
