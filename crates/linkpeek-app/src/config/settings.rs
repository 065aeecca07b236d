//! Settings parser for .linkpeek/config.toml

use super::types::Settings;
use linkpeek_core::prelude::*;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.toml";
const LINKPEEK_DIR: &str = ".linkpeek";

/// Load settings from `.linkpeek/config.toml` under `project_path`.
///
/// A missing or unparsable file yields the defaults.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(LINKPEEK_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a commented default config file in `.linkpeek/`
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let linkpeek_dir = project_path.join(LINKPEEK_DIR);

    if !linkpeek_dir.exists() {
        std::fs::create_dir_all(&linkpeek_dir)
            .map_err(|e| Error::config(format!("Failed to create .linkpeek dir: {}", e)))?;
    }

    let config_path = linkpeek_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# linkpeek configuration

[behavior]
logged_in = false         # Enables the watch/unwatch menu item
places_analytics = true   # Send places events for previews opened from the map
language = "en"

[ui]
distance_units = "metric" # metric | imperial
show_thumbnails = true
dialog_width = 64
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkpeek_core::DistanceUnits;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_load_settings_invalid_toml_uses_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(LINKPEEK_DIR)).unwrap();
        std::fs::write(
            dir.path().join(LINKPEEK_DIR).join(CONFIG_FILENAME),
            "[ui\nbroken",
        )
        .unwrap();
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        init_config_dir(dir.path()).unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_init_does_not_overwrite_existing() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(LINKPEEK_DIR)).unwrap();
        std::fs::write(
            dir.path().join(LINKPEEK_DIR).join(CONFIG_FILENAME),
            "[ui]\ndistance_units = \"imperial\"\n",
        )
        .unwrap();

        init_config_dir(dir.path()).unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.ui.distance_units, DistanceUnits::Imperial);
    }
}
