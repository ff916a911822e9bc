//! Settings parser for .nellipsis/config.toml

use std::path::{Path, PathBuf};

use nellipsis_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const NELLIPSIS_DIR: &str = ".nellipsis";

/// Path of the settings file for `project_path`
pub fn config_path(project_path: &Path) -> PathBuf {
    project_path.join(NELLIPSIS_DIR).join(CONFIG_FILENAME)
}

/// Load settings from .nellipsis/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    match read_settings(project_path) {
        Ok(settings) => settings,
        Err(Error::ConfigNotFound { path }) => {
            debug!("No config file at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            Settings::default()
        }
    }
}

/// Read settings from .nellipsis/config.toml, failing when the file is
/// missing or invalid.
pub fn read_settings(project_path: &Path) -> Result<Settings> {
    let config_path = config_path(project_path);

    if !config_path.exists() {
        return Err(Error::ConfigNotFound { path: config_path });
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {:?}", config_path))?;
    let settings = toml::from_str(&content)
        .map_err(|e| Error::config_invalid(format!("{}: {}", config_path.display(), e)))?;

    debug!("Loaded settings from {:?}", config_path);
    Ok(settings)
}

/// Create a commented default config file in .nellipsis/
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let nellipsis_dir = project_path.join(NELLIPSIS_DIR);

    if !nellipsis_dir.exists() {
        std::fs::create_dir_all(&nellipsis_dir)
            .map_err(|e| Error::config(format!("Failed to create .nellipsis dir: {}", e)))?;
    }

    let config_path = nellipsis_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Nested Ellipsis Configuration

[ellipsis]
active = true               # false renders content untruncated
indicator = "..."
indicator_markup = false    # true parses the indicator as markup
word_boundaries = " \n"     # empty = cut anywhere
resize_detection = "resize-observer"   # "window" | "manual"

[layout]
cell_width = 8.0            # px per terminal cell
line_height = 16.0          # px per line
overflow = "visible"        # visible | hidden | scroll | auto

[ui]
show_status_bar = true
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Overflow;
    use crate::resize::ResizeDetection;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());

        assert!(settings.ellipsis.active);
        assert_eq!(settings.ellipsis.indicator, "...");
        assert_eq!(settings.layout.overflow, Overflow::Visible);
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".nellipsis");
        std::fs::create_dir_all(&dir).unwrap();

        let config = r#"
[ellipsis]
active = false
indicator = " …"
resize_detection = "window"

[layout]
cell_width = 10.0

[ui]
show_status_bar = false
"#;
        std::fs::write(dir.join("config.toml"), config).unwrap();

        let settings = load_settings(temp.path());

        assert!(!settings.ellipsis.active);
        assert_eq!(settings.ellipsis.indicator, " …");
        assert_eq!(settings.ellipsis.resize_detection, ResizeDetection::Window);
        assert_eq!(settings.layout.cell_width, 10.0);
        assert_eq!(settings.layout.line_height, 16.0);
        assert!(!settings.ui.show_status_bar);
    }

    #[test]
    fn test_read_settings_missing_file() {
        let temp = tempdir().unwrap();
        let err = read_settings(temp.path()).unwrap_err();
        assert!(
            matches!(&err, Error::ConfigNotFound { path } if *path == config_path(temp.path())),
            "{err:?}"
        );
    }

    #[test]
    fn test_read_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".nellipsis");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[ellipsis]\nactive = maybe\n").unwrap();

        let err = read_settings(temp.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }), "{err:?}");
    }

    #[test]
    fn test_read_settings_after_init() {
        let temp = tempdir().unwrap();
        init_config_dir(temp.path()).unwrap();
        let settings = read_settings(temp.path()).unwrap();
        assert_eq!(settings.ellipsis.word_boundaries, " \n");
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join(".nellipsis");
        std::fs::create_dir_all(&dir).unwrap();

        // Invalid TOML
        std::fs::write(dir.join("config.toml"), "not valid toml {{{{").unwrap();

        // Should return defaults
        let settings = load_settings(temp.path());
        assert!(settings.ellipsis.active);
        assert!(settings.ellipsis.word_boundaries.is_empty());
    }

    #[test]
    fn test_init_config_dir() {
        let temp = tempdir().unwrap();

        init_config_dir(temp.path()).unwrap();

        assert!(config_path(temp.path()).exists());

        let settings = load_settings(temp.path());
        assert_eq!(settings.ellipsis.word_boundaries, " \n");
        assert_eq!(settings.ellipsis.resize_detection, ResizeDetection::ResizeObserver);
        assert!(settings.ui.show_status_bar);
    }

    #[test]
    fn test_init_config_dir_idempotent() {
        let temp = tempdir().unwrap();
        let path = config_path(temp.path());

        init_config_dir(temp.path()).unwrap();
        std::fs::write(&path, "[ellipsis]\nactive = false\n").unwrap();
        init_config_dir(temp.path()).unwrap();

        // Existing file is left alone
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[ellipsis]\nactive = false\n");
    }
}
