//! Configuration types for the simulation

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from resolving or validating asset paths
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid asset name: {0}")]
    InvalidAssetName(String),

    #[error("{kind} directory not found: {path:?}")]
    MissingDirectory { kind: &'static str, path: PathBuf },
}

/// Configuration for asset paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Root directory for all assets
    pub asset_root: PathBuf,
    /// Directory name for scripts (relative to asset_root)
    pub scripts_dir: String,
    /// Directory name for entity template files (relative to asset_root)
    pub templates_dir: String,
    /// Directory name for scenes (relative to asset_root)
    pub scenes_dir: String,
}

impl AssetConfig {
    /// Configuration with the default directory names under `asset_root`
    pub fn with_root(asset_root: impl Into<PathBuf>) -> Self {
        let asset_root = asset_root.into();
        debug!(asset_root = ?asset_root, "Creating AssetConfig");
        Self {
            asset_root,
            ..Self::default()
        }
    }

    /// Full path to a script file
    pub fn script_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        self.asset_path(&self.scripts_dir, name, "rhai")
    }

    /// Full path to an entity template file
    pub fn template_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        self.asset_path(&self.templates_dir, name, "json")
    }

    /// Full path to a scene file
    pub fn scene_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        self.asset_path(&self.scenes_dir, name, "json")
    }

    fn asset_path(&self, dir: &str, name: &str, extension: &str) -> Result<PathBuf, ConfigError> {
        // Names must stay inside their directory
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(ConfigError::InvalidAssetName(name.to_string()));
        }
        let path = self
            .asset_root
            .join(dir)
            .join(format!("{name}.{extension}"));
        debug!(name, path = ?path, "Generated asset path");
        Ok(path)
    }

    /// Check that the asset directories exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dir("Asset root", &self.asset_root)?;
        check_dir("Scripts", &self.asset_root.join(&self.scripts_dir))?;
        check_dir("Templates", &self.asset_root.join(&self.templates_dir))?;
        check_dir("Scenes", &self.asset_root.join(&self.scenes_dir))?;
        Ok(())
    }
}

fn check_dir(kind: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::MissingDirectory {
            kind,
            path: path.to_path_buf(),
        })
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            scripts_dir: "scripts".to_string(),
            templates_dir: "templates".to_string(),
            scenes_dir: "scenes".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_asset_paths() {
        let config = AssetConfig::with_root("sim/assets");

        assert_eq!(
            config.script_path("launch").unwrap(),
            PathBuf::from("sim/assets/scripts/launch.rhai")
        );
        assert_eq!(
            config.template_path("vehicles").unwrap(),
            PathBuf::from("sim/assets/templates/vehicles.json")
        );
        assert_eq!(
            config.scene_path("leo").unwrap(),
            PathBuf::from("sim/assets/scenes/leo.json")
        );
    }

    #[test]
    fn test_rejects_path_traversal() {
        let config = AssetConfig::default();
        for name in ["../evil", "some/path/evil", "some\\path\\evil", ""] {
            assert!(matches!(
                config.script_path(name),
                Err(ConfigError::InvalidAssetName(_))
            ));
        }
    }

    #[test]
    fn test_default_config() {
        let config = AssetConfig::default();
        assert_eq!(config.asset_root, PathBuf::from("assets"));
        assert_eq!(config.scripts_dir, "scripts");
        assert_eq!(config.templates_dir, "templates");
        assert_eq!(config.scenes_dir, "scenes");
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssetConfig::with_root(dir.path());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingDirectory { kind: "Scripts", .. }));

        for sub in ["scripts", "templates", "scenes"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
        }
        config.validate().unwrap();
    }
}
