use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::lighthouse::DEFAULT_IMAGE;

/// Optional per-project settings, read from `.lightkeeperrc.json` in the
/// working directory. Missing file or missing fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Container image running Lighthouse
    #[serde(default = "default_image")]
    pub lighthouse_image: String,

    /// Form factor used when the CLI does not specify one
    #[serde(default = "default_form_factor")]
    pub form_factor: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lighthouse_image: default_image(),
            form_factor: default_form_factor(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from_dir(Path::new("."))
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(".lightkeeperrc.json");
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn default_form_factor() -> String {
    "desktop".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.lighthouse_image, DEFAULT_IMAGE);
        assert_eq!(config.form_factor, "desktop");
    }

    #[test]
    fn returns_default_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from_dir(tmp.path()).unwrap();
        assert_eq!(config.lighthouse_image, DEFAULT_IMAGE);
    }

    #[test]
    fn rc_file_overrides_image() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".lightkeeperrc.json"),
            r#"{"lighthouse_image": "registry.local/lighthouse:pinned"}"#,
        )
        .unwrap();

        let config = Config::load_from_dir(tmp.path()).unwrap();
        assert_eq!(config.lighthouse_image, "registry.local/lighthouse:pinned");
        // untouched fields keep their defaults
        assert_eq!(config.form_factor, "desktop");
    }

    #[test]
    fn invalid_rc_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".lightkeeperrc.json"), "{broken").unwrap();
        assert!(Config::load_from_dir(tmp.path()).is_err());
    }
}
