use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gesture::SWIPE_THRESHOLD;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "slideshow";

pub const VALID_KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.swipe_threshold",
    "defaults.start_slide",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Minimum horizontal travel for a touch swipe, in logical pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,

    /// 1-indexed slide to open decks on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `slideshow config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("# slideshow configuration\n{yaml}"))?;
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    /// Configured swipe threshold. Hand-edited values that are not a
    /// positive number fall back to the default.
    pub fn swipe_threshold(&self) -> f32 {
        self.defaults
            .as_ref()
            .and_then(|d| d.swipe_threshold)
            .filter(|&t| valid_threshold(t))
            .unwrap_or(SWIPE_THRESHOLD)
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.swipe_threshold" => {
                let threshold = match value.parse::<f32>() {
                    Ok(t) if valid_threshold(t) => t,
                    _ => anyhow::bail!(
                        "Invalid swipe_threshold: {value}. Must be a positive number of pixels."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .swipe_threshold = Some(threshold);
            }
            "defaults.start_slide" => {
                let slide = match value.parse::<usize>() {
                    Ok(n) if n >= 1 => n,
                    _ => anyhow::bail!(
                        "Invalid start_slide: {value}. Must be a slide number starting at 1."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_slide = Some(slide);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                VALID_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn valid_threshold(threshold: f32) -> bool {
    threshold.is_finite() && threshold > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme(), "light");
        assert_eq!(config.swipe_threshold(), SWIPE_THRESHOLD);
        assert_eq!(config.start_slide(), None);
    }

    #[test]
    fn test_set_valid_values() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.swipe_threshold", "80").unwrap();
        config.set("defaults.start_slide", "3").unwrap();
        assert_eq!(config.theme(), "dark");
        assert_eq!(config.swipe_threshold(), 80.0);
        assert_eq!(config.start_slide(), Some(3));
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "neon").is_err());
        assert!(config.set("defaults.swipe_threshold", "-5").is_err());
        assert!(config.set("defaults.swipe_threshold", "wide").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.defaults.is_none());
    }

    #[test]
    fn test_hand_edited_threshold_falls_back() {
        for yaml in [
            "defaults:\n  swipe_threshold: -20\n",
            "defaults:\n  swipe_threshold: 0\n",
            "defaults:\n  swipe_threshold: .nan\n",
            "defaults:\n  swipe_threshold: .inf\n",
        ] {
            let config: Config = serde_yaml::from_str(yaml).unwrap();
            assert_eq!(config.swipe_threshold(), SWIPE_THRESHOLD, "{yaml}");
        }

        let config: Config = serde_yaml::from_str("defaults:\n  swipe_threshold: 75\n").unwrap();
        assert_eq!(config.swipe_threshold(), 75.0);
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        let err = config.set("defaults.transition", "fade").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("slideshow-config-{}", std::process::id()));
        let path = dir.join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.swipe_threshold", "64").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme(), "dark");
        assert_eq!(loaded.swipe_threshold(), 64.0);
        assert_eq!(loaded.start_slide(), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_message() {
        let path = std::env::temp_dir().join("slideshow-does-not-exist/config.yaml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
