use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::typing::{Timings, DEFAULT_DELETING_MS, DEFAULT_PAUSE_MS, DEFAULT_TYPING_MS};

/// Roles cycled on the hero banner when no phrases are configured
const DEFAULT_PHRASES: &[&str] = &[
    "BCA Student",
    "Aspiring Software Engineer",
    "Python Dev",
    "DevOps Engineer Enthusiast",
    "Full-Stack Developer",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Phrases typed on the role line, in order
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,

    #[serde(default = "default_typing_speed")]
    pub typing_speed_ms: u64,

    #[serde(default = "default_deleting_speed")]
    pub deleting_speed_ms: u64,

    /// Dwell after a phrase is fully typed
    #[serde(default = "default_pause")]
    pub pause_ms: u64,

    #[serde(default)]
    pub hero: HeroContent,

    #[serde(default)]
    pub theme: ThemeColors,
}

/// Static text around the typed line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub name: String,
    pub badge: String,
    pub tagline: String,
}

/// Optional color overrides (`#RRGGBB` or `#RGB`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caret: Option<String>,
}

fn default_phrases() -> Vec<String> {
    DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect()
}

fn default_typing_speed() -> u64 {
    DEFAULT_TYPING_MS
}

fn default_deleting_speed() -> u64 {
    DEFAULT_DELETING_MS
}

fn default_pause() -> u64 {
    DEFAULT_PAUSE_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            phrases: default_phrases(),
            typing_speed_ms: DEFAULT_TYPING_MS,
            deleting_speed_ms: DEFAULT_DELETING_MS,
            pause_ms: DEFAULT_PAUSE_MS,
            hero: HeroContent::default(),
            theme: ThemeColors::default(),
        }
    }
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            name: "Sulthan Basha".to_string(),
            badge: "Available for opportunities".to_string(),
            tagline: "Class Representative | Self-learner in Web Development & DevOps | \
                      District-level Volleyball Player\n\
                      Passionate about building scalable applications and automating \
                      deployments, combining modern web technologies with DevOps practices \
                      to create seamless digital experiences."
                .to_string(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("heroline");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or create it
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Ok(Self::load_from(&path)),
            Err(_) => Ok(AppConfig::default()),
        }
    }

    /// Load config from `path`, falling back to defaults.
    ///
    /// A missing file is written out with defaults so users have something to edit.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
            }
            return AppConfig::default();
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        config
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn timings(&self) -> Timings {
        Timings::from_millis(self.typing_speed_ms, self.deleting_speed_ms, self.pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            phrases: vec!["Go".to_string(), "Dev".to_string()],
            typing_speed_ms: 80,
            deleting_speed_ms: 40,
            pause_ms: 1500,
            hero: HeroContent {
                name: "Ada".to_string(),
                badge: String::new(),
                tagline: "Engines".to_string(),
            },
            theme: ThemeColors {
                accent: Some("#ffc107".to_string()),
                ..Default::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.phrases, deserialized.phrases);
        assert_eq!(config.pause_ms, deserialized.pause_ms);
        assert_eq!(config.hero.name, deserialized.hero.name);
        assert_eq!(config.theme.accent, deserialized.theme.accent);
        assert!(deserialized.theme.caret.is_none());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: AppConfig = toml::from_str("pause_ms = 0\n").unwrap();

        assert_eq!(config.pause_ms, 0);
        assert_eq!(config.typing_speed_ms, 100);
        assert_eq!(config.deleting_speed_ms, 50);
        assert_eq!(config.phrases.len(), 5);
        assert_eq!(config.hero.name, "Sulthan Basha");
    }

    #[test]
    fn test_explicit_empty_phrases_are_kept() {
        let config: AppConfig = toml::from_str("phrases = []\n").unwrap();
        assert!(config.phrases.is_empty());
    }

    #[test]
    fn test_timings_from_config() {
        let config = AppConfig::default();
        let timings = config.timings();

        assert_eq!(timings.typing, Duration::from_millis(100));
        assert_eq!(timings.deleting, Duration::from_millis(50));
        assert_eq!(timings.pause, Duration::from_millis(2000));
    }

    #[test]
    fn test_load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let created = AppConfig::load_from(&path);
        assert!(path.exists());

        let loaded = AppConfig::load_from(&path);
        assert_eq!(created.phrases, loaded.phrases);

        std::fs::write(&path, "phrases = [").unwrap();
        let fallback = AppConfig::load_from(&path);
        assert_eq!(fallback.phrases.len(), 5);
    }

    #[test]
    fn test_default_hero_matches_banner() {
        let hero = HeroContent::default();

        assert_eq!(hero.name, "Sulthan Basha");
        assert!(hero.tagline.starts_with("Class Representative | Self-learner"));
        assert!(hero.tagline.contains("District-level Volleyball Player\nPassionate"));
        assert!(hero.tagline.ends_with("seamless digital experiences."));
    }
}
