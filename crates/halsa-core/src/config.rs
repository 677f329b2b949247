use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::Language;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub language: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// The backend base URL: `HALSA_BACKEND_URL` wins, then the config
    /// file. There is no built-in default; startup fails without one.
    pub fn resolve_backend_url(&self) -> Result<String> {
        std::env::var("HALSA_BACKEND_URL")
            .ok()
            .or_else(|| self.backend_url.clone())
            .ok_or_else(|| {
                anyhow!("no backend URL configured; set HALSA_BACKEND_URL or backend_url in the config file")
            })
    }

    /// The language to start in: the saved choice if valid, Swedish
    /// otherwise.
    pub fn startup_language(&self) -> Language {
        self.language
            .as_deref()
            .and_then(Language::from_str)
            .unwrap_or_default()
    }

    pub fn save_language(language: Language) -> Result<()> {
        let mut config = Self::load().unwrap_or_default();
        config.language = Some(language.as_str().to_string());
        config.save()
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("could not determine config directory"))?;
        Ok(config_dir.join("halsa").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.backend_url.is_none());
        assert!(config.language.is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            backend_url: Some("https://api.doktor.se".to_string()),
            language: Some("en".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.backend_url.as_deref(), Some("https://api.doktor.se"));
        assert_eq!(loaded.startup_language(), Language::En);
    }

    #[test]
    fn test_invalid_language_falls_back_to_swedish() {
        let config = Config {
            backend_url: None,
            language: Some("fi".to_string()),
        };
        assert_eq!(config.startup_language(), Language::Sv);
    }
}
