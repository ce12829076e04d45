use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8880/v1/audio/speech";
pub const DEFAULT_MODEL: &str = "kokoro";
pub const DEFAULT_VOICE: &str = "af_heart";
pub const DEFAULT_FORMAT: &str = "mp3";
pub const DEFAULT_CLIPS_DIR: &str = "~/.cache/markdown-readaloud/clips";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where narrated sentence clips are written.
    pub clips_dir: PathBuf,
    pub speech: SpeechConfig,
}

/// OpenAI-compatible speech endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub endpoint: String,
    pub model: String,
    pub voice: String,
    pub speed: f32,
    pub format: String,
    /// Sent as a bearer token. May reference an environment variable,
    /// e.g. `"$OPENAI_API_KEY"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clips_dir: PathBuf::from(DEFAULT_CLIPS_DIR),
            speech: SpeechConfig::default(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            speed: 1.0,
            format: DEFAULT_FORMAT.to_string(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config.expanded()))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The saved configuration, or the defaults when there is no file yet.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_else(|| Self::default().expanded()))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-readaloud");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands tilde and shell variables in paths and the API key.
    ///
    /// A key naming an unset variable is dropped rather than sent verbatim.
    pub fn expanded(mut self) -> Self {
        self.clips_dir = Self::expand_path(&self.clips_dir).unwrap_or(self.clips_dir);
        self.speech.api_key = self
            .speech
            .api_key
            .as_deref()
            .and_then(|key| shellexpand::full(key).ok())
            .map(|key| key.into_owned())
            .filter(|key| !key.is_empty());
        self
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-readaloud/config.toml"));
    }

    #[test]
    fn test_defaults_target_local_kokoro() {
        let config = Config::default();

        assert_eq!(config.speech.endpoint, "http://localhost:8880/v1/audio/speech");
        assert_eq!(config.speech.model, "kokoro");
        assert_eq!(config.speech.voice, "af_heart");
        assert_eq!(config.speech.speed, 1.0);
        assert_eq!(config.speech.format, "mp3");
        assert_eq!(config.speech.api_key, None);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            clips_dir: PathBuf::from("/tmp/clips"),
            speech: SpeechConfig {
                voice: "bf_emma".into(),
                speed: 1.25,
                api_key: Some("sk-test".into()),
                ..SpeechConfig::default()
            },
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("[speech]\nvoice = \"am_adam\"\n").unwrap();

        assert_eq!(config.speech.voice, "am_adam");
        assert_eq!(config.speech.model, "kokoro");
        assert_eq!(config.clips_dir, PathBuf::from(DEFAULT_CLIPS_DIR));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("READALOUD_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$READALOUD_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("READALOUD_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_api_key_from_env_var() {
        unsafe {
            env::set_var("READALOUD_TEST_KEY", "sk-from-env");
        }

        let config: Config = toml::from_str("[speech]\napi_key = \"$READALOUD_TEST_KEY\"\n").unwrap();

        assert_eq!(config.expanded().speech.api_key.as_deref(), Some("sk-from-env"));

        unsafe {
            env::remove_var("READALOUD_TEST_KEY");
        }
    }

    #[test]
    fn test_api_key_with_unset_env_var_is_dropped() {
        let config: Config =
            toml::from_str("[speech]\napi_key = \"$READALOUD_UNSET_KEY_VAR\"\n").unwrap();

        assert_eq!(config.expanded().speech.api_key, None);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "speech = 3").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/dir/config.toml");
        let test_config = Config {
            clips_dir: PathBuf::from("/tmp/test-clips"),
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
