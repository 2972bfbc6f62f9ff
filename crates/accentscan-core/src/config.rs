//! Configuration management for accentscan

use crate::error::ConfigError;
use accentscan_classify::{
    ClassifyError, OpenAiClassifier, OpenAiSettings, DEFAULT_BASE_URL, DEFAULT_MODEL,
    DEFAULT_VOICE,
};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Seconds of audio sent to the model
pub const DEFAULT_CLIP_SECONDS: f64 = 27.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub clip: ClipConfig,
    pub openai: OpenAiConfig,
    pub server: ServerConfig,
    pub temp: TempConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to FFmpeg binary (auto-detected if not set)
    pub ffmpeg: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Upper bound on the clip length in seconds (default: 27)
    pub max_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Audio-capable chat model
    pub model: String,
    /// Voice requested for the audio half of the reply
    pub voice: String,
    /// API key, normally taken from `OPENAI_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the web form listens on
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempConfig {
    /// Custom temp directory (uses system temp if not set)
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig { ffmpeg: None },
            clip: ClipConfig {
                max_seconds: DEFAULT_CLIP_SECONDS,
            },
            openai: OpenAiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                voice: DEFAULT_VOICE.to_string(),
                api_key: None,
            },
            server: ServerConfig {
                bind: "127.0.0.1:8501".to_string(),
            },
            temp: TempConfig { directory: None },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(path) = Self::default_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Nested keys use a double underscore: ACCENTSCAN_CLIP__MAX_SECONDS
        figment = figment
            .merge(Env::prefixed("ACCENTSCAN_").split("__"))
            .merge(
                Env::raw()
                    .only(&["OPENAI_API_KEY"])
                    .map(|_| "openai.api_key".into()),
            );

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/accentscan/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("accentscan/config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.clip.max_seconds.is_nan() || self.clip.max_seconds <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "clip.max_seconds must be positive, got {}",
                self.clip.max_seconds
            )));
        }
        Ok(())
    }

    /// Get FFmpeg path, auto-detecting if not configured
    pub fn ffmpeg_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.ffmpeg {
            Ok(path.clone())
        } else {
            which::which("ffmpeg")
                .map_err(|_| ConfigError::InvalidValue("ffmpeg not found in PATH".to_string()))
        }
    }

    /// Get temp directory
    pub fn temp_dir(&self) -> PathBuf {
        self.temp.directory.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn has_api_key(&self) -> bool {
        self.openai
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn openai_settings(&self) -> OpenAiSettings {
        OpenAiSettings {
            base_url: self.openai.base_url.clone(),
            model: self.openai.model.clone(),
            voice: self.openai.voice.clone(),
        }
    }

    /// Build the hosted-model client; fails when no API key is configured
    pub fn classifier(&self) -> Result<OpenAiClassifier, ClassifyError> {
        if !self.has_api_key() {
            return Err(ClassifyError::ApiKeyMissing);
        }
        let key = self.openai.api_key.clone().unwrap_or_default();
        Ok(OpenAiClassifier::new(
            SecretString::new(key),
            self.openai_settings(),
        ))
    }
}
