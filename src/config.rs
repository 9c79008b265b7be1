use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub stt: ProviderConfig,
    pub tts: ProviderConfig,
    pub llm: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let (stt, tts, llm) = default_services();
        Self {
            audio: AudioConfig::default(),
            stt,
            tts,
            llm,
        }
    }
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub vad_frame_ms: u32,
}

/// Which provider backend serves a given service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenAi,
    HuggingFace,
}

/// Configuration for one external service (STT, TTS, or LLM).
///
/// `key_env` names the environment variable holding the API key; the
/// key itself never lives in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub url: Option<String>,
    pub model: String,
    pub key_env: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
            vad_frame_ms: defaults::VAD_FRAME_MS,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            url: None,
            model: String::new(),
            key_env: "API_KEY".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> crate::error::Result<String> {
        match std::env::var(&self.key_env) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(crate::error::VocoachError::MissingApiKey {
                var: self.key_env.clone(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VOCOACH_STT_MODEL → stt.model
    /// - VOCOACH_TTS_MODEL → tts.model
    /// - VOCOACH_LLM_MODEL → llm.model
    /// - VOCOACH_SAMPLE_RATE → audio.sample_rate
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("VOCOACH_STT_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(model) = std::env::var("VOCOACH_TTS_MODEL")
            && !model.is_empty()
        {
            self.tts.model = model;
        }

        if let Ok(model) = std::env::var("VOCOACH_LLM_MODEL")
            && !model.is_empty()
        {
            self.llm.model = model;
        }

        if let Ok(rate) = std::env::var("VOCOACH_SAMPLE_RATE")
            && let Ok(rate) = rate.parse::<u32>()
        {
            self.audio.sample_rate = rate;
        }

        self
    }

    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(crate::error::VocoachError::ConfigInvalidValue {
                key: "audio.sample_rate".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if ![10, 20, 30].contains(&self.audio.vad_frame_ms) {
            return Err(crate::error::VocoachError::ConfigInvalidValue {
                key: "audio.vad_frame_ms".to_string(),
                message: "frame duration must be 10, 20, or 30 ms".to_string(),
            });
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/vocoach/config.toml on Linux
    #[cfg(feature = "cli")]
    pub fn default_path() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("vocoach")
            .join("config.toml")
    }
}

/// Defaults for the three service sections, applied when the config file
/// omits them entirely.
pub fn default_services() -> (ProviderConfig, ProviderConfig, ProviderConfig) {
    (
        ProviderConfig {
            kind: ProviderKind::OpenAi,
            url: None,
            model: "whisper-1".to_string(),
            key_env: "STT_KEY".to_string(),
        },
        ProviderConfig {
            kind: ProviderKind::OpenAi,
            url: None,
            model: "tts-1".to_string(),
            key_env: "TTS_KEY".to_string(),
        },
        ProviderConfig {
            kind: ProviderKind::OpenAi,
            url: None,
            model: "gpt-4o-mini".to_string(),
            key_env: "LLM_KEY".to_string(),
        },
    )
}
