//! Configuration file parsing for the server.
//!
//! Loads the bind address, the chat-completions endpoint and the extractor
//! settings from TOML. Every section is optional.

use pomotask_extractor::ExtractorConfig;
use pomotask_llm::chat::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// Upstream model settings
    pub llm: LlmConfig,

    /// Pipeline settings
    pub extractor: ExtractorConfig,
}

/// Upstream chat-completions settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Full URL of the chat-completions route
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Environment variable holding the bearer token
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "HF_TOKEN".to_string(),
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// An unset or empty variable means unauthenticated requests.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            bind_port: 3000,
            llm: LlmConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that TOML parsing alone cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.endpoint must not be empty".to_string()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }
        self.extractor
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("extractor: {}", e)))
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            ..Default::default()
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 3000);
        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.llm.api_key_env, "HF_TOKEN");
        assert_eq!(config.extractor.max_title_length, 50);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000

            [llm]
            endpoint = "http://localhost:8000/v1/chat/completions"
            model = "local-model"
            api_key_env = "LOCAL_LLM_KEY"

            [extractor]
            max_title_length = 80

            [extractor.metadata]
            max_tokens = 120
            temperature = 0.1
        "#;

        let config = ServerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.llm.model, "local-model");
        assert_eq!(config.llm.api_key_env, "LOCAL_LLM_KEY");
        assert_eq!(config.extractor.max_title_length, 80);
        assert_eq!(config.extractor.metadata.max_tokens, 120);
        assert_eq!(config.extractor.quote.max_tokens, 60);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.llm.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = ServerConfig::from_toml_str("[llm]\nmodel = \"\"");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = ServerConfig::from_toml_str("[extractor]\nmax_title_length = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(msg)) if msg.contains("max_title_length")));

        let result = ServerConfig::from_toml_str("bind_port = \"eighty\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_port = 4100").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_port, 4100);

        let missing = ServerConfig::from_file("/nonexistent/pomotask.toml");
        assert!(matches!(missing, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_api_key_from_env() {
        let config = LlmConfig {
            api_key_env: "POMOTASK_TEST_KEY_UNSET_1F3A".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
