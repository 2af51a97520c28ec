//! Configuration for the Extractor

use pomotask_domain::task::DEFAULT_MAX_TITLE_LENGTH;
use pomotask_domain::{CompletionOptions, ExtractionKind};
use serde::{Deserialize, Serialize};

/// Sampling settings for one extraction kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindSettings {
    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl KindSettings {
    /// Options passed to the provider
    pub fn options(&self) -> CompletionOptions {
        CompletionOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    fn validate(&self, kind: ExtractionKind) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err(format!("{}.max_tokens must be greater than 0", kind));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "{}.temperature must be between 0.0 and 2.0 (got {})",
                kind, self.temperature
            ));
        }
        Ok(())
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Longest accepted task title (characters)
    pub max_title_length: usize,

    /// Settings for metadata extraction
    pub metadata: KindSettings,

    /// Settings for category classification
    pub category: KindSettings,

    /// Settings for motivational quotes
    pub quote: KindSettings,
}

impl ExtractorConfig {
    /// Settings for one extraction kind
    pub fn settings(&self, kind: ExtractionKind) -> KindSettings {
        match kind {
            ExtractionKind::Metadata => self.metadata,
            ExtractionKind::Category => self.category,
            ExtractionKind::Quote => self.quote,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_title_length == 0 {
            return Err("max_title_length must be greater than 0".to_string());
        }
        self.metadata.validate(ExtractionKind::Metadata)?;
        self.category.validate(ExtractionKind::Category)?;
        self.quote.validate(ExtractionKind::Quote)?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
            metadata: KindSettings {
                max_tokens: 100,
                temperature: 0.3,
            },
            category: KindSettings {
                max_tokens: 200,
                temperature: 0.2,
            },
            quote: KindSettings {
                max_tokens: 60,
                temperature: 0.9,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_title_length, 50);
        assert_eq!(config.metadata.max_tokens, 100);
        assert_eq!(config.metadata.temperature, 0.3);
    }

    #[test]
    fn test_settings_per_kind() {
        let config = ExtractorConfig::default();
        assert_eq!(config.settings(ExtractionKind::Category), config.category);
        assert_eq!(config.settings(ExtractionKind::Quote).options().max_tokens, 60);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ExtractorConfig::default();
        config.max_title_length = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.quote.max_tokens = 0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("quote.max_tokens"));

        let mut config = ExtractorConfig::default();
        config.category.temperature = 3.5;
        assert!(config.validate().unwrap_err().contains("category.temperature"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml(
            r#"
            max_title_length = 80

            [quote]
            max_tokens = 40
            temperature = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.max_title_length, 80);
        assert_eq!(config.quote.max_tokens, 40);
        assert_eq!(config.metadata, ExtractorConfig::default().metadata);
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let err = ExtractorConfig::from_toml("max_title_length = \"long\"").unwrap_err();
        assert!(err.starts_with("Failed to parse TOML"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
