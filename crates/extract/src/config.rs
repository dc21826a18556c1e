use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for talking to the local inference server.
///
/// Fixed once the extractor is built; every call reuses them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Ollama server root, without the `/api/generate` path.
    pub base_url: String,
    pub model: String,
    /// Sampling temperature sent under `options.temperature`.
    pub temperature: f32,
    /// Ask the server to constrain its output to valid JSON.
    pub json_format: bool,
    /// `None` keeps the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            temperature: 0.1,
            json_format: true,
            request_timeout_secs: None,
        }
    }
}

impl ExtractorConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Parse a JSON config; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse extractor config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&content)
    }

    /// Full URL of the generate endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_ollama() {
        let config = ExtractorConfig::default();

        assert_eq!(config.model, "mistral");
        assert_eq!(config.generate_url(), "http://localhost:11434/api/generate");
        assert_eq!(config.temperature, 0.1);
        assert!(config.json_format);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ExtractorConfig::from_json(r#"{"model": "llama3", "temperature": 0.0}"#)
            .unwrap();

        assert_eq!(config.model, "llama3");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.base_url, "http://localhost:11434");
        assert!(config.json_format);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ExtractorConfig::from_json("model = llama3").is_err());
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = ExtractorConfig::default()
            .with_model("llama3")
            .with_base_url("http://10.0.0.5:11434")
            .with_timeout_secs(45);
        let path = std::env::temp_dir().join(format!(
            "extractor_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ExtractorConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.request_timeout_secs, Some(45));
    }

    #[test]
    fn test_from_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("extractor_config_does_not_exist.json");
        assert!(ExtractorConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let config = ExtractorConfig::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.generate_url(), "http://127.0.0.1:9000/api/generate");
    }
}
