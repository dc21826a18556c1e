use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ExtractorConfig;

#[derive(Clone)]
pub struct OllamaClient {
    url: String,
    model: String,
    temperature: f32,
    json_format: bool,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>, // "json" for structured output
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            url: config.generate_url(),
            model: config.model.clone(),
            temperature: config.temperature,
            json_format: config.json_format,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One non-streaming generate call; returns the raw `response` string.
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let request = OllamaRequest {
            model: &self.model,
            system,
            prompt,
            stream: false,
            format: self.json_format.then_some("json"),
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        debug!(
            url = %self.url,
            model = %self.model,
            prompt_length = prompt.len(),
            "Sending generate request"
        );

        let response = self.client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            anyhow::bail!("Ollama request failed: {}", response.status());
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        debug!(
            response_length = ollama_response.response.len(),
            "Received response from Ollama"
        );

        Ok(ollama_response.response)
    }
}
