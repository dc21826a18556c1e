pub mod config;
pub mod llm;
pub mod prompt;
pub mod schema;

pub use config::ExtractorConfig;
pub use llm::OllamaClient;
pub use schema::ExtractionResult;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Result of one extraction call.
///
/// Both variants carry the three-list result, so callers that only want the
/// data can use [`ExtractionOutcome::into_result`] and ignore failures.
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// The model answered with parseable JSON.
    Extracted(ExtractionResult),
    /// The call failed somewhere; `result` is the empty fallback.
    Fallback {
        error: anyhow::Error,
        result: ExtractionResult,
    },
}

impl ExtractionOutcome {
    pub fn result(&self) -> &ExtractionResult {
        match self {
            Self::Extracted(result) => result,
            Self::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> ExtractionResult {
        match self {
            Self::Extracted(result) => result,
            Self::Fallback { result, .. } => result,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Extracted(_) => None,
            Self::Fallback { error, .. } => Some(error),
        }
    }
}

pub struct Extractor {
    llm_client: OllamaClient,
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Self {
            llm_client: OllamaClient::new(config)?,
        })
    }

    pub fn from_defaults() -> Result<Self> {
        Self::new(&ExtractorConfig::default())
    }

    pub fn model(&self) -> &str {
        self.llm_client.model()
    }

    /// Extract events, attributes and relations for one character.
    ///
    /// Never fails: any error is logged and replaced by the empty result.
    pub async fn extract_from_chunk(&self, text: &str, character_name: &str) -> ExtractionOutcome {
        match self.try_extract(text, character_name).await {
            Ok(result) => {
                info!(
                    character = character_name,
                    events = result.events.len(),
                    attributes = result.attributes.len(),
                    relations = result.relations.len(),
                    "Extracted narrative facts"
                );
                ExtractionOutcome::Extracted(result)
            }
            Err(error) => {
                let message = format!("{:#}", error);
                warn!(
                    character = character_name,
                    error = %message,
                    "Error connecting to Ollama, returning empty result"
                );
                ExtractionOutcome::Fallback {
                    error,
                    result: ExtractionResult::empty(),
                }
            }
        }
    }

    /// Same call as [`Extractor::extract_from_chunk`], but errors propagate.
    pub async fn try_extract(&self, text: &str, character_name: &str) -> Result<ExtractionResult> {
        let system = prompt::build_system_prompt(character_name);
        let user = prompt::build_user_prompt(text);

        let json_str = self.llm_client
            .generate(&system, &user)
            .await?;

        let result: ExtractionResult = serde_json::from_str(&json_str)
            .context("Failed to parse extraction result")?;

        Ok(result)
    }
}
