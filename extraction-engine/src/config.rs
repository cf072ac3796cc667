use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, ExtractionResult};

/// Structured-extraction provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AiProvider {
    /// OpenAI chat-completions API
    OpenAi {
        api_url: String,
        api_key: String,
        model: String,
    },
    /// Google Gemini generateContent API
    Gemini {
        api_url: String,
        api_key: String,
        model: String,
    },
}

impl AiProvider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi { .. } => "openai",
            Self::Gemini { .. } => "gemini",
        }
    }
}

/// Extraction engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// AI provider, or `None` to run the heuristic path only
    pub provider: Option<AiProvider>,
    /// Upper bound on one AI extraction call, in seconds
    pub ai_timeout_secs: u64,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// `SCRIBE_AI_PROVIDER` selects `openai`, `gemini` or `none`; when unset,
    /// the provider is auto-detected from whichever API key is present. An
    /// explicitly selected provider with a missing key is a hard error so the
    /// service never starts silently degraded.
    pub fn from_env() -> ExtractionResult<Self> {
        let ai_timeout_secs = std::env::var("SCRIBE_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        let provider = if let Ok(provider_type) = std::env::var("SCRIBE_AI_PROVIDER") {
            match provider_type.to_lowercase().as_str() {
                "openai" => Some(Self::openai_from_env()?),
                "gemini" => Some(Self::gemini_from_env()?),
                "none" => None,
                _ => {
                    return Err(ExtractionError::Config(format!(
                        "Unknown AI provider: {}",
                        provider_type
                    )))
                }
            }
        } else if std::env::var("OPENAI_API_KEY").is_ok() {
            Some(Self::openai_from_env()?)
        } else if std::env::var("GOOGLE_API_KEY").is_ok() {
            Some(Self::gemini_from_env()?)
        } else {
            None
        };

        Ok(Self {
            provider,
            ai_timeout_secs,
        })
    }

    fn openai_from_env() -> ExtractionResult<AiProvider> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ExtractionError::Config("OPENAI_API_KEY environment variable not set".to_string())
            })?;
        Ok(AiProvider::OpenAi {
            api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1".to_string()),
        })
    }

    fn gemini_from_env() -> ExtractionResult<AiProvider> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ExtractionError::Config("GOOGLE_API_KEY environment variable not set".to_string())
            })?;
        Ok(AiProvider::Gemini {
            api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: None,
            ai_timeout_secs: 20,
        }
    }
}
