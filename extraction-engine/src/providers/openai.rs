//! OpenAI chat-completions provider
//!
//! Sends the extraction instruction as the system message and the utterance
//! plus record snapshot as the user message, and returns the assistant text
//! verbatim for central lenient decoding.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AiProvider;
use crate::error::{ExtractionError, ExtractionResult};
use crate::providers::{build_prompt, StructuredExtractor, EXTRACTION_INSTRUCTIONS};
use crate::record::PatientRecord;

pub struct OpenAiExtractor {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiExtractor {
    pub fn new(config: &AiProvider) -> ExtractionResult<Self> {
        let AiProvider::OpenAi {
            api_url,
            api_key,
            model,
        } = config
        else {
            return Err(ExtractionError::Config(
                "OpenAiExtractor requires an openai provider configuration".to_string(),
            ));
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            api_url: api_url.clone(),
            api_key: api_key.clone(),
            model: model.clone(),
        })
    }
}

#[async_trait]
impl StructuredExtractor for OpenAiExtractor {
    async fn extract_structured(
        &self,
        utterance: &str,
        current: &PatientRecord,
    ) -> ExtractionResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_INSTRUCTIONS.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(utterance, current),
                },
            ],
            max_tokens: 500,
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Provider(format!(
                "OpenAI error {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ExtractionError::Provider("OpenAI response contained no choices".to_string())
            })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
