//! Google Gemini provider
//!
//! Calls the `generateContent` endpoint with the instruction and prompt as a
//! single content part and returns the candidate text verbatim.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AiProvider;
use crate::error::{ExtractionError, ExtractionResult};
use crate::providers::{build_prompt, StructuredExtractor, EXTRACTION_INSTRUCTIONS};
use crate::record::PatientRecord;

pub struct GeminiExtractor {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiExtractor {
    pub fn new(config: &AiProvider) -> ExtractionResult<Self> {
        let AiProvider::Gemini {
            api_url,
            api_key,
            model,
        } = config
        else {
            return Err(ExtractionError::Config(
                "GeminiExtractor requires a gemini provider configuration".to_string(),
            ));
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.clone(),
            model: model.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl StructuredExtractor for GeminiExtractor {
    async fn extract_structured(
        &self,
        utterance: &str,
        current: &PatientRecord,
    ) -> ExtractionResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!(
                        "{}\n\n{}",
                        EXTRACTION_INSTRUCTIONS,
                        build_prompt(utterance, current)
                    ),
                }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Provider(format!(
                "Gemini error {}: {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response.json().await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                ExtractionError::Provider("Gemini response contained no candidates".to_string())
            })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
