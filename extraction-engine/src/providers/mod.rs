pub mod gemini;
pub mod openai;

use async_trait::async_trait;

use crate::config::AiProvider;
use crate::error::ExtractionResult;
use crate::record::{PartialRecord, PatientRecord};

/// Trait for AI-backed structured extraction providers
///
/// Implementations return the model's raw text; decoding it into a partial
/// update is done centrally by [`parse_partial`] so every provider gets the
/// same malformed-output tolerance.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    /// Ask the model for a partial record update derived from one utterance
    async fn extract_structured(
        &self,
        utterance: &str,
        current: &PatientRecord,
    ) -> ExtractionResult<String>;

    /// Short provider label for logs
    fn name(&self) -> &'static str;
}

/// Create a provider instance based on configuration
pub fn create_provider(config: &AiProvider) -> ExtractionResult<Box<dyn StructuredExtractor>> {
    match config {
        AiProvider::OpenAi { .. } => Ok(Box::new(openai::OpenAiExtractor::new(config)?)),
        AiProvider::Gemini { .. } => Ok(Box::new(gemini::GeminiExtractor::new(config)?)),
    }
}

/// Outcome of decoding a provider's raw response
///
/// Malformed output is an expected condition, not an error: it contributes
/// nothing to the record and the session carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum AiExtraction {
    Parsed(PartialRecord),
    Malformed,
}

impl AiExtraction {
    /// Collapse to a partial update, treating malformed output as empty
    pub fn into_partial(self) -> PartialRecord {
        match self {
            Self::Parsed(partial) => partial,
            Self::Malformed => PartialRecord::default(),
        }
    }
}

/// Decode untrusted model output into a partial update
///
/// Chat models routinely wrap JSON in prose. A direct parse is tried first;
/// failing that, the substring between the first `{` and the last `}` is
/// parsed; failing that too, the output is malformed.
pub fn parse_partial(raw: &str) -> AiExtraction {
    if let Ok(partial) = serde_json::from_str::<PartialRecord>(raw) {
        return AiExtraction::Parsed(partial.normalized());
    }

    let start = raw.find('{');
    let end = raw.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Some(candidate) = raw.get(start..=end) {
                if let Ok(partial) = serde_json::from_str::<PartialRecord>(candidate) {
                    return AiExtraction::Parsed(partial.normalized());
                }
            }
        }
    }

    AiExtraction::Malformed
}

/// Instruction sent to every provider together with the utterance
pub(crate) const EXTRACTION_INSTRUCTIONS: &str = "You are a clinical scribe assistant. \
Extract structured patient data from the latest utterance of a live consultation. \
Respond with a single JSON object using only these keys: patient_name, age, gender, \
doctor_name, checkup_date, checkup_details, diagnosis, symptoms (array of strings), \
notes (array of strings), medicines (array of {name, dose, frequency, duration}), \
medical_tests (array of {name, details}). Include only fields the utterance supports. \
Respond with JSON only, no commentary.";

/// Compose the user-facing prompt from the utterance and the record so far
pub(crate) fn build_prompt(utterance: &str, current: &PatientRecord) -> String {
    let current_json =
        serde_json::to_string(current).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Current patient record:\n{}\n\nLatest utterance:\n{}",
        current_json, utterance
    )
}
