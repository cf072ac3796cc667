//! Clinical vocabulary for the heuristic extraction pass
//!
//! Fixed keyword lists the synchronous extractor scans for. Kept deliberately
//! small: anything outside these lists is the AI pass's job.

/// Keyword vocabulary for symptom and test spotting
pub struct ClinicalVocabulary;

impl ClinicalVocabulary {
    /// Symptom phrases matched as substrings of the lower-cased utterance
    pub const SYMPTOMS: &'static [&'static str] = &[
        "fever",
        "cough",
        "cold",
        "pain",
        "headache",
        "vomit",
        "nausea",
        "fatigue",
        "weakness",
        "breathlessness",
        "sore throat",
        "diarrhea",
    ];

    /// Test phrases matched as substrings of the lower-cased utterance
    pub const TESTS: &'static [&'static str] = &[
        "cbc",
        "blood test",
        "x-ray",
        "mri",
        "ct",
        "urine test",
        "ecg",
        "lipid profile",
        "lft",
        "kft",
        "thyroid",
        "vitamin d",
        "rtpcr",
    ];

    /// Map dosing-frequency marker words to a canonical frequency label
    pub fn frequency_for(text: &str) -> Option<&'static str> {
        if text.contains("once") || text.contains("qd") {
            Some("Once daily")
        } else if text.contains("twice") || text.contains("bd") {
            Some("Twice daily")
        } else if text.contains("thrice") || text.contains("tid") {
            Some("Thrice daily")
        } else {
            None
        }
    }
}

/// Title-case a phrase, capitalizing after spaces and hyphens
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch == ' ' || ch == '-';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_markers_map_to_labels() {
        assert_eq!(ClinicalVocabulary::frequency_for("take twice daily"), Some("Twice daily"));
        assert_eq!(ClinicalVocabulary::frequency_for("1 tab qd"), Some("Once daily"));
        assert_eq!(ClinicalVocabulary::frequency_for("with meals"), None);
    }

    #[test]
    fn title_case_handles_hyphens() {
        assert_eq!(title_case("x-ray"), "X-Ray");
        assert_eq!(title_case("viral fever"), "Viral Fever");
    }
}
