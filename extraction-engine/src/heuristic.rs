//! Synchronous pattern-based extraction pass
//!
//! Runs on every inbound utterance before anything is sent to an AI provider,
//! so the client sees a record update within the same receive cycle. Every
//! rule is evaluated independently; a rule that finds nothing simply leaves
//! its field out of the returned partial. This pass never fails.

use lazy_static::lazy_static;
use regex::Regex;

use crate::record::{MedicalTest, MedicineEntry, PartialRecord, PatientRecord};
use crate::vocabulary::{title_case, ClinicalVocabulary};

lazy_static! {
    static ref NAME_RE: Regex =
        Regex::new(r"(?:patient\s*name(?:\s*is)?|name\s*is)\s*[:\-]?\s*([a-z][a-z ]*)").unwrap();
    static ref AGE_RE: Regex = Regex::new(r"\b(\d{1,3})\s*(?:years?|yrs?)\b").unwrap();
    static ref DIAG_RE: Regex =
        Regex::new(r"(?:diagnosis|impression|dx)\s*[:\-]\s*([a-z][a-z \-]*)").unwrap();
    static ref MED_MARKER_RE: Regex =
        Regex::new(r"\b(?:mg|ml|tablets?|tabs?|capsules?|once|twice|thrice|qd|bd|tid)\b").unwrap();
    static ref DOSE_RE: Regex = Regex::new(r"(\d+)\s*(mg|ml)\b").unwrap();
    static ref NAMED_DOSE_RE: Regex = Regex::new(r"\b([a-z]{3,})\s*(\d+)\s*(mg|ml)\b").unwrap();
    static ref WORD_RE: Regex = Regex::new(r"[a-z]{3,}").unwrap();
}

/// Words that can never be a medicine name candidate
const MED_STOPWORDS: &[&str] = &[
    "take", "takes", "taking", "give", "given", "start", "started", "prescribe", "prescribed",
    "patient", "daily", "days", "week", "weeks", "with", "and", "the", "for", "after", "before",
    "food", "meals", "every", "once", "twice", "thrice", "tablet", "tablets", "tab", "tabs",
    "capsule", "capsules",
];

/// Derive a partial update from one utterance using fixed patterns only
///
/// Matching is case-insensitive (the utterance is lower-cased up front) and
/// `current` is consulted only to avoid re-reporting symptoms and tests the
/// record already holds.
pub fn extract(utterance: &str, current: &PatientRecord) -> PartialRecord {
    let text = utterance.to_lowercase();
    let mut out = PartialRecord::default();

    if let Some(caps) = NAME_RE.captures(&text) {
        let candidate = caps[1].trim();
        if !candidate.is_empty() && candidate.len() <= 40 {
            out.patient_name = Some(title_case(candidate));
        }
    }

    if let Some(caps) = AGE_RE.captures(&text) {
        out.age = Some(caps[1].to_string());
    }

    // Checked in this order because "female" contains "male"
    if text.contains("female") {
        out.gender = Some("Female".to_string());
    } else if text.contains("male") {
        out.gender = Some("Male".to_string());
    }

    let symptoms: Vec<String> = ClinicalVocabulary::SYMPTOMS
        .iter()
        .filter(|word| text.contains(*word))
        .filter(|word| !current.symptoms.iter().any(|s| s.eq_ignore_ascii_case(word)))
        .map(|word| word.to_string())
        .collect();
    if !symptoms.is_empty() {
        out.symptoms = Some(symptoms);
    }

    if let Some(caps) = DIAG_RE.captures(&text) {
        let candidate = caps[1].trim();
        if !candidate.is_empty() {
            out.diagnosis = Some(title_case(candidate));
        }
    }

    if MED_MARKER_RE.is_match(&text) {
        if let Some(medicine) = extract_medicine(&text) {
            out.medicines = Some(vec![medicine]);
        }
    }

    let tests: Vec<MedicalTest> = ClinicalVocabulary::TESTS
        .iter()
        .filter(|word| text.contains(*word))
        .filter(|word| {
            !current
                .medical_tests
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(word))
        })
        .map(|word| MedicalTest {
            name: title_case(word),
            details: None,
        })
        .collect();
    if !tests.is_empty() {
        out.medical_tests = Some(tests);
    }

    out
}

/// Pick a medicine name, dose and frequency out of a dosing utterance
///
/// A word directly in front of a dose token is the strongest name signal;
/// failing that, the first alphabetic run of three or more characters that is
/// not a dosing stopword is used.
fn extract_medicine(text: &str) -> Option<MedicineEntry> {
    let mut name = None;
    let mut dose = None;

    for caps in NAMED_DOSE_RE.captures_iter(text) {
        let candidate = &caps[1];
        if !MED_STOPWORDS.contains(&candidate) {
            name = Some(title_case(candidate));
            dose = Some(format!("{} {}", &caps[2], &caps[3]));
            break;
        }
    }

    if dose.is_none() {
        if let Some(caps) = DOSE_RE.captures(text) {
            dose = Some(format!("{} {}", &caps[1], &caps[2]));
        }
    }

    if name.is_none() {
        name = WORD_RE
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|word| {
                !MED_STOPWORDS.contains(word) && !ClinicalVocabulary::SYMPTOMS.contains(word)
            })
            .map(title_case);
    }

    let name = name?;
    Some(MedicineEntry {
        name,
        dose,
        frequency: ClinicalVocabulary::frequency_for(text).map(str::to_string),
        duration: None,
    })
}
