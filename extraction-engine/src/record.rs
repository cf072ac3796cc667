use serde::{Deserialize, Serialize};

/// One prescribed medicine, keyed by case-insensitive name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dose: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// One ordered medical test, keyed by case-insensitive name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalTest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// The canonical per-session patient record
///
/// Absent scalars serialize as `null`, absent lists as `[]`, so the broadcast
/// JSON shape is stable from the first utterance on. Mutated exclusively
/// through the merge engine via [`crate::SessionRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub doctor_name: Option<String>,
    pub checkup_date: Option<String>,
    pub checkup_details: Option<String>,
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineEntry>,
    #[serde(default)]
    pub medical_tests: Vec<MedicalTest>,
}

/// A sparse update produced by one extractor pass over one utterance
///
/// Fields an extractor has no opinion on are absent, which is distinct from
/// an explicit empty value: absent means "leave the record alone", while an
/// empty string survives deserialization but is dropped during
/// [`normalized`](PartialRecord::normalized).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkup_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkup_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicines: Option<Vec<MedicineEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_tests: Option<Vec<MedicalTest>>,
}

/// Trim a scalar candidate, mapping whitespace-only input to absent
pub(crate) fn normalize_scalar(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl MedicineEntry {
    /// Case-insensitive dedup key; empty means the entry is unusable
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            dose: self.dose.as_deref().and_then(normalize_scalar),
            frequency: self.frequency.as_deref().and_then(normalize_scalar),
            duration: self.duration.as_deref().and_then(normalize_scalar),
        }
    }
}

impl MedicalTest {
    /// Case-insensitive dedup key; empty means the entry is unusable
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            details: self.details.as_deref().and_then(normalize_scalar),
        }
    }
}

impl PartialRecord {
    /// True when this partial contributes nothing to a merge
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// True when any scalar field carries a usable value
    pub fn has_scalars(&self) -> bool {
        [
            &self.patient_name,
            &self.age,
            &self.gender,
            &self.doctor_name,
            &self.checkup_date,
            &self.checkup_details,
            &self.diagnosis,
        ]
        .iter()
        .any(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    /// Coerce boundary input into merge-ready form
    ///
    /// Trims every string, drops empty scalars back to absent, and discards
    /// keyed entries whose name is blank. Applied once where untrusted data
    /// enters (the AI adapter); the merge engine can then assume clean input.
    pub fn normalized(self) -> Self {
        Self {
            patient_name: self.patient_name.as_deref().and_then(normalize_scalar),
            age: self.age.as_deref().and_then(normalize_scalar),
            gender: self.gender.as_deref().and_then(normalize_scalar),
            doctor_name: self.doctor_name.as_deref().and_then(normalize_scalar),
            checkup_date: self.checkup_date.as_deref().and_then(normalize_scalar),
            checkup_details: self.checkup_details.as_deref().and_then(normalize_scalar),
            diagnosis: self.diagnosis.as_deref().and_then(normalize_scalar),
            symptoms: self.symptoms.map(|items| {
                items
                    .iter()
                    .filter_map(|s| normalize_scalar(s))
                    .collect()
            }),
            notes: self.notes.map(|items| {
                items
                    .iter()
                    .filter_map(|s| normalize_scalar(s))
                    .collect()
            }),
            medicines: self.medicines.map(|items| {
                items
                    .into_iter()
                    .map(MedicineEntry::normalized)
                    .filter(|m| !m.name.is_empty())
                    .collect()
            }),
            medical_tests: self.medical_tests.map(|items| {
                items
                    .into_iter()
                    .map(MedicalTest::normalized)
                    .filter(|t| !t.name.is_empty())
                    .collect()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_serializes_nulls_and_empty_lists() {
        let json = serde_json::to_value(PatientRecord::default()).unwrap();
        assert_eq!(json["patient_name"], serde_json::Value::Null);
        assert_eq!(json["diagnosis"], serde_json::Value::Null);
        assert_eq!(json["symptoms"], serde_json::json!([]));
        assert_eq!(json["medicines"], serde_json::json!([]));
    }

    #[test]
    fn partial_skips_absent_fields() {
        let partial = PartialRecord {
            diagnosis: Some("Viral Fever".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&partial).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["diagnosis"], "Viral Fever");
    }

    #[test]
    fn normalization_drops_blank_scalars_and_nameless_entries() {
        let partial = PartialRecord {
            patient_name: Some("  ".to_string()),
            age: Some(" 45 ".to_string()),
            medicines: Some(vec![
                MedicineEntry {
                    name: "   ".to_string(),
                    dose: Some("500 mg".to_string()),
                    ..Default::default()
                },
                MedicineEntry {
                    name: " Paracetamol ".to_string(),
                    dose: Some("".to_string()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        }
        .normalized();

        assert_eq!(partial.patient_name, None);
        assert_eq!(partial.age.as_deref(), Some("45"));
        let meds = partial.medicines.unwrap();
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].name, "Paracetamol");
        assert_eq!(meds[0].dose, None);
    }

    #[test]
    fn has_scalars_ignores_lists_and_blank_values() {
        let lists_only = PartialRecord {
            symptoms: Some(vec!["fever".to_string()]),
            notes: Some(vec!["follow up".to_string()]),
            ..Default::default()
        };
        assert!(!lists_only.has_scalars());

        let blank = PartialRecord {
            diagnosis: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!blank.has_scalars());

        let scalar = PartialRecord {
            age: Some("45".to_string()),
            ..Default::default()
        };
        assert!(scalar.has_scalars());
    }

    #[test]
    fn partial_deserializes_unknown_and_missing_fields() {
        let partial: PartialRecord =
            serde_json::from_str(r#"{"diagnosis":"flu","confidence":0.9}"#).unwrap();
        assert_eq!(partial.diagnosis.as_deref(), Some("flu"));
        assert!(partial.symptoms.is_none());
    }
}
