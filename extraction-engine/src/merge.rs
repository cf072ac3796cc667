//! Field-kind merge rules for folding a partial update into the record
//!
//! Three rules cover the whole schema: scalars overwrite only with a
//! non-empty value, ordered lists append unseen items, keyed lists update in
//! place by case-insensitive name. Nothing ever deletes, so repeated
//! application from any mix of sources is safe and idempotent.

use crate::record::{normalize_scalar, MedicalTest, MedicineEntry, PartialRecord, PatientRecord};

/// Whether a merge may touch scalar fields
///
/// List and keyed-list fields merge unconditionally because they only add;
/// scalars are skipped for AI partials that answer an utterance older than
/// the newest scalar merge, so a slow response cannot revert fresh values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarPolicy {
    Apply,
    Skip,
}

/// Fold `partial` into `base` under the per-field-kind rules
pub fn merge(base: &mut PatientRecord, partial: &PartialRecord, scalars: ScalarPolicy) {
    if scalars == ScalarPolicy::Apply {
        merge_scalar(&mut base.patient_name, &partial.patient_name);
        merge_scalar(&mut base.age, &partial.age);
        merge_scalar(&mut base.gender, &partial.gender);
        merge_scalar(&mut base.doctor_name, &partial.doctor_name);
        merge_scalar(&mut base.checkup_date, &partial.checkup_date);
        merge_scalar(&mut base.checkup_details, &partial.checkup_details);
        merge_scalar(&mut base.diagnosis, &partial.diagnosis);
    }

    if let Some(symptoms) = &partial.symptoms {
        merge_unique_list(&mut base.symptoms, symptoms);
    }
    if let Some(notes) = &partial.notes {
        merge_unique_list(&mut base.notes, notes);
    }
    if let Some(medicines) = &partial.medicines {
        merge_medicines(&mut base.medicines, medicines);
    }
    if let Some(tests) = &partial.medical_tests {
        merge_tests(&mut base.medical_tests, tests);
    }
}

/// A supplied non-empty value overwrites; absent or blank leaves base alone
fn merge_scalar(base: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming.as_deref().and_then(normalize_scalar) {
        *base = Some(value);
    }
}

/// Append items not already present by exact trimmed-string equality
fn merge_unique_list(base: &mut Vec<String>, incoming: &[String]) {
    for item in incoming {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !base.iter().any(|existing| existing.trim() == trimmed) {
            base.push(trimmed.to_string());
        }
    }
}

/// Update an existing entry's supplied sub-fields, or append a new entry
fn merge_medicines(base: &mut Vec<MedicineEntry>, incoming: &[MedicineEntry]) {
    for entry in incoming {
        let key = entry.key();
        if key.is_empty() {
            continue;
        }
        match base.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => {
                merge_scalar(&mut existing.dose, &entry.dose);
                merge_scalar(&mut existing.frequency, &entry.frequency);
                merge_scalar(&mut existing.duration, &entry.duration);
            }
            None => base.push(MedicineEntry {
                name: entry.name.trim().to_string(),
                dose: entry.dose.as_deref().and_then(normalize_scalar),
                frequency: entry.frequency.as_deref().and_then(normalize_scalar),
                duration: entry.duration.as_deref().and_then(normalize_scalar),
            }),
        }
    }
}

/// Same keyed rule as medicines, over the test list
fn merge_tests(base: &mut Vec<MedicalTest>, incoming: &[MedicalTest]) {
    for entry in incoming {
        let key = entry.key();
        if key.is_empty() {
            continue;
        }
        match base.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => {
                merge_scalar(&mut existing.details, &entry.details);
            }
            None => base.push(MedicalTest {
                name: entry.name.trim().to_string(),
                details: entry.details.as_deref().and_then(normalize_scalar),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial_with_scalars() -> PartialRecord {
        PartialRecord {
            patient_name: Some("Asha".to_string()),
            age: Some("30".to_string()),
            symptoms: Some(vec!["fever".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn merge_is_idempotent() {
        let partial = PartialRecord {
            diagnosis: Some("Viral Fever".to_string()),
            symptoms: Some(vec!["fever".to_string(), "cough".to_string()]),
            medicines: Some(vec![MedicineEntry {
                name: "Paracetamol".to_string(),
                dose: Some("500 mg".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let mut once = PatientRecord::default();
        merge(&mut once, &partial, ScalarPolicy::Apply);
        let mut twice = once.clone();
        merge(&mut twice, &partial, ScalarPolicy::Apply);

        assert_eq!(once, twice);
    }

    #[test]
    fn blank_scalars_never_regress_set_values() {
        let mut record = PatientRecord::default();
        merge(&mut record, &partial_with_scalars(), ScalarPolicy::Apply);

        let eraser = PartialRecord {
            patient_name: Some("".to_string()),
            age: Some("   ".to_string()),
            ..Default::default()
        };
        merge(&mut record, &eraser, ScalarPolicy::Apply);

        assert_eq!(record.patient_name.as_deref(), Some("Asha"));
        assert_eq!(record.age.as_deref(), Some("30"));
    }

    #[test]
    fn absent_scalars_leave_base_unchanged() {
        let mut record = PatientRecord::default();
        merge(&mut record, &partial_with_scalars(), ScalarPolicy::Apply);

        let unrelated = PartialRecord {
            diagnosis: Some("Migraine".to_string()),
            ..Default::default()
        };
        merge(&mut record, &unrelated, ScalarPolicy::Apply);

        assert_eq!(record.patient_name.as_deref(), Some("Asha"));
        assert_eq!(record.diagnosis.as_deref(), Some("Migraine"));
    }

    #[test]
    fn lists_grow_without_duplicates_preserving_order() {
        let mut record = PatientRecord::default();
        merge(
            &mut record,
            &PartialRecord {
                symptoms: Some(vec!["fever".to_string(), "cough".to_string()]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );
        merge(
            &mut record,
            &PartialRecord {
                symptoms: Some(vec![" cough ".to_string(), "headache".to_string()]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );

        assert_eq!(record.symptoms, vec!["fever", "cough", "headache"]);
    }

    #[test]
    fn medicine_dedup_is_case_insensitive_and_fills_gaps() {
        let mut record = PatientRecord::default();
        merge(
            &mut record,
            &PartialRecord {
                medicines: Some(vec![MedicineEntry {
                    name: "Paracetamol".to_string(),
                    dose: Some("500mg".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );
        merge(
            &mut record,
            &PartialRecord {
                medicines: Some(vec![MedicineEntry {
                    name: "paracetamol".to_string(),
                    frequency: Some("Twice daily".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );

        assert_eq!(record.medicines.len(), 1);
        let med = &record.medicines[0];
        assert_eq!(med.name, "Paracetamol");
        assert_eq!(med.dose.as_deref(), Some("500mg"));
        assert_eq!(med.frequency.as_deref(), Some("Twice daily"));
    }

    #[test]
    fn blank_subfields_never_erase_known_subfields() {
        let mut record = PatientRecord::default();
        merge(
            &mut record,
            &PartialRecord {
                medicines: Some(vec![MedicineEntry {
                    name: "Ibuprofen".to_string(),
                    dose: Some("400 mg".to_string()),
                    frequency: Some("Twice daily".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );
        merge(
            &mut record,
            &PartialRecord {
                medicines: Some(vec![MedicineEntry {
                    name: "IBUPROFEN".to_string(),
                    dose: Some("".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );

        assert_eq!(record.medicines[0].dose.as_deref(), Some("400 mg"));
        assert_eq!(record.medicines[0].frequency.as_deref(), Some("Twice daily"));
    }

    #[test]
    fn nameless_entries_are_skipped() {
        let mut record = PatientRecord::default();
        merge(
            &mut record,
            &PartialRecord {
                medicines: Some(vec![MedicineEntry {
                    name: "  ".to_string(),
                    dose: Some("10 ml".to_string()),
                    ..Default::default()
                }]),
                medical_tests: Some(vec![MedicalTest {
                    name: "".to_string(),
                    details: Some("fasting".to_string()),
                }]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );

        assert!(record.medicines.is_empty());
        assert!(record.medical_tests.is_empty());
    }

    #[test]
    fn skip_policy_merges_lists_but_not_scalars() {
        let mut record = PatientRecord::default();
        merge(&mut record, &partial_with_scalars(), ScalarPolicy::Apply);

        let stale = PartialRecord {
            patient_name: Some("Wrong Name".to_string()),
            symptoms: Some(vec!["cough".to_string()]),
            ..Default::default()
        };
        merge(&mut record, &stale, ScalarPolicy::Skip);

        assert_eq!(record.patient_name.as_deref(), Some("Asha"));
        assert_eq!(record.symptoms, vec!["fever", "cough"]);
    }

    #[test]
    fn test_details_fill_in_place() {
        let mut record = PatientRecord::default();
        merge(
            &mut record,
            &PartialRecord {
                medical_tests: Some(vec![MedicalTest {
                    name: "Cbc".to_string(),
                    details: None,
                }]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );
        merge(
            &mut record,
            &PartialRecord {
                medical_tests: Some(vec![MedicalTest {
                    name: "CBC".to_string(),
                    details: Some("fasting sample".to_string()),
                }]),
                ..Default::default()
            },
            ScalarPolicy::Apply,
        );

        assert_eq!(record.medical_tests.len(), 1);
        assert_eq!(record.medical_tests[0].details.as_deref(), Some("fasting sample"));
    }
}
