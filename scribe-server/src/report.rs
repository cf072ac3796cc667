//! Document rendering boundary
//!
//! Once a session ends, the accumulated record can be turned into a handout
//! document. The renderer is a trait so the plain-text layout shipped here
//! can be swapped for a PDF engine without touching the handler.

use chrono::Utc;

use error_common::{Result, ScribeError};
use extraction_engine::PatientRecord;

/// Renders a finished patient record into a downloadable document
pub trait ReportRenderer: Send + Sync {
    fn render(&self, record: &PatientRecord) -> Result<Vec<u8>>;

    /// MIME type of the rendered document
    fn content_type(&self) -> &'static str;

    /// Suggested download filename
    fn file_name(&self) -> &'static str;
}

/// Plain-text prescription layout
///
/// Sections follow the clinic handout order: letterhead, patient details,
/// clinical assessment, prescription table, tests, notes, signature.
pub struct TextReportRenderer;

const CLINIC_NAME: &str = "SCRIBE ENGINE MEDICAL CENTER";
const CLINIC_ADDRESS: &str = "123 Health Avenue, Medical District - 560001";
const RULE: &str = "============================================================";

impl TextReportRenderer {
    fn render_text(record: &PatientRecord) -> String {
        let mut out = String::new();
        let or_na = |value: &Option<String>| -> String {
            value.clone().unwrap_or_else(|| "N/A".to_string())
        };

        out.push_str(&format!("{}\n{}\n{}\n\n", RULE, CLINIC_NAME, CLINIC_ADDRESS));

        out.push_str(&format!("Patient Name: {}\n", or_na(&record.patient_name)));
        out.push_str(&format!(
            "Age/Gender:   {} / {}\n",
            or_na(&record.age),
            or_na(&record.gender)
        ));
        out.push_str(&format!(
            "Doctor:       {}\n",
            record
                .doctor_name
                .clone()
                .unwrap_or_else(|| "Dr. AI Assistant".to_string())
        ));
        out.push_str(&format!(
            "Date:         {}\n\n",
            record
                .checkup_date
                .clone()
                .unwrap_or_else(|| Utc::now().format("%d-%b-%Y").to_string())
        ));

        out.push_str("CLINICAL ASSESSMENT\n");
        let symptoms = if record.symptoms.is_empty() {
            "No symptoms recorded.".to_string()
        } else {
            record.symptoms.join(", ")
        };
        out.push_str(&format!("Symptoms Reported: {}\n", symptoms));
        out.push_str(&format!(
            "Diagnosis: {}\n",
            record
                .diagnosis
                .clone()
                .unwrap_or_else(|| "Pending Evaluation".to_string())
        ));
        out.push_str(&format!(
            "Checkup Details: {}\n\n",
            record
                .checkup_details
                .clone()
                .unwrap_or_else(|| "Routine checkup performed.".to_string())
        ));

        out.push_str("PRESCRIPTION / Rx\n");
        if record.medicines.is_empty() {
            out.push_str("No medicines prescribed.\n");
        } else {
            for medicine in &record.medicines {
                out.push_str(&format!(
                    "- {} | Dose: {} | Frequency: {} | Duration: {}\n",
                    medicine.name,
                    medicine.dose.as_deref().unwrap_or("--"),
                    medicine.frequency.as_deref().unwrap_or("--"),
                    medicine.duration.as_deref().unwrap_or("5 Days"),
                ));
            }
        }
        out.push('\n');

        if !record.medical_tests.is_empty() {
            out.push_str("RECOMMENDED TESTS\n");
            for test in &record.medical_tests {
                match &test.details {
                    Some(details) => out.push_str(&format!("- {} ({})\n", test.name, details)),
                    None => out.push_str(&format!("- {}\n", test.name)),
                }
            }
            out.push('\n');
        }

        if !record.notes.is_empty() {
            out.push_str("NOTES\n");
            for note in &record.notes {
                out.push_str(&format!("- {}\n", note));
            }
            out.push('\n');
        }

        out.push_str(&format!("{}\nDr. AI Assistant, Chief Medical Officer\n", RULE));
        out
    }
}

impl ReportRenderer for TextReportRenderer {
    fn render(&self, record: &PatientRecord) -> Result<Vec<u8>> {
        let text = Self::render_text(record);
        if text.is_empty() {
            return Err(ScribeError::RenderError("empty report body".to_string()));
        }
        Ok(text.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_name(&self) -> &'static str {
        "medical_report.txt"
    }
}
