//! Incremental extraction-and-merge engine for voice-dictated patient records
//!
//! Each utterance a clinician speaks during a live session passes through two
//! independent extractors: a synchronous heuristic pass that answers within
//! microseconds, and an AI-backed pass that may take seconds and may fail.
//! Both produce a sparse [`PartialRecord`] which the merge engine folds into
//! the session's single [`PatientRecord`].
//!
//! # Merge guarantees
//!
//! - Merging is idempotent: applying the same partial twice equals once.
//! - Scalar fields never regress from set to unset.
//! - List and keyed-list fields only grow or update in place.
//! - Every utterance carries a session-local sequence number; an AI partial
//!   that answers an older utterance than the newest scalar merge contributes
//!   its list fields only, so a slow response cannot revert fresher scalars.
//!
//! # Example
//!
//! ```rust
//! use extraction_engine::{heuristic, SessionRecord};
//!
//! # tokio_test::block_on(async {
//! let session = SessionRecord::new();
//! let (seq, current) = session.begin_utterance().await;
//! let partial = heuristic::extract("my name is Asha, 30 years female with fever", &current);
//! let record = session.apply_heuristic(seq, &partial).await;
//! assert_eq!(record.patient_name.as_deref(), Some("Asha"));
//! assert_eq!(record.symptoms, vec!["fever"]);
//! # });
//! ```

pub mod config;
pub mod error;
pub mod heuristic;
pub mod merge;
pub mod providers;
pub mod record;
pub mod session;
pub mod vocabulary;

pub use config::{AiProvider, EngineConfig};
pub use error::{ExtractionError, ExtractionResult};
pub use providers::{create_provider, parse_partial, AiExtraction, StructuredExtractor};
pub use record::{MedicalTest, MedicineEntry, PartialRecord, PatientRecord};
pub use session::SessionRecord;
