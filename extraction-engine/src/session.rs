//! Per-session record store
//!
//! One [`SessionRecord`] exists per live dictation session. The record plus
//! its sequence counters sit behind a single tokio mutex, making this the
//! only mutation point: the receive loop and every in-flight AI task merge
//! through it, so concurrent completions serialize instead of racing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::merge::{merge, ScalarPolicy};
use crate::record::{PartialRecord, PatientRecord};

struct SessionState {
    record: PatientRecord,
    /// Sequence handed to the next utterance
    next_seq: u64,
    /// Highest sequence whose scalar fields have been merged
    scalar_seq: u64,
}

/// Shared handle to one session's record and sequence counters
#[derive(Clone)]
pub struct SessionRecord {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionRecord {
    /// Create an empty record for a newly opened session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: Arc::new(Mutex::new(SessionState {
                record: PatientRecord::default(),
                next_seq: 0,
                scalar_seq: 0,
            })),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Claim the next utterance sequence and snapshot the current record
    ///
    /// The snapshot is what extractors see as `current`; by the time their
    /// partials merge, the record may already have moved on, which the merge
    /// rules are built to tolerate.
    pub async fn begin_utterance(&self) -> (u64, PatientRecord) {
        let mut state = self.state.lock().await;
        state.next_seq += 1;
        (state.next_seq, state.record.clone())
    }

    /// Merge a heuristic partial for utterance `seq`, returning the result
    ///
    /// The heuristic pass runs inline with the receive loop, so its sequence
    /// is always the newest; scalars apply unconditionally. The sequence only
    /// counts as a scalar merge when the partial actually carried one, so a
    /// list-only utterance does not block an older utterance's AI scalars.
    pub async fn apply_heuristic(&self, seq: u64, partial: &PartialRecord) -> PatientRecord {
        let mut state = self.state.lock().await;
        merge(&mut state.record, partial, ScalarPolicy::Apply);
        if partial.has_scalars() && seq > state.scalar_seq {
            state.scalar_seq = seq;
        }
        debug!(session_id = %self.id, seq, "heuristic partial merged");
        state.record.clone()
    }

    /// Merge an AI partial for utterance `seq`, returning the result
    ///
    /// AI tasks complete in arbitrary order. A partial answering an utterance
    /// at least as new as the last scalar merge applies fully; a stale one
    /// contributes only its list fields.
    pub async fn apply_ai(&self, seq: u64, partial: &PartialRecord) -> PatientRecord {
        let mut state = self.state.lock().await;
        let policy = if seq >= state.scalar_seq {
            ScalarPolicy::Apply
        } else {
            ScalarPolicy::Skip
        };
        merge(&mut state.record, partial, policy);
        if policy == ScalarPolicy::Apply && partial.has_scalars() && seq > state.scalar_seq {
            state.scalar_seq = seq;
        }
        debug!(session_id = %self.id, seq, ?policy, "ai partial merged");
        state.record.clone()
    }

    /// Current record state
    pub async fn snapshot(&self) -> PatientRecord {
        self.state.lock().await.record.clone()
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}
