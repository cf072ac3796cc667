//! Live dictation session loop and AI task supervisor
//!
//! Each WebSocket connection owns one [`SessionRecord`]. Inbound utterances
//! run the heuristic pass inline and broadcast a `PRIORITY_UPDATE:` frame
//! before the next utterance is accepted; the AI pass for the same utterance
//! runs in a supervised task and broadcasts a `DATA_UPDATE:` frame whenever
//! it completes, which may be after later utterances have already merged.
//!
//! Closing the socket aborts every in-flight AI task via the per-session
//! `JoinSet`; a result for a closed session has no consumer, so tasks are
//! cancelled rather than drained.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use extraction_engine::{
    heuristic, parse_partial, PatientRecord, SessionRecord, StructuredExtractor,
};

use crate::server::ScribeServer;

/// Outbound frame capacity per session; sends block once the client lags
const OUTBOUND_BUFFER: usize = 64;

/// Handle WebSocket upgrade for a new dictation session
pub async fn voice_session_handler(
    ws: WebSocketUpgrade,
    State(server): State<ScribeServer>,
) -> Response {
    ws.on_upgrade(move |socket| handle_session(socket, server))
}

/// Run one session from open to close
async fn handle_session(socket: WebSocket, server: ScribeServer) {
    let session = SessionRecord::new();
    let session_id = session.id();
    info!(session_id = %session_id, provider = server.provider_name(), "voice session opened");
    if server.extractor.is_none() {
        warn!(session_id = %session_id, "AI path disabled; session runs heuristic-only");
    }

    let (mut sender, mut receiver) = socket.split();

    // Single writer task; the receive loop and every AI task feed it through
    // the channel so frames never interleave mid-message.
    let (out_tx, mut out_rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);
    let writer = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    let mut ai_tasks: JoinSet<()> = JoinSet::new();

    while let Some(msg) = receiver.next().await {
        // Reap AI tasks that have already finished
        while ai_tasks.try_join_next().is_some() {}

        match msg {
            Ok(Message::Text(text)) => {
                dispatch_utterance(text, &session, &server, &out_tx, &mut ai_tasks).await;
            }
            Ok(Message::Close(_)) => {
                debug!(session_id = %session_id, "session closed by client");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!(session_id = %session_id, error = %e, "websocket receive error");
                break;
            }
        }
    }

    let aborted = ai_tasks.len();
    ai_tasks.shutdown().await;
    drop(out_tx);
    let _ = writer.await;
    info!(session_id = %session_id, aborted_ai_tasks = aborted, "voice session closed");
}

/// Process one utterance: heuristic pass inline, AI pass supervised
async fn dispatch_utterance(
    utterance: String,
    session: &SessionRecord,
    server: &ScribeServer,
    out_tx: &mpsc::Sender<String>,
    ai_tasks: &mut JoinSet<()>,
) {
    let (seq, current) = session.begin_utterance().await;

    let fast = heuristic::extract(&utterance, &current);
    let record = session.apply_heuristic(seq, &fast).await;
    send_update(out_tx, "PRIORITY_UPDATE", &record).await;

    let Some(extractor) = server.extractor.clone() else {
        return;
    };

    let session = session.clone();
    let out_tx = out_tx.clone();
    let timeout = server.config.ai_timeout;
    ai_tasks.spawn(async move {
        run_ai_task(utterance, seq, record, session, extractor, timeout, out_tx).await;
    });
}

/// The supervised AI pass for one utterance
async fn run_ai_task(
    utterance: String,
    seq: u64,
    snapshot: PatientRecord,
    session: SessionRecord,
    extractor: Arc<dyn StructuredExtractor>,
    timeout: std::time::Duration,
    out_tx: mpsc::Sender<String>,
) {
    let session_id = session.id();
    let raw = match tokio::time::timeout(
        timeout,
        extractor.extract_structured(&utterance, &snapshot),
    )
    .await
    {
        Err(_) => {
            warn!(session_id = %session_id, seq, "AI extraction timed out");
            let _ = out_tx
                .send(format!(
                    "ERROR:AI extraction timed out after {}s",
                    timeout.as_secs()
                ))
                .await;
            return;
        }
        Ok(Err(e)) => {
            warn!(session_id = %session_id, seq, error = %e, "AI extraction failed");
            let _ = out_tx.send(format!("ERROR:{}", e)).await;
            return;
        }
        Ok(Ok(raw)) => raw,
    };

    // Malformed output coerces to an empty partial; the client still gets a
    // DATA_UPDATE so it knows the AI pass for this utterance completed.
    let extraction = parse_partial(&raw);
    if matches!(extraction, extraction_engine::AiExtraction::Malformed) {
        debug!(session_id = %session_id, seq, "AI output malformed; contributes nothing");
    }
    let partial = extraction.into_partial();

    let record = session.apply_ai(seq, &partial).await;
    send_update(&out_tx, "DATA_UPDATE", &record).await;
}

/// Serialize the record and queue a tagged frame for the writer task
async fn send_update(out_tx: &mpsc::Sender<String>, tag: &str, record: &PatientRecord) {
    match serde_json::to_string(record) {
        Ok(json) => {
            let _ = out_tx.send(format!("{}:{}", tag, json)).await;
        }
        Err(e) => {
            error!(error = %e, "failed to serialize record for broadcast");
        }
    }
}
