//! Background network calls
//!
//! Each scoring-service request runs on its own one-shot thread and reports
//! back through an mpsc channel drained at the top of every frame. The UI
//! thread owns all state; the loading flags guarantee a single request in
//! flight, so plain channels are enough — no pool, no cancellation.

use std::sync::mpsc::Sender;

use resume_studio_api::{ApiError, EnhanceResponse, EvaluateResponse, ScoringClient};

/// Result of a completed background request
pub enum NetMessage {
    Evaluated(Result<EvaluateResponse, ApiError>),
    Enhanced(Result<EnhanceResponse, ApiError>),
}

/// Kick off the evaluate call on a worker thread
pub fn spawn_evaluate(
    client: ScoringClient,
    resume_name: String,
    resume_bytes: Vec<u8>,
    job_url: String,
    tx: Sender<NetMessage>,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let result = client.evaluate(&resume_name, resume_bytes, &job_url);
        if tx.send(NetMessage::Evaluated(result)).is_err() {
            log::warn!("evaluate result dropped: app already shut down");
        }
        ctx.request_repaint();
    });
}

/// Kick off the enhance call on a worker thread
pub fn spawn_enhance(
    client: ScoringClient,
    session_id: String,
    tx: Sender<NetMessage>,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let result = client.enhance(&session_id);
        if tx.send(NetMessage::Enhanced(result)).is_err() {
            log::warn!("enhance result dropped: app already shut down");
        }
        ctx.request_repaint();
    });
}
