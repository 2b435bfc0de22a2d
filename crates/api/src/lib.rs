//! Scoring service client
//!
//! Two blocking calls against the remote scoring API: `evaluate` posts the
//! résumé and job URL as multipart and returns a score plus session id;
//! `enhance` posts the session id and returns regenerated PDF bytes,
//! optionally with an updated score in a response header.
//!
//! The app runs each call on a one-shot background thread; the client
//! itself is synchronous. One request is ever in flight at a time, gated by
//! the app's loading flags, so there is no retry or cancellation here. A
//! request timeout is set so a dead service cannot strand the worker thread
//! forever.

use std::time::Duration;

/// Response header that may carry a JSON-encoded updated score alongside
/// the enhanced PDF body
pub const UPDATED_SCORE_HEADER: &str = "x-updated-score";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Score returned by the evaluation endpoint
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreData {
    pub final_score: f32,
    pub eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of a successful `POST /evaluate`
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct EvaluateResponse {
    pub score: ScoreData,
    pub session_id: String,
}

/// Result of a successful `POST /enhance`
#[derive(Debug, Clone)]
pub struct EnhanceResponse {
    /// Regenerated PDF, byte-for-byte as the service produced it
    pub pdf_bytes: Vec<u8>,
    /// Updated score from the optional response header; `None` when the
    /// header is absent or unparseable (the caller keeps its prior score)
    pub updated_score: Option<ScoreData>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("scoring service returned HTTP {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the scoring/enhancement service
#[derive(Debug, Clone)]
pub struct ScoringClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ScoringClient {
    /// Create a client against a service base URL such as
    /// `http://127.0.0.1:8000`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("ResumeStudio/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: normalize_base_url(base_url.into()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /evaluate`: multipart with a `resume` file part and a
    /// `job_url` text part
    pub fn evaluate(
        &self,
        resume_name: &str,
        resume_bytes: Vec<u8>,
        job_url: &str,
    ) -> Result<EvaluateResponse, ApiError> {
        let part = reqwest::blocking::multipart::Part::bytes(resume_bytes)
            .file_name(resume_name.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("resume", part)
            .text("job_url", job_url.to_string());

        let url = endpoint(&self.base_url, "evaluate");
        log::info!("evaluating resume against {url}");
        let response = self.client.post(&url).multipart(form).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text()?;
        decode_body(&body)
    }

    /// `POST /enhance`: multipart with a `session_id` text part; returns
    /// the enhanced PDF bytes and, when present, the updated score carried
    /// in the `X-Updated-Score` header.
    pub fn enhance(&self, session_id: &str) -> Result<EnhanceResponse, ApiError> {
        let form =
            reqwest::blocking::multipart::Form::new().text("session_id", session_id.to_string());

        let url = endpoint(&self.base_url, "enhance");
        log::info!("requesting enhanced resume from {url}");
        let response = self.client.post(&url).multipart(form).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let updated_score = response
            .headers()
            .get(UPDATED_SCORE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_score_header);

        let pdf_bytes = response.bytes()?.to_vec();

        Ok(EnhanceResponse {
            pdf_bytes,
            updated_score,
        })
    }
}

/// Decode a JSON response body, mapping failures to [`ApiError::Decode`]
fn decode_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode the optional score header; a malformed value is logged and
/// dropped rather than failing the whole enhancement.
pub fn parse_score_header(raw: &str) -> Option<ScoreData> {
    match serde_json::from_str::<ScoreData>(raw) {
        Ok(score) => Some(score),
        Err(err) => {
            log::warn!("ignoring unparseable {UPDATED_SCORE_HEADER} header: {err}");
            None
        }
    }
}

fn normalize_base_url(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        assert_eq!(
            endpoint(&normalize_base_url("http://127.0.0.1:8000/".into()), "evaluate"),
            "http://127.0.0.1:8000/evaluate"
        );
        assert_eq!(
            endpoint(&normalize_base_url("http://127.0.0.1:8000".into()), "enhance"),
            "http://127.0.0.1:8000/enhance"
        );
    }

    #[test]
    fn evaluate_response_decodes_expected_shape() {
        let body = r#"{
            "score": { "final_score": 75.0, "eligible": true, "reason": "solid match" },
            "session_id": "abc-123"
        }"#;
        let decoded: EvaluateResponse = serde_json::from_str(body).expect("decode should succeed");

        assert_eq!(decoded.session_id, "abc-123");
        assert_eq!(decoded.score.final_score, 75.0);
        assert!(decoded.score.eligible);
        assert_eq!(decoded.score.reason.as_deref(), Some("solid match"));
    }

    #[test]
    fn reason_is_optional() {
        let body = r#"{ "score": { "final_score": 40, "eligible": false }, "session_id": "s" }"#;
        let decoded: EvaluateResponse = serde_json::from_str(body).expect("decode should succeed");
        assert_eq!(decoded.score.reason, None);
    }

    #[test]
    fn malformed_evaluate_body_is_a_decode_error() {
        let result = decode_body::<EvaluateResponse>("<html>service is down</html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));

        // Valid JSON of the wrong shape fails the same way
        let result = decode_body::<EvaluateResponse>(r#"{ "detail": "no resume" }"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn score_header_parses_valid_json() {
        let score = parse_score_header(r#"{ "final_score": 88.5, "eligible": true }"#)
            .expect("header should parse");
        assert_eq!(score.final_score, 88.5);
    }

    #[test]
    fn malformed_score_header_is_dropped() {
        assert_eq!(parse_score_header("not json"), None);
        assert_eq!(parse_score_header(r#"{ "eligible": true }"#), None);
        assert_eq!(parse_score_header(""), None);
    }
}
