//! HTTP handlers and application state.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use pawmatch_core::{MatchEngine, PetReport};
use pawmatch_notify::{MatchNotifier, dispatch};
use serde_json::Value;

use super::errors::ApiError;
use super::models::{CheckMatchRequest, CheckMatchResponse, EmptyObject};

/// Liveness message answered by `GET /`.
pub const STATUS_MESSAGE: &str = "Hi, I'm up :)";

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    /// Scoring pipeline.
    pub engine: Arc<MatchEngine>,
    /// Destination for matches.
    pub notifier: Arc<dyn MatchNotifier>,
}

impl AppState {
    /// Bundle `engine` and `notifier` into shareable state.
    pub fn new(engine: MatchEngine, notifier: Arc<dyn MatchNotifier>) -> Self {
        Self {
            engine: Arc::new(engine),
            notifier,
        }
    }
}

/// `GET /`
pub async fn index() -> &'static str {
    STATUS_MESSAGE
}

/// `POST /match/check`
///
/// The body is decoded from raw bytes whatever the declared content type.
/// A match, when found, is also handed to the notifier in the background.
pub async fn check_match(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CheckMatchResponse>, ApiError> {
    let request: CheckMatchRequest = serde_json::from_slice(&body)
        .map_err(|err| ApiError::BadRequest(format!("malformed request body: {err}")))?;
    let target = PetReport::try_from(request.pet)
        .map_err(|err| ApiError::BadRequest(format!("invalid pet: {err}")))?;
    let candidates = parse_candidates(request.other_pets);

    let response = match state.engine.check(&target, candidates) {
        Some(found) => {
            dispatch(Arc::clone(&state.notifier), found.clone());
            CheckMatchResponse::Match(found)
        }
        None => CheckMatchResponse::NoMatch(EmptyObject::default()),
    };
    Ok(Json(response))
}

fn parse_candidates(raw: Vec<Value>) -> Vec<PetReport> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match PetReport::from_json_value(value) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed candidate");
                None
            }
        })
        .collect()
}
