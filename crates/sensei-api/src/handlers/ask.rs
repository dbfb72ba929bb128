use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;

use sensei_graph::{TurnEvent, TurnInput, GENERIC_ERROR_MESSAGE};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub thread_id: String,
    pub user_id: String,
    pub query: String,
}

/// Run one search turn and stream its events as Server-Sent Events.
///
/// Each event is named after the turn event (`web_results`, `answer`, ...)
/// and carries `{"data": ...}`. The stream ends with the turn.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    for (field, value) in [
        ("thread_id", &req.thread_id),
        ("user_id", &req.user_id),
        ("query", &req.query),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{} must not be empty", field)));
        }
    }

    tracing::info!(thread_id = %req.thread_id, "Ask received");

    let events = state
        .orchestrator
        .spawn_run(TurnInput::new(req.thread_id, req.user_id, req.query));

    let sse_stream = ReceiverStream::new(events).map(|event| Ok::<Event, Infallible>(to_sse(&event)));

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::default()))
}

fn to_sse(event: &TurnEvent) -> Event {
    Event::default()
        .event(event.name())
        .json_data(json!({ "data": event.data() }))
        .unwrap_or_else(|e| {
            tracing::error!(event = event.name(), "Failed to encode event: {}", e);
            Event::default()
                .event("app_error")
                .data(json!({ "data": { "message": GENERIC_ERROR_MESSAGE } }).to_string())
        })
}
