use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use sensei_persist::Thread;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Thread metadata and full chat history, looked up by slug
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Thread>> {
    let thread = state.store.get_thread_by_slug(&slug).await?;
    let thread = thread.ok_or(ApiError::ThreadNotFound(slug))?;

    Ok(Json(thread))
}
