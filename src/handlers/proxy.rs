//! CORS-friendly pass-through to the song catalog.
//!
//! Upstream failures come back as `{"success": false, "error": ...}` with a
//! 200 status (see [`AppError::Upstream`](crate::AppError::Upstream)).

use crate::models::SongListQuery;
use crate::{AppState, Result};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

pub async fn proxy_songs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SongListQuery>,
) -> Result<Json<Value>> {
    Ok(Json(state.catalog.list_songs(&query).await?))
}

pub async fn proxy_song_detail(
    State(state): State<Arc<AppState>>,
    Path(song_id): Path<i64>,
) -> Result<Json<Value>> {
    Ok(Json(state.catalog.song_detail(song_id).await?))
}

pub async fn proxy_song_types(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    Ok(Json(state.catalog.song_types().await?))
}

pub async fn proxy_song_topics(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    Ok(Json(state.catalog.song_topics().await?))
}

pub async fn proxy_song_count(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    Ok(Json(state.catalog.song_count().await?))
}
