use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use mailstats_app::HourRangeParams;
use serde_json::Value;

use crate::{
    errors::HttpError,
    requests::{IngestRequest, StatsRangeRequest, StatsReadRequest},
    state::HttpState,
};

/// SQLite access, rayon classification and file reads all block, so every
/// handler hands its work to the blocking pool.
async fn run_blocking<T, F>(task: F) -> Result<T, HttpError>
where
    F: FnOnce() -> mailstats_app::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(task).await.map_err(|err| {
        HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
    })?;
    Ok(result?)
}

pub async fn stats_read(
    State(state): State<HttpState>,
    Json(req): Json<StatsReadRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = state.app_state.services.stats.clone();
    let record = run_blocking(move || {
        stats.read_one_value(req.account.as_deref(), req.hour.as_ref())
    })
    .await?;
    Ok(Json(record))
}

pub async fn stats_range(
    State(state): State<HttpState>,
    Json(req): Json<StatsRangeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = state.app_state.services.stats.clone();
    let series = run_blocking(move || {
        let params = HourRangeParams {
            start: req.start,
            end: req.end,
        };
        stats.range(req.account.as_deref(), &params)
    })
    .await?;
    Ok(Json(series))
}

pub async fn stats_write(
    State(state): State<HttpState>,
    Json(record): Json<Value>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = state.app_state.services.stats.clone();
    let record = run_blocking(move || stats.write_value(&record)).await?;
    Ok((StatusCode::OK, Json(record)))
}

pub async fn ingest(
    State(state): State<HttpState>,
    Json(req): Json<IngestRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let ingest = state.app_state.services.ingest.clone();
    let stats = run_blocking(move || ingest.run_messages(req.messages, req.hour)).await?;
    Ok(Json(stats))
}
