mod errors;
mod handlers;
mod requests;
mod state;

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

pub use errors::HttpError;
pub use requests::{IngestRequest, StatsRangeRequest, StatsReadRequest};
pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/stats_read", post(handlers::stats_read))
        .route("/stats_range", post(handlers::stats_range))
        .route("/stats_write", post(handlers::stats_write))
        .route("/ingest", post(handlers::ingest));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
