use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::SummaryHandler;

pub fn summary_routes(summary_handler: Arc<SummaryHandler>) -> Router {
    Router::new()
        .route("/summary/{id}", get(SummaryHandler::get_summary))
        .with_state(summary_handler)
}
