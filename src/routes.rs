use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;
use crate::handlers::transaction;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/transactions/initialize",
            get(transaction::initialize_database).post(transaction::initialize_database),
        )
        .route("/api/transactions", get(transaction::list_transactions))
        .route("/api/transactions/statistics", get(transaction::get_statistics))
        .route("/api/transactions/bar-chart", get(transaction::get_bar_chart))
        .route("/api/transactions/pie-chart", get(transaction::get_pie_chart))
        .route("/api/transactions/combined", get(transaction::get_combined))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
