#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use sales_report_backend::{
    AppState,
    entities::transactions,
    routes::build_router,
    services::{
        seed::SeedService,
        store::{DbTransactionStore, TransactionStore},
    },
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

pub const REPORT_YEAR: i32 = 2023;

/// Set up a migrated in-memory SQLite database.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;

    Ok(db)
}

/// Store over a fresh database, preloaded with `records`.
pub async fn seeded_store(records: Vec<transactions::Model>) -> Arc<DbTransactionStore> {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    let store = Arc::new(DbTransactionStore::new(db));

    store
        .insert_batch(records)
        .await
        .expect("Failed to insert fixtures");

    store
}

/// Seed service that never touches the network.
pub fn offline_seed() -> SeedService {
    seed_service("http://127.0.0.1:9/unreachable.json".to_string())
}

pub fn seed_service(url: String) -> SeedService {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build HTTP client");

    SeedService::with_client(client, url)
}

pub fn router_for(store: Arc<dyn TransactionStore>) -> Router {
    build_router(AppState::with_store(store, offline_seed(), REPORT_YEAR))
}

pub async fn router_with(records: Vec<transactions::Model>) -> Router {
    router_for(seeded_store(records).await)
}

/// A fixture transaction sold on the given day of `REPORT_YEAR`.
pub fn sale(id: i32, month: u32, day: u32, price: f64) -> transactions::Model {
    transactions::Model {
        id,
        title: format!("Product {}", id),
        description: format!("Description for product {}", id),
        price,
        category: "electronics".to_string(),
        image: String::new(),
        sold: false,
        date_of_sale: Utc
            .with_ymd_and_hms(REPORT_YEAR, month, day, 12, 0, 0)
            .unwrap(),
    }
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send_json(app, "GET", uri).await
}

pub async fn send_json(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}
