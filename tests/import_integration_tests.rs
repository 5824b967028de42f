mod common;

use std::sync::Arc;

use axum::{Router, http::StatusCode, routing::get};
use sales_report_backend::{
    AppState,
    routes::build_router,
    services::{
        month_range::MonthRange,
        query::TransactionFilter,
        store::{DbTransactionStore, TransactionStore},
    },
};
use tokio::net::TcpListener;

use crate::common::{REPORT_YEAR, get_json, sale, seed_service, seeded_store, send_json};

const FEED: &str = r#"[
    {
        "id": 1,
        "title": "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 329.85,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "sold": false,
        "dateOfSale": "2023-01-27T20:29:54+05:30"
    },
    {
        "id": 2,
        "title": "Mens Casual Premium Slim Fit T-Shirts ",
        "price": 44.6,
        "description": "Slim-fitting style, contrast raglan long sleeve.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
        "sold": true,
        "dateOfSale": "2023-02-01T02:00:00+05:30"
    }
]"#;

const BAD_FEED: &str = r#"[
    {
        "id": 3,
        "title": "Solid Gold Petite Micropave",
        "price": -168,
        "description": "Satisfaction Guaranteed.",
        "category": "jewelery",
        "image": "",
        "sold": false,
        "dateOfSale": "2023-03-01T00:00:00Z"
    }
]"#;

/// Serve the seed feeds on an ephemeral local port. Returns the base URL.
async fn spawn_feed_server() -> String {
    let app = Router::new()
        .route(
            "/feed.json",
            get(|| async { ([("content-type", "application/json")], FEED) }),
        )
        .route(
            "/bad.json",
            get(|| async { ([("content-type", "application/json")], BAD_FEED) }),
        )
        .route("/garbage.json", get(|| async { "<html>not json</html>" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn row_count(store: &DbTransactionStore, month: u32) -> u64 {
    let range = MonthRange::resolve(REPORT_YEAR, month).unwrap();
    store.count(&TransactionFilter::for_range(range)).await.unwrap()
}

fn app_for(store: Arc<DbTransactionStore>, url: String) -> Router {
    build_router(AppState::with_store(store, seed_service(url), REPORT_YEAR))
}

#[tokio::test]
async fn test_initialize_imports_the_feed() {
    let base = spawn_feed_server().await;
    let store = seeded_store(vec![]).await;

    let (status, json) = send_json(
        app_for(store.clone(), format!("{}/feed.json", base)),
        "POST",
        "/api/transactions/initialize",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Database initialized successfully");
    assert_eq!(json["imported"], 2);
    // 2023-02-01T02:00:00+05:30 is still January in UTC
    assert_eq!(row_count(&store, 1).await, 2);
    assert_eq!(row_count(&store, 2).await, 0);

    let (_, listing) = get_json(
        app_for(store.clone(), format!("{}/feed.json", base)),
        "/api/transactions?month=1",
    )
    .await;
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["data"][0]["dateOfSale"], "2023-01-27T14:59:54Z");
    assert_eq!(listing["data"][1]["dateOfSale"], "2023-01-31T20:30:00Z");
}

#[tokio::test]
async fn test_initialize_twice_does_not_duplicate() {
    let base = spawn_feed_server().await;
    let store = seeded_store(vec![]).await;

    for _ in 0..2 {
        let (status, json) = get_json(
            app_for(store.clone(), format!("{}/feed.json", base)),
            "/api/transactions/initialize",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["imported"], 2);
    }

    let (_, statistics) = get_json(
        app_for(store, format!("{}/feed.json", base)),
        "/api/transactions/statistics?month=1",
    )
    .await;
    assert_eq!(statistics["soldCount"], 1);
    assert_eq!(statistics["notSoldCount"], 1);
}

#[tokio::test]
async fn test_initialize_refreshes_existing_rows() {
    let base = spawn_feed_server().await;
    let store = seeded_store(vec![sale(1, 1, 27, 1.0)]).await;

    let (status, _) = send_json(
        app_for(store.clone(), format!("{}/feed.json", base)),
        "POST",
        "/api/transactions/initialize",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = get_json(
        app_for(store, format!("{}/feed.json", base)),
        "/api/transactions?month=1&search=backpack",
    )
    .await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["data"][0]["price"].as_f64().unwrap(), 329.85);
}

#[tokio::test]
async fn test_initialize_reports_upstream_failures() {
    let base = spawn_feed_server().await;

    for path in ["/missing.json", "/garbage.json"] {
        let store = seeded_store(vec![]).await;

        let (status, json) = send_json(
            app_for(store.clone(), format!("{}{}", base, path)),
            "POST",
            "/api/transactions/initialize",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY, "{path}");
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .starts_with("Error initializing database:"),
            "{path}"
        );
        assert_eq!(row_count(&store, 1).await, 0);
    }
}

#[tokio::test]
async fn test_initialize_rejects_invalid_records() {
    let base = spawn_feed_server().await;
    let store = seeded_store(vec![]).await;

    let (status, json) = send_json(
        app_for(store.clone(), format!("{}/bad.json", base)),
        "POST",
        "/api/transactions/initialize",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("record 3"));
    assert_eq!(row_count(&store, 3).await, 0);
}

#[tokio::test]
async fn test_insert_batch_is_idempotent() {
    let records: Vec<_> = (1..=1200).map(|id| sale(id, 6, 1 + (id as u32 % 28), 5.0)).collect();
    let store = seeded_store(records.clone()).await;

    let written = store.insert_batch(records).await.unwrap();

    assert_eq!(written, 1200);
    assert_eq!(row_count(&store, 6).await, 1200);
}

#[tokio::test]
async fn test_insert_batch_of_nothing_is_a_no_op() {
    let store = seeded_store(vec![]).await;

    assert_eq!(store.insert_batch(vec![]).await.unwrap(), 0);
}
