// src/lib.rs

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use services::{
    listing::ListingService, reports::ReportService, seed::SeedService,
    store::{DbTransactionStore, TransactionStore},
};

pub use error::Error;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub listing: ListingService,
    pub reports: ReportService,
    pub seed: SeedService,
    /// Year every `month` query parameter resolves against
    pub report_year: i32,
}

impl AppState {
    pub fn new(db: DatabaseConnection, seed_url: String, report_year: i32) -> Self {
        let store: Arc<dyn TransactionStore> = Arc::new(DbTransactionStore::new(db));

        Self::with_store(store, SeedService::new(seed_url), report_year)
    }

    /// Build the state around an existing store handle.
    pub fn with_store(store: Arc<dyn TransactionStore>, seed: SeedService, report_year: i32) -> Self {
        Self {
            listing: ListingService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            seed,
            store,
            report_year,
        }
    }
}

pub mod entities {
    pub mod prelude;
    pub mod transactions;
}

pub mod services {
    pub mod listing;
    pub mod month_range;
    pub mod query;
    pub mod reports;
    pub mod seed;
    pub mod store;
}

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
