// src/bin/seed_transactions.rs

use std::env;

use sales_report_backend::{
    config::Config,
    services::{seed::SeedService, store::DbTransactionStore},
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sales_report_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Usage: cargo run --bin seed_transactions -- [source_url]
    let config = Config::from_env()?;
    let source_url = env::args().nth(1).unwrap_or(config.seed_url);

    let db = Database::connect(&config.database_url).await?;
    migration::Migrator::up(&db, None).await?;

    let store = DbTransactionStore::new(db);
    let seed = SeedService::new(source_url);

    let written = seed.import(&store).await?;
    println!("Imported {} transactions from {}", written, seed.source_url());

    Ok(())
}
