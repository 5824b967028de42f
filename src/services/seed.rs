//! Seed Service
//!
//! Downloads the product transaction feed and loads it into the record store.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::entities::transactions;
use crate::error::Error;
use crate::services::store::TransactionStore;

/// One element of the seed feed array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub id: i32,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub sold: bool,
    /// RFC 3339 timestamp with any offset, e.g. `2021-11-27T20:29:54+05:30`
    pub date_of_sale: String,
}

impl SeedRecord {
    /// Validate the record and normalize its sale date to UTC.
    pub fn into_model(self) -> Result<transactions::Model, Error> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::local_import(format!(
                "record {} has invalid price {}",
                self.id, self.price
            )));
        }

        let date_of_sale = DateTime::parse_from_rfc3339(&self.date_of_sale)
            .map_err(|e| {
                Error::local_import(format!(
                    "record {} has invalid dateOfSale \"{}\": {}",
                    self.id, self.date_of_sale, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(transactions::Model {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            sold: self.sold,
            date_of_sale,
        })
    }
}

/// Validate every record, failing on the first bad one.
pub fn validate_records(records: Vec<SeedRecord>) -> Result<Vec<transactions::Model>, Error> {
    records.into_iter().map(SeedRecord::into_model).collect()
}

#[derive(Clone)]
pub struct SeedService {
    client: Client,
    source_url: String,
}

impl SeedService {
    pub fn new(source_url: String) -> Self {
        Self::with_client(Client::new(), source_url)
    }

    pub fn with_client(client: Client, source_url: String) -> Self {
        Self { client, source_url }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Download the raw feed.
    pub async fn fetch(&self) -> Result<Vec<SeedRecord>, Error> {
        tracing::info!(url = %self.source_url, "Fetching seed transactions");

        let response = self
            .client
            .get(&self.source_url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::upstream_import(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::upstream_import(format!(
                "seed source returned {}: {}",
                status, error_text
            )));
        }

        let records: Vec<SeedRecord> = response
            .json()
            .await
            .map_err(|e| Error::upstream_import(format!("invalid seed payload: {}", e)))?;

        tracing::debug!(records = records.len(), "Fetched seed transactions");
        Ok(records)
    }

    /// Fetch, validate and upsert the feed. Returns the number of records written.
    ///
    /// Records are keyed by their feed id, so running the import again refreshes
    /// rows instead of duplicating them.
    pub async fn import(&self, store: &dyn TransactionStore) -> Result<u64, Error> {
        let records = validate_records(self.fetch().await?)?;

        let written = store
            .insert_batch(records)
            .await
            .map_err(|e| Error::local_import(format!("could not store records: {}", e)))?;

        tracing::info!(written, "Seed import complete");
        Ok(written)
    }
}
