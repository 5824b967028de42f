//! Transaction listing request/response models
//!
//! Models for the GET /api/transactions endpoint.

use serde::{Deserialize, Serialize};

use crate::entities::transactions;

/// Query parameters for the transaction listing.
///
/// Everything arrives as a raw string; the services validate the values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionListQuery {
    /// Month number, 1-12
    pub month: Option<String>,
    /// Page number (default: 1)
    pub page: Option<String>,
    /// Page size (default: 10)
    pub limit: Option<String>,
    /// Matches title/description substrings, or the exact price when numeric
    pub search: Option<String>,
}

/// Query parameters for the month scoped report endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// One page of transactions as returned by the listing service.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    pub records: Vec<transactions::Model>,
    /// Matches before pagination
    pub total_count: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// Response for GET /api/transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListResponse {
    pub success: bool,
    /// Records on this page
    pub count: usize,
    /// Records matching the filters across all pages
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub data: Vec<transactions::Model>,
}

impl From<TransactionPage> for TransactionListResponse {
    fn from(page: TransactionPage) -> Self {
        Self {
            success: true,
            count: page.records.len(),
            total: page.total_count,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            data: page.records,
        }
    }
}

/// Response for the database initialization endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    pub message: String,
    /// Records written by the import
    pub imported: u64,
}
