//! Listing Service
//!
//! Paged, searchable transaction listing for one month.

use std::sync::Arc;

use crate::error::Error;
use crate::models::transaction::TransactionPage;
use crate::services::month_range::MonthRange;
use crate::services::query::TransactionFilter;
use crate::services::store::TransactionStore;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Largest page size or offset the database drivers accept; both bind as `i64`.
const MAX_BOUND: u64 = i64::MAX as u64;

/// Validated page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Parse raw `page` and `limit` query parameters.
    ///
    /// Absent or blank values fall back to the defaults. Anything else must be
    /// a positive integer.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, Error> {
        let page = parse_positive("page", page)?.unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive("limit", limit)?.unwrap_or(DEFAULT_LIMIT);

        let pagination = Self { page, limit };
        // Reject pages whose offset does not fit the driver's i64
        pagination.offset().ok_or_else(|| Error::InvalidPagination {
            field: "page",
            value: page.to_string(),
        })?;

        Ok(pagination)
    }

    /// Number of records to skip, `(page - 1) * limit`. `None` when it is
    /// larger than the database can bind.
    pub fn offset(&self) -> Option<u64> {
        self.page
            .checked_sub(1)?
            .checked_mul(self.limit)
            .filter(|offset| *offset <= MAX_BOUND)
    }

    /// `ceil(total / limit)`, zero when nothing matches.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

fn parse_positive(field: &'static str, raw: Option<&str>) -> Result<Option<u64>, Error> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    raw.parse::<u64>()
        .ok()
        .filter(|value| (1..=MAX_BOUND).contains(value))
        .map(Some)
        .ok_or_else(|| Error::InvalidPagination {
            field,
            value: raw.to_string(),
        })
}

#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn TransactionStore>,
}

impl ListingService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// One page of the month's transactions, ordered by sale date.
    pub async fn list(
        &self,
        range: MonthRange,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<TransactionPage, Error> {
        let filter = TransactionFilter::for_range(range).search(search);
        let offset = pagination.offset().ok_or_else(|| Error::InvalidPagination {
            field: "page",
            value: pagination.page.to_string(),
        })?;

        let (total_count, records) = tokio::try_join!(
            self.store.count(&filter),
            self.store.find(&filter, offset, pagination.limit),
        )?;

        Ok(TransactionPage {
            records,
            total_count,
            page: pagination.page,
            limit: pagination.limit,
            total_pages: pagination.total_pages(total_count),
        })
    }
}
