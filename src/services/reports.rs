//! Report Engine
//!
//! Monthly statistics, price histogram and category breakdown. Each report
//! starts from the same month filter and fans its store queries out
//! concurrently. A report either completes in full or fails with
//! [`Error::ReportQueryFailed`]; partial results never reach the caller.

use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::error::Error;
use crate::models::report::{CategoryCount, CombinedReport, HistogramEntry, Statistics};
use crate::services::month_range::MonthRange;
use crate::services::query::{PriceBand, TransactionFilter};
use crate::services::store::TransactionStore;

/// Lower bound of each histogram bucket. Bucket `i` covers
/// `[BUCKET_FLOORS[i], BUCKET_FLOORS[i + 1])` and the last one is open ended,
/// so prices such as 100.5 land in `0-100` instead of a gap.
const BUCKET_FLOORS: [u32; 10] = [0, 101, 201, 301, 401, 501, 601, 701, 801, 901];

/// A labelled histogram bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBucket {
    pub label: String,
    pub band: PriceBand,
}

/// The ten fixed buckets, in display order.
pub fn price_buckets() -> Vec<PriceBucket> {
    BUCKET_FLOORS
        .iter()
        .enumerate()
        .map(|(i, &floor)| match BUCKET_FLOORS.get(i + 1) {
            Some(&next) => PriceBucket {
                label: format!("{}-{}", floor, next - 1),
                band: PriceBand {
                    min: f64::from(floor),
                    max: Some(f64::from(next)),
                },
            },
            None => PriceBucket {
                label: format!("{}-above", floor),
                band: PriceBand {
                    min: f64::from(floor),
                    max: None,
                },
            },
        })
        .collect()
}

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn TransactionStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Total sale amount plus sold and unsold counts for the month.
    pub async fn statistics(&self, range: MonthRange) -> Result<Statistics, Error> {
        let month = TransactionFilter::for_range(range);
        let sold = month.clone().sold(true);
        let not_sold = month.clone().sold(false);

        let (total_sale_amount, sold_count, not_sold_count) = tokio::try_join!(
            self.store.sum_price(&month),
            self.store.count(&sold),
            self.store.count(&not_sold),
        )?;

        Ok(Statistics {
            total_sale_amount,
            sold_count,
            not_sold_count,
        })
    }

    /// Record counts per price bucket, in bucket order.
    pub async fn histogram(&self, range: MonthRange) -> Result<Vec<HistogramEntry>, Error> {
        let month = TransactionFilter::for_range(range);

        let counts = try_join_all(price_buckets().into_iter().map(|bucket| {
            let filter = month.clone().price_band(bucket.band);
            async move {
                let count = self.store.count(&filter).await?;
                Ok::<_, Error>(HistogramEntry {
                    range: bucket.label,
                    count,
                })
            }
        }))
        .await?;

        Ok(counts)
    }

    /// Record counts per category present in the month.
    pub async fn categories(&self, range: MonthRange) -> Result<Vec<CategoryCount>, Error> {
        let month = TransactionFilter::for_range(range);

        let rows = self.store.count_by_category(&month).await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    /// All three reports for the month. Fails as a whole if any of them fails.
    pub async fn combined(&self, range: MonthRange) -> Result<CombinedReport, Error> {
        let (statistics, histogram, category) = tokio::try_join!(
            self.statistics(range),
            self.histogram(range),
            self.categories(range),
        )?;

        Ok(CombinedReport {
            statistics,
            histogram,
            category,
        })
    }
}
