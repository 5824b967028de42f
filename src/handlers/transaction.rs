//! Transaction Handlers
//!
//! Listing, monthly reports and database initialization under
//! `/api/transactions`.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

use crate::AppState;
use crate::error::Error;
use crate::models::report::{CategoryCount, CombinedReport, HistogramEntry, Statistics};
use crate::models::transaction::{
    InitializeResponse, MonthQuery, TransactionListQuery, TransactionListResponse,
};
use crate::services::listing::Pagination;
use crate::services::month_range::MonthRange;

/// Seed the database from the remote feed
///
/// GET|POST /api/transactions/initialize
pub async fn initialize_database(
    State(state): State<AppState>,
) -> Result<Json<InitializeResponse>, Error> {
    info!(source = %state.seed.source_url(), "Database initialization requested");

    let imported = state.seed.import(state.store.as_ref()).await?;

    Ok(Json(InitializeResponse {
        message: "Database initialized successfully".to_string(),
        imported,
    }))
}

/// List transactions for a month
///
/// GET /api/transactions
///
/// # Query Parameters
///
/// - `month` - Month number 1-12 (required)
/// - `page` - Page number (default: 1)
/// - `limit` - Page size (default: 10)
/// - `search` - Title/description substring, or exact price when numeric
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "count": 1,
///   "total": 1,
///   "page": 1,
///   "limit": 10,
///   "totalPages": 1,
///   "data": [
///     {
///       "id": 1,
///       "title": "Fjallraven - Foldsack No. 1 Backpack",
///       "description": "Your perfect pack for everyday use",
///       "price": 329.85,
///       "category": "men's clothing",
///       "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///       "sold": false,
///       "dateOfSale": "2023-01-27T14:59:54Z"
///     }
///   ]
/// }
/// ```
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<TransactionListResponse>, Error> {
    info!(
        month = ?query.month,
        page = ?query.page,
        limit = ?query.limit,
        search = ?query.search,
        "Transaction list request received"
    );

    let range = MonthRange::parse(state.report_year, query.month.as_deref())?;
    let pagination = Pagination::parse(query.page.as_deref(), query.limit.as_deref())?;

    let page = state
        .listing
        .list(range, query.search.as_deref(), pagination)
        .await?;

    info!(
        count = page.records.len(),
        total = page.total_count,
        page = page.page,
        "Transaction list returned"
    );

    Ok(Json(page.into()))
}

/// GET /api/transactions/statistics
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, Error> {
    let range = MonthRange::parse(state.report_year, query.month.as_deref())?;

    Ok(Json(state.reports.statistics(range).await?))
}

/// Price histogram for the month
///
/// GET /api/transactions/bar-chart
pub async fn get_bar_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<HistogramEntry>>, Error> {
    let range = MonthRange::parse(state.report_year, query.month.as_deref())?;

    Ok(Json(state.reports.histogram(range).await?))
}

/// Category breakdown for the month
///
/// GET /api/transactions/pie-chart
pub async fn get_pie_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let range = MonthRange::parse(state.report_year, query.month.as_deref())?;

    Ok(Json(state.reports.categories(range).await?))
}

/// Statistics, histogram and categories in one response
///
/// GET /api/transactions/combined
pub async fn get_combined(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedReport>, Error> {
    let range = MonthRange::parse(state.report_year, query.month.as_deref())?;

    let report = state.reports.combined(range).await?;

    info!(
        total_sale_amount = report.statistics.total_sale_amount,
        categories = report.category.len(),
        "Combined report returned"
    );

    Ok(Json(report))
}
