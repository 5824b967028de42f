//! Record store for sale transactions.
//!
//! Services receive an `Arc<dyn TransactionStore>` so report and listing logic
//! never reaches for a global connection.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::OnConflict,
};
use tracing::debug;

use crate::entities::{prelude::*, transactions};
use crate::services::query::TransactionFilter;

/// Rows per INSERT statement, well under the bind parameter limits of
/// Postgres and SQLite.
const INSERT_CHUNK_SIZE: usize = 500;

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Upsert `records` by id inside one database transaction.
    ///
    /// Returns the number of records written.
    async fn insert_batch(&self, records: Vec<transactions::Model>) -> Result<u64, DbErr>;

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, DbErr>;

    /// One page of matches ordered by sale date, then id.
    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<transactions::Model>, DbErr>;

    /// Sum of `price` over the matches, `0.0` when nothing matches.
    async fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, DbErr>;

    /// Match counts grouped by category, sorted by category name.
    async fn count_by_category(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<(String, u64)>, DbErr>;
}

fn upsert_model(model: transactions::Model) -> transactions::ActiveModel {
    transactions::ActiveModel {
        id: Set(model.id),
        title: Set(model.title),
        description: Set(model.description),
        price: Set(model.price),
        category: Set(model.category),
        image: Set(model.image),
        sold: Set(model.sold),
        date_of_sale: Set(model.date_of_sale),
    }
}

/// [`TransactionStore`] backed by a sea-orm connection.
#[derive(Clone)]
pub struct DbTransactionStore {
    db: DatabaseConnection,
}

impl DbTransactionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionStore for DbTransactionStore {
    async fn insert_batch(&self, records: Vec<transactions::Model>) -> Result<u64, DbErr> {
        if records.is_empty() {
            return Ok(0);
        }

        let total = records.len();
        let txn = self.db.begin().await?;

        let mut written = 0;
        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            let models = chunk.iter().cloned().map(upsert_model);

            written += Transactions::insert_many(models)
                .on_conflict(
                    OnConflict::column(transactions::Column::Id)
                        .update_columns([
                            transactions::Column::Title,
                            transactions::Column::Description,
                            transactions::Column::Price,
                            transactions::Column::Category,
                            transactions::Column::Image,
                            transactions::Column::Sold,
                            transactions::Column::DateOfSale,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        debug!(records = total, written, "Upserted transaction batch");
        Ok(written)
    }

    async fn count(&self, filter: &TransactionFilter) -> Result<u64, DbErr> {
        Transactions::find()
            .filter(filter.condition())
            .count(&self.db)
            .await
    }

    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        Transactions::find()
            .filter(filter.condition())
            .order_by(transactions::Column::DateOfSale, Order::Asc)
            .order_by(transactions::Column::Id, Order::Asc)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
    }

    async fn sum_price(&self, filter: &TransactionFilter) -> Result<f64, DbErr> {
        let total = Transactions::find()
            .select_only()
            .column_as(transactions::Column::Price.sum(), "total")
            .filter(filter.condition())
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0.0))
    }

    async fn count_by_category(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<(String, u64)>, DbErr> {
        let rows = Transactions::find()
            .select_only()
            .column(transactions::Column::Category)
            .column_as(transactions::Column::Id.count(), "count")
            .filter(filter.condition())
            .group_by(transactions::Column::Category)
            .order_by(transactions::Column::Category, Order::Asc)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, count)| (category, count.max(0) as u64))
            .collect())
    }
}
