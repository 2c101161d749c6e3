use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::QueryBuilder;
use thiserror::Error;

use crate::db::DbConnection;
use crate::domain::Currency;
use crate::mapper::{MapperError, RecordMapper};

use super::CurrencyRecord;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Persistence failures surfaced by repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique `(numCode, date)` constraint fired: that day's rates are
    /// already in the table.
    #[error("rates for this day already collected")]
    AlreadyCollected,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Mapping(#[from] MapperError),
}

/// Repository for daily currency rates. Owns its record↔model mapper, built
/// once from the declarative table; a bad mapping aborts construction.
#[derive(Clone)]
pub struct CurrencyRepository {
    db: DbConnection,
    mapper: Arc<RecordMapper<CurrencyRecord, Currency>>,
}

impl CurrencyRepository {
    pub fn new(db: DbConnection) -> Result<Self, StoreError> {
        let mapper = RecordMapper::new(&CurrencyRecord::mapping())?;
        Ok(Self {
            db,
            mapper: Arc::new(mapper),
        })
    }

    /// All rates with `date` in `[from, to]` inclusive.
    pub async fn find_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Currency>, StoreError> {
        let records: Vec<CurrencyRecord> = sqlx::query_as(
            "SELECT id, valuteID, numCode, charCode, name, nominal, value, date \
             FROM currency WHERE date >= ? AND date <= ? ORDER BY date, numCode",
        )
        .bind(from.format(DATE_FORMAT).to_string())
        .bind(to.format(DATE_FORMAT).to_string())
        .fetch_all(self.db.pool())
        .await?;

        Ok(self.mapper.to_many_models(&records)?)
    }

    /// Inserts a batch of rates in one statement. A uniqueness violation on
    /// `(numCode, date)` maps to [`StoreError::AlreadyCollected`]; nothing
    /// from the batch is kept in that case.
    pub async fn create_many(&self, currencies: &[Currency]) -> Result<(), StoreError> {
        let records = self.mapper.to_many_records(currencies)?;
        if records.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO currency (valuteID, numCode, charCode, name, nominal, value, date) ",
        );
        builder.push_values(records.iter(), |mut row, record| {
            row.push_bind(&record.valute_id)
                .push_bind(record.num_code)
                .push_bind(&record.char_code)
                .push_bind(&record.name)
                .push_bind(record.nominal)
                .push_bind(record.value)
                .push_bind(&record.date);
        });

        builder
            .build()
            .execute(self.db.pool())
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::AlreadyCollected
                }
                _ => StoreError::Database(e),
            })?;

        Ok(())
    }
}
