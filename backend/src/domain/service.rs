use chrono::NaiveDate;
use tracing::info;

use crate::centrobank::RateRecord;
use crate::storage::{CurrencyRepository, StoreError};

use super::Currency;

/// Service for reading and recording daily exchange rates
#[derive(Clone)]
pub struct CurrencyService {
    repository: CurrencyRepository,
}

impl CurrencyService {
    pub fn new(repository: CurrencyRepository) -> Self {
        Self { repository }
    }

    /// All rates dated within `[from, to]` inclusive.
    pub async fn find_rates_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Currency>, StoreError> {
        info!("Listing rates from {} to {}", from, to);

        self.repository.find_by_date_range(from, to).await
    }

    /// Builds one domain rate per plain feed record, all dated `date`, and
    /// stores the whole day as one batch. `id` stays at its default; the
    /// persistence mapping keeps it out of the insert.
    pub async fn store_daily_rates(
        &self,
        date: NaiveDate,
        rates: Vec<RateRecord>,
    ) -> Result<(), StoreError> {
        info!("Storing {} rates for {}", rates.len(), date);

        let currencies: Vec<Currency> = rates
            .into_iter()
            .map(|rate| Currency {
                id: 0,
                valute_id: rate.valute_id,
                num_code: rate.num_code,
                char_code: rate.char_code,
                name: rate.name,
                nominal: rate.nominal,
                value: rate.value,
                date,
            })
            .collect();

        self.repository.create_many(&currencies).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;

    async fn setup_service() -> CurrencyService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let repository = CurrencyRepository::new(db).expect("Failed to build repository");
        CurrencyService::new(repository)
    }

    fn feed_record(num_code: i64, char_code: &str) -> RateRecord {
        RateRecord {
            valute_id: format!("R0{}", num_code),
            num_code,
            char_code: char_code.to_string(),
            nominal: 1,
            name: format!("{} test currency", char_code),
            value: 70.0 + num_code as f64 / 100.0,
        }
    }

    #[tokio::test]
    async fn test_store_daily_rates_attaches_the_fetch_date() {
        let service = setup_service().await;
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        service
            .store_daily_rates(day, vec![feed_record(840, "USD"), feed_record(978, "EUR")])
            .await
            .expect("store failed");

        let rates = service
            .find_rates_between(day, day)
            .await
            .expect("query failed");
        assert_eq!(rates.len(), 2);
        assert!(rates.iter().all(|c| c.date == day));
    }

    #[tokio::test]
    async fn test_storing_the_same_day_twice_reports_already_collected() {
        let service = setup_service().await;
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        service
            .store_daily_rates(day, vec![feed_record(840, "USD")])
            .await
            .expect("first store failed");

        let err = service
            .store_daily_rates(day, vec![feed_record(840, "USD")])
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::AlreadyCollected));
    }
}
