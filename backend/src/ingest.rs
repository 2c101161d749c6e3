use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, warn};

use crate::centrobank::RateFeed;
use crate::domain::CurrencyService;
use crate::storage::StoreError;

/// Batch job: fetch and store the rate feed for the trailing N calendar
/// days, newest first.
///
/// A day whose rates are already in the table is reported and skipped; the
/// run carries on with the older days. Anything else (feed failure, other
/// persistence errors) aborts the run.
pub struct RateLoader {
    service: CurrencyService,
    feed: Arc<dyn RateFeed>,
    days: u32,
}

impl RateLoader {
    pub fn new(service: CurrencyService, feed: Arc<dyn RateFeed>, days: u32) -> Self {
        Self {
            service,
            feed,
            days,
        }
    }

    pub async fn run(&self) -> Result<()> {
        self.run_from(Utc::now().date_naive()).await
    }

    pub async fn run_from(&self, newest: NaiveDate) -> Result<()> {
        let mut date = newest;
        for _ in 0..self.days {
            let rates = self.feed.rates_for(date).await?;

            match self.service.store_daily_rates(date, rates).await {
                Ok(()) => info!("Stored rates for {}", date),
                Err(StoreError::AlreadyCollected) => {
                    warn!("Rates for {} already collected, skipping", date);
                }
                Err(e) => return Err(e.into()),
            }

            date -= Duration::days(1);
        }

        Ok(())
    }
}
