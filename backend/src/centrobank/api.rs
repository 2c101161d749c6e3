use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::{parse_daily_rates, FeedError, RateRecord};

/// Central Bank daily rates endpoint; the date goes on the end as
/// `dd/mm/YYYY`.
pub const DAILY_RATES_URL: &str = "http://www.cbr.ru/scripts/XML_daily.asp?date_req=";

const BANK_DATE_FORMAT: &str = "%d/%m/%Y";

/// External rate source for one calendar day.
#[async_trait]
pub trait RateFeed: Send + Sync {
    async fn rates_for(&self, date: NaiveDate) -> Result<Vec<RateRecord>, FeedError>;
}

/// HTTP implementation against the Central Bank XML feed.
pub struct CentralBankApi {
    client: reqwest::Client,
    base_url: String,
}

impl CentralBankApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for CentralBankApi {
    fn default() -> Self {
        Self::new(DAILY_RATES_URL)
    }
}

#[async_trait]
impl RateFeed for CentralBankApi {
    async fn rates_for(&self, date: NaiveDate) -> Result<Vec<RateRecord>, FeedError> {
        let url = format!("{}{}", self.base_url, date.format(BANK_DATE_FORMAT));
        debug!("Fetching rates from {}", url);

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let document = parse_daily_rates(&body)?;
        debug!(
            "Feed reported {} rates for {:?}",
            document.rates.len(),
            document.date
        );

        Ok(document.rates)
    }
}
