//! Central Bank daily-rates feed: HTTP client and XML parsing.

mod api;
mod parser;

pub use api::{CentralBankApi, RateFeed, DAILY_RATES_URL};
pub use parser::{parse_daily_rates, FeedDocument, RateRecord};

use thiserror::Error;

/// Failures while fetching or decoding the rate feed. None of these are
/// recovered locally; a broken feed aborts the ingestion run.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed XML is not well-formed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed payload is malformed: {0}")]
    Malformed(String),
}
