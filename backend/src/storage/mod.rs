//! Persistence layer: row-shaped records and repositories over sqlx.

mod record;
mod repository;

pub use record::CurrencyRecord;
pub use repository::{CurrencyRepository, StoreError};
