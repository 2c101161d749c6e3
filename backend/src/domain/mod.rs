//! Framework-free business objects and the services that own them.

mod currency;
mod service;

pub use currency::Currency;
pub use service::CurrencyService;
