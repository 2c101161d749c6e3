use serde::{Deserialize, Serialize};

/// One daily exchange rate as it appears on the wire.
///
/// `date` is a calendar day formatted `YYYY-MM-DD`; `value` is the rouble
/// price of `nominal` units of the currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDto {
    pub id: i64,
    /// Central Bank valute identifier (e.g. "R01235")
    pub valute_id: String,
    /// ISO 4217 numeric code
    pub num_code: i64,
    /// ISO 4217 alphabetic code
    pub char_code: String,
    pub name: String,
    pub nominal: i64,
    pub value: f64,
    pub date: String,
}

pub const RESULT_SUCCESS: &str = "success";
pub const RESULT_ERROR: &str = "error";

/// Standard success envelope: `{"result":"success","message":null,"data":...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectResponse<T> {
    pub result: String,
    pub message: Option<String>,
    pub data: T,
}

impl<T> ObjectResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            result: RESULT_SUCCESS.to_string(),
            message: None,
            data,
        }
    }
}

/// Error envelope matching the framework-style HTTP error body:
/// `{"name":"Bad Request","message":"...","code":0,"status":400}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
    pub code: i32,
    pub status: u16,
}

impl ErrorBody {
    pub fn new(name: &str, message: impl Into<String>, status: u16) -> Self {
        Self {
            name: name.to_string(),
            message: message.into(),
            code: 0,
            status,
        }
    }
}
