use chrono::{DateTime, NaiveDate, Utc};

use super::MapperError;

/// A field value in transit between two entity shapes.
///
/// This is the closed set of variants a mapping table can move across a
/// field boundary. `Null` always converts to `Null`; converters never fail
/// on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Variant name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Int(_) => "an integer",
            Value::Float(_) => "a float",
            Value::Str(_) => "a string",
            Value::Date(_) => "a date",
            Value::DateTime(_) => "a datetime",
            Value::Json(_) => "a json value",
        }
    }
}

/// Field access by name, the seam the mapping engine works through.
///
/// Entities list their mappable fields in one `match`; there is no runtime
/// reflection. A name absent from the match is a mapping-table bug and fails
/// fast with [`MapperError::UnknownField`]. `Default` supplies the blank
/// target instance when a conversion is not handed one.
pub trait FieldAccess: Default {
    fn get(&self, field: &'static str) -> Result<Value, MapperError>;

    fn set(&mut self, field: &'static str, value: Value) -> Result<(), MapperError>;
}
