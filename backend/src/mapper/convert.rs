use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::{MapperError, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// PHP's calendar wraps a zeroed date around to November 30th of year -1
/// when a format string is round-tripped; stored data carrying that artifact
/// is normalized to a canonical zero sentinel instead of an invalid date.
const DEGENERATE_DATE: &str = "-0001-11-30";
const ZERO_DATETIME: &str = "0000-00-00 00:00:00";
const ZERO_DATETIME_ISO: &str = "0000-00-00T00:00:00+0000";

/// A stateless bidirectional value transformer for one mapped field.
///
/// `to_external` runs on the internal→external pass, `to_internal` on the
/// way back. Both are pure and must pass `Value::Null` through untouched.
/// `name` doubles as the type-identity key in a [`super::ConverterRegistry`].
pub trait ValueConverter: Send + Sync {
    fn name(&self) -> &'static str;

    fn to_external(&self, value: Value) -> Result<Value, MapperError>;

    fn to_internal(&self, value: Value) -> Result<Value, MapperError>;
}

fn expect_str(converter: &'static str, value: Value) -> Result<String, MapperError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(MapperError::conversion(converter, "a string", other.kind())),
    }
}

fn expect_int(converter: &'static str, value: Value) -> Result<i64, MapperError> {
    match value {
        Value::Int(i) => Ok(i),
        other => Err(MapperError::conversion(converter, "an integer", other.kind())),
    }
}

fn expect_bool(converter: &'static str, value: Value) -> Result<bool, MapperError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(MapperError::conversion(converter, "a boolean", other.kind())),
    }
}

fn expect_date(converter: &'static str, value: Value) -> Result<NaiveDate, MapperError> {
    match value {
        Value::Date(d) => Ok(d),
        other => Err(MapperError::conversion(converter, "a date", other.kind())),
    }
}

fn expect_datetime(converter: &'static str, value: Value) -> Result<DateTime<Utc>, MapperError> {
    match value {
        Value::DateTime(dt) => Ok(dt),
        other => Err(MapperError::conversion(converter, "a datetime", other.kind())),
    }
}

fn expect_json(converter: &'static str, value: Value) -> Result<serde_json::Value, MapperError> {
    match value {
        Value::Json(v) => Ok(v),
        other => Err(MapperError::conversion(converter, "a json value", other.kind())),
    }
}

/// 0/1 integer column <-> boolean.
pub struct IntToBoolean;

impl ValueConverter for IntToBoolean {
    fn name(&self) -> &'static str {
        "IntToBoolean"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Bool(expect_int(self.name(), value)? != 0))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Int(expect_bool(self.name(), value)? as i64))
    }
}

/// Decimal text column <-> integer.
pub struct StringToInt;

impl ValueConverter for StringToInt {
    fn name(&self) -> &'static str {
        "StringToInt"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(self.name(), value)?;
        let parsed = text
            .parse::<i64>()
            .map_err(|_| MapperError::conversion(self.name(), "an integer string", text))?;
        Ok(Value::Int(parsed))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Str(expect_int(self.name(), value)?.to_string()))
    }
}

/// `Y-m-d` text column <-> calendar date.
pub struct StringToDate;

impl ValueConverter for StringToDate {
    fn name(&self) -> &'static str {
        "StringToDate"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(self.name(), value)?;
        let date = NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map_err(|_| MapperError::conversion(self.name(), "a Y-m-d date string", text))?;
        Ok(Value::Date(date))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let date = expect_date(self.name(), value)?;
        Ok(Value::Str(date.format(DATE_FORMAT).to_string()))
    }
}

/// `Y-m-d H:M:S` text column (UTC) <-> datetime, normalizing the degenerate
/// wrapped date to the zero sentinel.
pub struct StringToDateTime;

impl ValueConverter for StringToDateTime {
    fn name(&self) -> &'static str {
        "StringToDateTime"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(self.name(), value)?;
        let naive = NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
            .map_err(|_| MapperError::conversion(self.name(), "a Y-m-d H:M:S string", text))?;
        Ok(Value::DateTime(naive.and_utc()))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let datetime = expect_datetime(self.name(), value)?;
        let formatted = datetime.format(DATETIME_FORMAT).to_string();
        if formatted.starts_with(DEGENERATE_DATE) {
            return Ok(Value::Str(ZERO_DATETIME.to_string()));
        }
        Ok(Value::Str(formatted))
    }
}

/// `Y-m-d` wire field <-> calendar date, DTO flavor: the degenerate wrapped
/// date serializes as the ISO zero sentinel.
pub struct IsoStringToDate;

impl ValueConverter for IsoStringToDate {
    fn name(&self) -> &'static str {
        "IsoStringToDate"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(self.name(), value)?;
        let date = NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map_err(|_| MapperError::conversion(self.name(), "a Y-m-d date string", text))?;
        Ok(Value::Date(date))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let date = expect_date(self.name(), value)?;
        let formatted = date.format(DATE_FORMAT).to_string();
        if formatted.starts_with(DEGENERATE_DATE) {
            return Ok(Value::Str(ZERO_DATETIME_ISO.to_string()));
        }
        Ok(Value::Str(formatted))
    }
}

/// ISO-8601 wire field (UTC offset) <-> datetime, DTO flavor.
pub struct IsoStringToDateTime;

impl ValueConverter for IsoStringToDateTime {
    fn name(&self) -> &'static str {
        "IsoStringToDateTime"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(self.name(), value)?;
        let parsed = DateTime::parse_from_str(&text, ISO8601_FORMAT)
            .map_err(|_| MapperError::conversion(self.name(), "an ISO-8601 string", text))?;
        Ok(Value::DateTime(parsed.with_timezone(&Utc)))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let datetime = expect_datetime(self.name(), value)?;
        let formatted = datetime.format(ISO8601_FORMAT).to_string();
        if formatted.starts_with(DEGENERATE_DATE) {
            return Ok(Value::Str(ZERO_DATETIME_ISO.to_string()));
        }
        Ok(Value::Str(formatted))
    }
}

/// JSON text column <-> structured value.
pub struct JsonToValue;

impl ValueConverter for JsonToValue {
    fn name(&self) -> &'static str {
        "JsonToValue"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let text = expect_str(self.name(), value)?;
        let parsed = serde_json::from_str(&text)
            .map_err(|_| MapperError::conversion(self.name(), "a json string", text))?;
        Ok(Value::Json(parsed))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        let json = expect_json(self.name(), value)?;
        let text = serde_json::to_string(&json)
            .map_err(|e| MapperError::conversion(self.name(), "a serializable value", e.to_string()))?;
        Ok(Value::Str(text))
    }
}

/// Lowercase column <-> uppercase external value.
pub struct LowerToUpperCase;

impl ValueConverter for LowerToUpperCase {
    fn name(&self) -> &'static str {
        "LowerToUpperCase"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Str(expect_str(self.name(), value)?.to_uppercase()))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Str(expect_str(self.name(), value)?.to_lowercase()))
    }
}

/// Uppercase column <-> lowercase external value.
pub struct UpperToLowerCase;

impl ValueConverter for UpperToLowerCase {
    fn name(&self) -> &'static str {
        "UpperToLowerCase"
    }

    fn to_external(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Str(expect_str(self.name(), value)?.to_lowercase()))
    }

    fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Str(expect_str(self.name(), value)?.to_uppercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn round_trips(converter: &dyn ValueConverter, internal: Value) {
        let external = converter.to_external(internal.clone()).unwrap();
        let back = converter.to_internal(external).unwrap();
        assert_eq!(back, internal, "{} round trip", converter.name());
    }

    #[test]
    fn all_converters_pass_null_through() {
        let converters: Vec<Box<dyn ValueConverter>> = vec![
            Box::new(IntToBoolean),
            Box::new(StringToInt),
            Box::new(StringToDate),
            Box::new(StringToDateTime),
            Box::new(IsoStringToDate),
            Box::new(IsoStringToDateTime),
            Box::new(JsonToValue),
            Box::new(LowerToUpperCase),
            Box::new(UpperToLowerCase),
        ];

        for converter in converters {
            assert_eq!(converter.to_external(Value::Null).unwrap(), Value::Null);
            assert_eq!(converter.to_internal(Value::Null).unwrap(), Value::Null);
        }
    }

    #[test]
    fn int_to_boolean() {
        assert_eq!(
            IntToBoolean.to_external(Value::Int(1)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            IntToBoolean.to_external(Value::Int(0)).unwrap(),
            Value::Bool(false)
        );
        round_trips(&IntToBoolean, Value::Int(1));
        round_trips(&IntToBoolean, Value::Int(0));
    }

    #[test]
    fn string_to_int() {
        assert_eq!(
            StringToInt.to_external(Value::Str("42".into())).unwrap(),
            Value::Int(42)
        );
        round_trips(&StringToInt, Value::Str("840".into()));

        let err = StringToInt.to_external(Value::Str("abc".into())).unwrap_err();
        assert!(err.to_string().contains("StringToInt"));
    }

    #[test]
    fn string_to_date() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert_eq!(
            StringToDate
                .to_external(Value::Str("2020-01-02".into()))
                .unwrap(),
            Value::Date(date)
        );
        round_trips(&StringToDate, Value::Str("2020-01-02".into()));
    }

    #[test]
    fn string_to_datetime() {
        let datetime = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            StringToDateTime
                .to_external(Value::Str("2020-01-02 03:04:05".into()))
                .unwrap(),
            Value::DateTime(datetime)
        );
        round_trips(&StringToDateTime, Value::Str("2020-01-02 03:04:05".into()));
    }

    #[test]
    fn degenerate_datetime_becomes_zero_sentinel() {
        let wrapped = NaiveDate::from_ymd_opt(-1, 11, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(
            StringToDateTime
                .to_internal(Value::DateTime(wrapped))
                .unwrap(),
            Value::Str("0000-00-00 00:00:00".into())
        );
        assert_eq!(
            IsoStringToDateTime
                .to_internal(Value::DateTime(wrapped))
                .unwrap(),
            Value::Str("0000-00-00T00:00:00+0000".into())
        );
    }

    #[test]
    fn degenerate_date_becomes_iso_zero_sentinel() {
        let wrapped = NaiveDate::from_ymd_opt(-1, 11, 30).unwrap();
        assert_eq!(
            IsoStringToDate.to_internal(Value::Date(wrapped)).unwrap(),
            Value::Str("0000-00-00T00:00:00+0000".into())
        );
    }

    #[test]
    fn iso_datetime_round_trip() {
        round_trips(
            &IsoStringToDateTime,
            Value::Str("2020-01-02T03:04:05+0000".into()),
        );
    }

    #[test]
    fn json_to_value() {
        let external = JsonToValue
            .to_external(Value::Str(r#"{"a":1}"#.into()))
            .unwrap();
        assert_eq!(external, Value::Json(serde_json::json!({"a": 1})));
        round_trips(&JsonToValue, Value::Str(r#"{"a":1}"#.into()));
    }

    #[test]
    fn case_converters() {
        assert_eq!(
            LowerToUpperCase
                .to_external(Value::Str("usd".into()))
                .unwrap(),
            Value::Str("USD".into())
        );
        round_trips(&LowerToUpperCase, Value::Str("usd".into()));

        assert_eq!(
            UpperToLowerCase
                .to_external(Value::Str("USD".into()))
                .unwrap(),
            Value::Str("usd".into())
        );
        round_trips(&UpperToLowerCase, Value::Str("USD".into()));
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let err = StringToDate.to_external(Value::Int(5)).unwrap_err();
        assert!(matches!(err, MapperError::Conversion { .. }));
    }
}
