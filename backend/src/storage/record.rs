use sqlx::FromRow;

use crate::mapper::{FieldAccess, MapperError, MappingEntry, Value};

/// Row shape of the `currency` table, column-typed: the calendar date is
/// stored as `Y-m-d` text, the rate as REAL.
#[derive(Debug, Clone, Default, FromRow)]
pub struct CurrencyRecord {
    pub id: i64,
    #[sqlx(rename = "valuteID")]
    pub valute_id: String,
    #[sqlx(rename = "numCode")]
    pub num_code: i64,
    #[sqlx(rename = "charCode")]
    pub char_code: String,
    pub name: String,
    pub nominal: i64,
    pub value: f64,
    pub date: String,
}

impl CurrencyRecord {
    /// Mapping onto the domain model. `id` is server-assigned, so the model
    /// side never writes it back into a record.
    pub fn mapping() -> Vec<MappingEntry> {
        vec![
            MappingEntry::shared("id").read_only(),
            MappingEntry::renamed("valuteID", "valuteId"),
            MappingEntry::shared("numCode"),
            MappingEntry::shared("charCode"),
            MappingEntry::shared("name"),
            MappingEntry::shared("nominal"),
            MappingEntry::shared("value"),
            MappingEntry::converted("date", "date", "date"),
        ]
    }
}

impl FieldAccess for CurrencyRecord {
    fn get(&self, field: &'static str) -> Result<Value, MapperError> {
        match field {
            "id" => Ok(Value::Int(self.id)),
            "valuteID" => Ok(Value::Str(self.valute_id.clone())),
            "numCode" => Ok(Value::Int(self.num_code)),
            "charCode" => Ok(Value::Str(self.char_code.clone())),
            "name" => Ok(Value::Str(self.name.clone())),
            "nominal" => Ok(Value::Int(self.nominal)),
            "value" => Ok(Value::Float(self.value)),
            "date" => Ok(Value::Str(self.date.clone())),
            _ => Err(MapperError::unknown_field::<Self>(field)),
        }
    }

    fn set(&mut self, field: &'static str, value: Value) -> Result<(), MapperError> {
        match (field, value) {
            ("id", Value::Int(v)) => self.id = v,
            ("valuteID", Value::Str(v)) => self.valute_id = v,
            ("numCode", Value::Int(v)) => self.num_code = v,
            ("charCode", Value::Str(v)) => self.char_code = v,
            ("name", Value::Str(v)) => self.name = v,
            ("nominal", Value::Int(v)) => self.nominal = v,
            ("value", Value::Float(v)) => self.value = v,
            ("date", Value::Str(v)) => self.date = v,
            (_, value) => return Err(MapperError::field_type::<Self>(field, &value)),
        }
        Ok(())
    }
}
