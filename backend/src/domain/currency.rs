use chrono::NaiveDate;

use crate::mapper::{FieldAccess, MapperError, Value};

/// One daily exchange rate, in domain terms: native date, no storage or
/// wire concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub id: i64,
    pub valute_id: String,
    pub num_code: i64,
    pub char_code: String,
    pub name: String,
    pub nominal: i64,
    pub value: f64,
    pub date: NaiveDate,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            id: 0,
            valute_id: String::new(),
            num_code: 0,
            char_code: String::new(),
            name: String::new(),
            nominal: 0,
            value: 0.0,
            date: NaiveDate::default(),
        }
    }
}

impl FieldAccess for Currency {
    fn get(&self, field: &'static str) -> Result<Value, MapperError> {
        match field {
            "id" => Ok(Value::Int(self.id)),
            "valuteId" => Ok(Value::Str(self.valute_id.clone())),
            "numCode" => Ok(Value::Int(self.num_code)),
            "charCode" => Ok(Value::Str(self.char_code.clone())),
            "name" => Ok(Value::Str(self.name.clone())),
            "nominal" => Ok(Value::Int(self.nominal)),
            "value" => Ok(Value::Float(self.value)),
            "date" => Ok(Value::Date(self.date)),
            _ => Err(MapperError::unknown_field::<Self>(field)),
        }
    }

    fn set(&mut self, field: &'static str, value: Value) -> Result<(), MapperError> {
        match (field, value) {
            ("id", Value::Int(v)) => self.id = v,
            ("valuteId", Value::Str(v)) => self.valute_id = v,
            ("numCode", Value::Int(v)) => self.num_code = v,
            ("charCode", Value::Str(v)) => self.char_code = v,
            ("name", Value::Str(v)) => self.name = v,
            ("nominal", Value::Int(v)) => self.nominal = v,
            ("value", Value::Float(v)) => self.value = v,
            ("date", Value::Date(v)) => self.date = v,
            (_, value) => return Err(MapperError::field_type::<Self>(field, &value)),
        }
        Ok(())
    }
}
