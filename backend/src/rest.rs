use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use shared::{CurrencyDto, ObjectResponse};
use tracing::info;

use crate::domain::{Currency, CurrencyService};
use crate::error::ApiError;
use crate::mapper::{DtoMapper, FieldAccess, MapperError, MappingEntry, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Application state shared across handlers. The DTO mapper is resolved once
/// here; its table is immutable afterwards, so cloning the state just bumps
/// the Arc.
#[derive(Clone)]
pub struct AppState {
    pub currency_service: CurrencyService,
    currency_mapper: Arc<DtoMapper<CurrencyDto, Currency>>,
}

impl AppState {
    pub fn new(currency_service: CurrencyService) -> Result<Self, MapperError> {
        let currency_mapper = DtoMapper::new(&currency_dto_mapping())?;
        Ok(Self {
            currency_service,
            currency_mapper: Arc::new(currency_mapper),
        })
    }
}

fn currency_dto_mapping() -> Vec<MappingEntry> {
    vec![
        MappingEntry::shared("id"),
        MappingEntry::shared("valuteId"),
        MappingEntry::shared("numCode"),
        MappingEntry::shared("charCode"),
        MappingEntry::shared("name"),
        MappingEntry::shared("nominal"),
        MappingEntry::shared("value"),
        MappingEntry::converted("date", "date", "date"),
    ]
}

impl FieldAccess for CurrencyDto {
    fn get(&self, field: &'static str) -> Result<Value, MapperError> {
        match field {
            "id" => Ok(Value::Int(self.id)),
            "valuteId" => Ok(Value::Str(self.valute_id.clone())),
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
            ("valuteId", Value::Str(v)) => self.valute_id = v,
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

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/currencies/:from/:to", get(list_currencies))
        .with_state(state)
}

/// Axum handler for GET /currencies/:from/:to
pub async fn list_currencies(
    State(state): State<AppState>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<ObjectResponse<Vec<CurrencyDto>>>, ApiError> {
    info!("GET /currencies/{}/{}", from, to);

    let from = NaiveDate::parse_from_str(&from, DATE_FORMAT)
        .map_err(|_| ApiError::BadRequest("From must be a date in Y-m-d format".to_string()))?;
    let to = NaiveDate::parse_from_str(&to, DATE_FORMAT)
        .map_err(|_| ApiError::BadRequest("To must be a date in Y-m-d format".to_string()))?;
    if from > to {
        return Err(ApiError::BadRequest(
            "From must be less than or equal to To".to_string(),
        ));
    }

    let rates = state.currency_service.find_rates_between(from, to).await?;
    let dtos = state.currency_mapper.to_many_dtos(&rates)?;

    Ok(Json(ObjectResponse::success(dtos)))
}
