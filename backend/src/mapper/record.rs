use std::sync::Arc;

use super::{
    ConverterRegistry, FieldAccess, IntToBoolean, JsonToValue, LowerToUpperCase, MapperError,
    MappingEntry, ObjectMapper, StringToDate, StringToDateTime, StringToInt, UpperToLowerCase,
};

/// Persistence specialization of [`ObjectMapper`]: storage record is the
/// internal shape, domain model the external one.
///
/// Ships the persistence converter set under its short aliases and exposes
/// directionally-named methods; no semantics beyond the generic engine.
pub struct RecordMapper<R, M> {
    inner: ObjectMapper<R, M>,
}

impl<R: FieldAccess, M: FieldAccess> RecordMapper<R, M> {
    pub fn new(mapping: &[MappingEntry]) -> Result<Self, MapperError> {
        Self::with_converters(mapping, ConverterRegistry::new())
    }

    /// Builds the mapper with caller-supplied converters layered over the
    /// base set (same alias replaces the built-in).
    pub fn with_converters(
        mapping: &[MappingEntry],
        overrides: ConverterRegistry,
    ) -> Result<Self, MapperError> {
        let converters = Self::base_converters().merge(overrides);
        Ok(Self {
            inner: ObjectMapper::new(mapping, converters)?,
        })
    }

    fn base_converters() -> ConverterRegistry {
        ConverterRegistry::new()
            .with("bool", Arc::new(IntToBoolean))
            .with("int", Arc::new(StringToInt))
            .with("date", Arc::new(StringToDate))
            .with("datetime", Arc::new(StringToDateTime))
            .with("json", Arc::new(JsonToValue))
            .with("lower", Arc::new(LowerToUpperCase))
            .with("upper", Arc::new(UpperToLowerCase))
    }

    pub fn to_many_models(&self, records: &[R]) -> Result<Vec<M>, MapperError> {
        self.inner.to_many_externals(records)
    }

    pub fn to_one_model(&self, record: Option<&R>) -> Result<Option<M>, MapperError> {
        self.inner.to_one_external(record, None)
    }

    /// Model back to record shape; read-only fields (server-assigned keys)
    /// are left at the record's prior value.
    pub fn to_record(&self, model: Option<&M>, record: Option<R>) -> Result<Option<R>, MapperError> {
        self.inner.to_one_internal(model, record)
    }

    pub fn to_many_records(&self, models: &[M]) -> Result<Vec<R>, MapperError> {
        self.inner.to_many_internals(models)
    }
}
