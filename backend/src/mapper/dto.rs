use std::sync::Arc;

use super::{
    ConverterRegistry, FieldAccess, IntToBoolean, IsoStringToDate, IsoStringToDateTime,
    MapperError, MappingEntry, ObjectMapper,
};

/// Transport specialization of [`ObjectMapper`]: the DTO is the internal
/// shape, the domain model the external one.
///
/// Carries the wire-flavored converter set (ISO-8601 dates with the zero
/// sentinel) under the same short aliases as the persistence side.
pub struct DtoMapper<D, M> {
    inner: ObjectMapper<D, M>,
}

impl<D: FieldAccess, M: FieldAccess> DtoMapper<D, M> {
    pub fn new(mapping: &[MappingEntry]) -> Result<Self, MapperError> {
        Self::with_converters(mapping, ConverterRegistry::new())
    }

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
            .with("date", Arc::new(IsoStringToDate))
            .with("datetime", Arc::new(IsoStringToDateTime))
            .with("bool", Arc::new(IntToBoolean))
    }

    pub fn to_many_dtos(&self, models: &[M]) -> Result<Vec<D>, MapperError> {
        self.inner.to_many_internals(models)
    }

    pub fn to_one_dto(&self, model: Option<&M>, dto: Option<D>) -> Result<Option<D>, MapperError> {
        self.inner.to_one_internal(model, dto)
    }

    pub fn to_many_models(&self, dtos: &[D]) -> Result<Vec<M>, MapperError> {
        self.inner.to_many_externals(dtos)
    }

    pub fn to_one_model(&self, dto: Option<&D>, model: Option<M>) -> Result<Option<M>, MapperError> {
        self.inner.to_one_external(dto, model)
    }
}
