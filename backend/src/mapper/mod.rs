//! Generic bidirectional object mapping.
//!
//! The same logical entity lives in three shapes: a storage record, a
//! framework-free domain model and a transport DTO. Instead of hand-written
//! conversion code per pair, a declarative [`MappingEntry`] table describes
//! how fields correspond and an [`ObjectMapper`] executes it in both
//! directions, running per-field [`ValueConverter`]s and honoring read-only
//! fields. [`RecordMapper`] and [`DtoMapper`] preconfigure the engine with a
//! fixed converter registry and directionally-named methods.

mod convert;
mod dto;
mod object_mapper;
mod record;
mod value;

pub use convert::{
    IntToBoolean, IsoStringToDate, IsoStringToDateTime, JsonToValue, LowerToUpperCase,
    StringToDate, StringToDateTime, StringToInt, UpperToLowerCase, ValueConverter,
};
pub use dto::DtoMapper;
pub use object_mapper::{ConverterRegistry, MappingEntry, ObjectMapper};
pub use record::RecordMapper;
pub use value::{FieldAccess, Value};

use thiserror::Error;

/// Errors raised by the mapping engine.
///
/// All of these are programmer errors (misconfigured mapping tables or
/// entities out of step with their tables); the mapper never recovers from
/// them itself.
#[derive(Debug, Error)]
pub enum MapperError {
    /// A mapping entry referenced a converter alias absent from the merged
    /// registry. Raised while the mapper is constructed, before any
    /// conversion runs.
    #[error("unknown converter type: {alias}")]
    UnknownConverter { alias: String },

    /// A mapping entry named a field the entity does not expose.
    #[error("{type_name} has no field `{field}`")]
    UnknownField {
        type_name: &'static str,
        field: &'static str,
    },

    /// A field was handed a value variant it cannot hold.
    #[error("field `{field}` on {type_name} cannot hold {kind}")]
    FieldType {
        type_name: &'static str,
        field: &'static str,
        kind: &'static str,
    },

    /// A converter received a value outside its declared domain.
    #[error("converter {converter} expected {expected}, got {actual}")]
    Conversion {
        converter: &'static str,
        expected: &'static str,
        actual: String,
    },
}

impl MapperError {
    pub(crate) fn unknown_field<T>(field: &'static str) -> Self {
        MapperError::UnknownField {
            type_name: std::any::type_name::<T>(),
            field,
        }
    }

    pub(crate) fn field_type<T>(field: &'static str, value: &Value) -> Self {
        MapperError::FieldType {
            type_name: std::any::type_name::<T>(),
            field,
            kind: value.kind(),
        }
    }

    pub(crate) fn conversion(
        converter: &'static str,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        MapperError::Conversion {
            converter,
            expected,
            actual: actual.into(),
        }
    }
}
