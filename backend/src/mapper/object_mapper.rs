use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{FieldAccess, MapperError, ValueConverter};

/// One row of a declarative mapping table.
///
/// The table is written from the internal shape's point of view. A bare
/// shared name maps a field onto itself; an explicit entry renames it,
/// optionally runs an aliased converter, and can mark the external side
/// read-only or exclude the field outright:
///
/// ```ignore
/// &[
///     MappingEntry::shared("charCode"),
///     MappingEntry::renamed("valuteID", "valuteId"),
///     MappingEntry::converted("date", "date", "date"),
///     MappingEntry::converted("id", "id", "int").read_only(),
///     MappingEntry::excluded("internalOnly"),
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct MappingEntry {
    internal: &'static str,
    external: Option<&'static str>,
    converter: Option<&'static str>,
    writable: bool,
}

impl MappingEntry {
    /// Same field name on both sides, no converter.
    pub fn shared(name: &'static str) -> Self {
        Self {
            internal: name,
            external: Some(name),
            converter: None,
            writable: true,
        }
    }

    /// Internal field exposed under a different external name.
    pub fn renamed(internal: &'static str, external: &'static str) -> Self {
        Self {
            internal,
            external: Some(external),
            converter: None,
            writable: true,
        }
    }

    /// Renamed field with a registered converter alias.
    pub fn converted(
        internal: &'static str,
        external: &'static str,
        converter: &'static str,
    ) -> Self {
        Self {
            internal,
            external: Some(external),
            converter: Some(converter),
            writable: true,
        }
    }

    /// Field intentionally left out of the mapping; both directions skip it.
    pub fn excluded(internal: &'static str) -> Self {
        Self {
            internal,
            external: None,
            converter: None,
            writable: true,
        }
    }

    /// Marks the external side read-only: internal→external still populates
    /// the field, external→internal leaves the internal value untouched.
    /// Used for server-assigned fields such as surrogate keys.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// Converter lookup by short alias or by type identity.
///
/// Every registration is stored under both its alias and the converter's
/// [`ValueConverter::name`], so mapping tables can reference either.
/// `merge` layers mapper-specific overrides over a base registry.
#[derive(Default, Clone)]
pub struct ConverterRegistry {
    converters: HashMap<&'static str, Arc<dyn ValueConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, alias: &'static str, converter: Arc<dyn ValueConverter>) {
        self.converters.insert(converter.name(), Arc::clone(&converter));
        self.converters.insert(alias, converter);
    }

    pub fn with(mut self, alias: &'static str, converter: Arc<dyn ValueConverter>) -> Self {
        self.register(alias, converter);
        self
    }

    /// Later registrations win, so `base.merge(overrides)` lets a caller
    /// replace a built-in under the same alias.
    pub fn merge(mut self, overrides: ConverterRegistry) -> Self {
        self.converters.extend(overrides.converters);
        self
    }

    pub fn get(&self, alias: &str) -> Option<Arc<dyn ValueConverter>> {
        self.converters.get(alias).cloned()
    }
}

/// Resolved decision for one mapped field.
struct PropertyMapping {
    internal_name: &'static str,
    external_name: &'static str,
    external_read_only: bool,
    converter: Option<Arc<dyn ValueConverter>>,
}

/// Declarative bidirectional mapper between an internal shape `I` and an
/// external shape `E`.
///
/// The whole mapping table is resolved in the constructor: converter aliases
/// are looked up once and an alias missing from the registry aborts
/// construction, before any request traffic can hit it. Excluded entries are
/// dropped here and never consulted again. The resolved table is immutable,
/// so a mapper may be shared across tasks freely.
pub struct ObjectMapper<I, E> {
    mappings: Vec<PropertyMapping>,
    _shapes: PhantomData<fn() -> (I, E)>,
}

impl<I: FieldAccess, E: FieldAccess> ObjectMapper<I, E> {
    pub fn new(
        mapping: &[MappingEntry],
        converters: ConverterRegistry,
    ) -> Result<Self, MapperError> {
        let mut mappings = Vec::with_capacity(mapping.len());
        for entry in mapping {
            let Some(external_name) = entry.external else {
                continue;
            };

            let converter = match entry.converter {
                Some(alias) => Some(converters.get(alias).ok_or_else(|| {
                    MapperError::UnknownConverter {
                        alias: alias.to_string(),
                    }
                })?),
                None => None,
            };

            mappings.push(PropertyMapping {
                internal_name: entry.internal,
                external_name,
                external_read_only: !entry.writable,
                converter,
            });
        }

        Ok(Self {
            mappings,
            _shapes: PhantomData,
        })
    }

    /// Converts one internal instance to the external shape. A `None` input
    /// yields `Ok(None)`; a supplied target is populated in place, otherwise
    /// a blank external instance is created.
    pub fn to_one_external(
        &self,
        internal: Option<&I>,
        target: Option<E>,
    ) -> Result<Option<E>, MapperError> {
        let Some(internal) = internal else {
            return Ok(None);
        };

        let mut external = target.unwrap_or_default();
        for mapping in &self.mappings {
            let value = internal.get(mapping.internal_name)?;
            let value = match &mapping.converter {
                Some(converter) => converter.to_external(value)?,
                None => value,
            };
            external.set(mapping.external_name, value)?;
        }

        Ok(Some(external))
    }

    /// Converts one external instance back to the internal shape. Read-only
    /// mappings are skipped entirely, leaving the internal field at its
    /// prior value.
    pub fn to_one_internal(
        &self,
        external: Option<&E>,
        target: Option<I>,
    ) -> Result<Option<I>, MapperError> {
        let Some(external) = external else {
            return Ok(None);
        };

        let mut internal = target.unwrap_or_default();
        for mapping in &self.mappings {
            if mapping.external_read_only {
                continue;
            }

            let value = external.get(mapping.external_name)?;
            let value = match &mapping.converter {
                Some(converter) => converter.to_internal(value)?,
                None => value,
            };
            internal.set(mapping.internal_name, value)?;
        }

        Ok(Some(internal))
    }

    /// Converts a batch, one fresh external instance per element, order
    /// preserved.
    pub fn to_many_externals(&self, internals: &[I]) -> Result<Vec<E>, MapperError> {
        let mut externals = Vec::with_capacity(internals.len());
        for internal in internals {
            if let Some(external) = self.to_one_external(Some(internal), None)? {
                externals.push(external);
            }
        }
        Ok(externals)
    }

    pub fn to_many_internals(&self, externals: &[E]) -> Result<Vec<I>, MapperError> {
        let mut internals = Vec::with_capacity(externals.len());
        for external in externals {
            if let Some(internal) = self.to_one_internal(Some(external), None)? {
                internals.push(internal);
            }
        }
        Ok(internals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{StringToInt, Value};

    /// Row-shaped side: integers stored as text, plus a field the mapping
    /// excludes and a server-assigned key.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Row {
        key: i64,
        code: String,
        label: String,
        secret: String,
    }

    impl FieldAccess for Row {
        fn get(&self, field: &'static str) -> Result<Value, MapperError> {
            match field {
                "key" => Ok(Value::Int(self.key)),
                "code" => Ok(Value::Str(self.code.clone())),
                "label" => Ok(Value::Str(self.label.clone())),
                "secret" => Ok(Value::Str(self.secret.clone())),
                _ => Err(MapperError::unknown_field::<Self>(field)),
            }
        }

        fn set(&mut self, field: &'static str, value: Value) -> Result<(), MapperError> {
            match (field, value) {
                ("key", Value::Int(v)) => self.key = v,
                ("code", Value::Str(v)) => self.code = v,
                ("label", Value::Str(v)) => self.label = v,
                ("secret", Value::Str(v)) => self.secret = v,
                (_, value) => return Err(MapperError::field_type::<Self>(field, &value)),
            }
            Ok(())
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Entity {
        key: i64,
        code: i64,
        title: String,
    }

    impl FieldAccess for Entity {
        fn get(&self, field: &'static str) -> Result<Value, MapperError> {
            match field {
                "key" => Ok(Value::Int(self.key)),
                "code" => Ok(Value::Int(self.code)),
                "title" => Ok(Value::Str(self.title.clone())),
                _ => Err(MapperError::unknown_field::<Self>(field)),
            }
        }

        fn set(&mut self, field: &'static str, value: Value) -> Result<(), MapperError> {
            match (field, value) {
                ("key", Value::Int(v)) => self.key = v,
                ("code", Value::Int(v)) => self.code = v,
                ("title", Value::Str(v)) => self.title = v,
                (_, value) => return Err(MapperError::field_type::<Self>(field, &value)),
            }
            Ok(())
        }
    }

    fn mapping() -> Vec<MappingEntry> {
        vec![
            MappingEntry::shared("key").read_only(),
            MappingEntry::converted("code", "code", "int"),
            MappingEntry::renamed("label", "title"),
            MappingEntry::excluded("secret"),
        ]
    }

    fn registry() -> ConverterRegistry {
        ConverterRegistry::new().with("int", Arc::new(StringToInt))
    }

    fn mapper() -> ObjectMapper<Row, Entity> {
        ObjectMapper::new(&mapping(), registry()).unwrap()
    }

    fn sample_row() -> Row {
        Row {
            key: 7,
            code: "840".into(),
            label: "US Dollar".into(),
            secret: "do not map".into(),
        }
    }

    #[test]
    fn shared_field_round_trips_unchanged() {
        let mapper = ObjectMapper::<Row, Entity>::new(
            &[MappingEntry::shared("key")],
            ConverterRegistry::new(),
        )
        .unwrap();

        let row = sample_row();
        let entity = mapper.to_one_external(Some(&row), None).unwrap().unwrap();
        assert_eq!(entity.key, 7);

        let back = mapper.to_one_internal(Some(&entity), None).unwrap().unwrap();
        assert_eq!(back.key, row.key);
    }

    #[test]
    fn converts_and_renames_to_external() {
        let entity = mapper()
            .to_one_external(Some(&sample_row()), None)
            .unwrap()
            .unwrap();

        assert_eq!(entity.key, 7);
        assert_eq!(entity.code, 840);
        assert_eq!(entity.title, "US Dollar");
    }

    #[test]
    fn none_input_yields_none() {
        assert!(mapper().to_one_external(None, None).unwrap().is_none());
        assert!(mapper().to_one_internal(None, None).unwrap().is_none());
    }

    #[test]
    fn read_only_field_is_skipped_on_the_way_back() {
        let mapper = mapper();
        let entity = Entity {
            key: 999,
            code: 840,
            title: "US Dollar".into(),
        };

        let prior = Row {
            key: 7,
            ..Row::default()
        };
        let row = mapper
            .to_one_internal(Some(&entity), Some(prior))
            .unwrap()
            .unwrap();

        // key untouched, everything writable applied
        assert_eq!(row.key, 7);
        assert_eq!(row.code, "840");
        assert_eq!(row.label, "US Dollar");
    }

    #[test]
    fn read_only_field_still_populates_external() {
        let entity = mapper()
            .to_one_external(Some(&sample_row()), None)
            .unwrap()
            .unwrap();
        assert_eq!(entity.key, 7);
    }

    #[test]
    fn excluded_field_never_crosses() {
        let mapper = mapper();

        let entity = mapper
            .to_one_external(Some(&sample_row()), None)
            .unwrap()
            .unwrap();
        // Entity has no secret field at all; reaching it would have errored.
        let row = mapper.to_one_internal(Some(&entity), None).unwrap().unwrap();
        assert_eq!(row.secret, "");
    }

    #[test]
    fn supplied_target_is_reused() {
        let target = Entity {
            key: 0,
            code: 0,
            title: "stale".into(),
        };
        let entity = mapper()
            .to_one_external(Some(&sample_row()), Some(target))
            .unwrap()
            .unwrap();
        assert_eq!(entity.title, "US Dollar");
    }

    #[test]
    fn batch_preserves_order_and_count() {
        let rows = vec![
            Row {
                code: "1".into(),
                ..sample_row()
            },
            Row {
                code: "2".into(),
                ..sample_row()
            },
            Row {
                code: "3".into(),
                ..sample_row()
            },
        ];

        let entities = mapper().to_many_externals(&rows).unwrap();
        assert_eq!(entities.len(), 3);
        assert_eq!(
            entities.iter().map(|e| e.code).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        assert!(mapper().to_many_externals(&[]).unwrap().is_empty());
    }

    #[test]
    fn unknown_alias_fails_at_construction() {
        let err = ObjectMapper::<Row, Entity>::new(
            &[MappingEntry::converted("code", "code", "decimal")],
            registry(),
        )
        .err()
        .unwrap();

        assert!(matches!(
            &err,
            MapperError::UnknownConverter { alias } if alias == "decimal"
        ));
        assert!(err.to_string().contains("decimal"));
    }

    #[test]
    fn converter_reachable_by_type_identity() {
        let mapper = ObjectMapper::<Row, Entity>::new(
            &[MappingEntry::converted("code", "code", "StringToInt")],
            registry(),
        )
        .unwrap();

        let entity = mapper
            .to_one_external(Some(&sample_row()), None)
            .unwrap()
            .unwrap();
        assert_eq!(entity.code, 840);
    }

    #[test]
    fn override_replaces_base_converter() {
        struct Doubling;
        impl crate::mapper::ValueConverter for Doubling {
            fn name(&self) -> &'static str {
                "Doubling"
            }
            fn to_external(&self, value: Value) -> Result<Value, MapperError> {
                match value {
                    Value::Str(s) => Ok(Value::Int(s.parse::<i64>().unwrap_or(0) * 2)),
                    other => Ok(other),
                }
            }
            fn to_internal(&self, value: Value) -> Result<Value, MapperError> {
                match value {
                    Value::Int(i) => Ok(Value::Str((i / 2).to_string())),
                    other => Ok(other),
                }
            }
        }

        let merged = registry().merge(ConverterRegistry::new().with("int", Arc::new(Doubling)));
        let mapper =
            ObjectMapper::<Row, Entity>::new(&[MappingEntry::converted("code", "code", "int")], merged)
                .unwrap();

        let entity = mapper
            .to_one_external(Some(&sample_row()), None)
            .unwrap()
            .unwrap();
        assert_eq!(entity.code, 1680);
    }

    #[test]
    fn unknown_field_fails_fast() {
        let mapper = ObjectMapper::<Row, Entity>::new(
            &[MappingEntry::shared("missing")],
            ConverterRegistry::new(),
        )
        .unwrap();

        let err = mapper.to_one_external(Some(&sample_row()), None).err().unwrap();
        assert!(matches!(err, MapperError::UnknownField { .. }));
    }
}
