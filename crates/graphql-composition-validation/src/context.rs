use crate::{
    CompositionLog, IngestError,
    schema::{FieldDefinition, SchemaDefinition, TypeDefinition},
};
use indexmap::IndexMap;
use std::collections::HashSet;

/// The source schemas to validate and the log diagnostics are appended to.
pub struct CompositionContext {
    schemas: Vec<SchemaDefinition>,
    pub(crate) log: CompositionLog,
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("two source schemas are named '{0}', schema names must be unique")]
    DuplicateSchemaName(String),
    #[error("the source schema at index {index} cannot be used: {source}")]
    Ingest {
        index: usize,
        #[source]
        source: IngestError,
    },
}

impl CompositionContext {
    /// Schemas without an explicit name are named `A`, `B`, `C`… by position.
    pub fn new(schemas: Vec<SchemaDefinition>) -> Result<Self, ContextError> {
        let mut schemas = schemas;
        let mut seen = HashSet::with_capacity(schemas.len());

        for (index, schema) in schemas.iter_mut().enumerate() {
            let name = schema.name.get_or_insert_with(|| display_name(index));

            if !seen.insert(name.clone()) {
                return Err(ContextError::DuplicateSchemaName(name.clone()));
            }
        }

        Ok(CompositionContext {
            schemas,
            log: CompositionLog::default(),
        })
    }

    /// Parse each SDL document and build the context. Schemas are named by position.
    pub fn from_sdl<S: AsRef<str>>(sources: &[S]) -> Result<Self, ContextError> {
        let schemas = sources
            .iter()
            .enumerate()
            .map(|(index, sdl)| {
                SchemaDefinition::parse(sdl.as_ref()).map_err(|source| ContextError::Ingest { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(schemas)
    }

    /// Parse `(name, sdl)` pairs and build the context.
    pub fn from_named_sdl<N: AsRef<str>, S: AsRef<str>>(sources: &[(N, S)]) -> Result<Self, ContextError> {
        let schemas = sources
            .iter()
            .enumerate()
            .map(|(index, (name, sdl))| {
                SchemaDefinition::parse(sdl.as_ref())
                    .map(|schema| schema.with_name(name.as_ref()))
                    .map_err(|source| ContextError::Ingest { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(schemas)
    }

    pub fn schemas(&self) -> &[SchemaDefinition] {
        &self.schemas
    }

    pub fn log(&self) -> &CompositionLog {
        &self.log
    }

    pub fn into_log(self) -> CompositionLog {
        self.log
    }
}

/// `A`…`Z`, then `AA`, `AB`…
fn display_name(index: usize) -> String {
    let mut name = Vec::new();
    let mut index = index + 1;

    while index > 0 {
        index -= 1;
        name.push(b'A' + (index % 26) as u8);
        index /= 26;
    }

    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

/// A type definition together with the schema it was found in.
pub(crate) type SchemaType<'a> = (&'a SchemaDefinition, &'a TypeDefinition);

/// A field definition together with its schema and parent type.
pub(crate) type SchemaField<'a> = (&'a SchemaDefinition, &'a TypeDefinition, &'a FieldDefinition);

/// Group the type definitions of all schemas by name. Groups come in order of first appearance,
/// definitions inside a group in schema order.
pub(crate) fn type_groups(schemas: &[SchemaDefinition]) -> IndexMap<&str, Vec<SchemaType<'_>>> {
    let mut groups: IndexMap<&str, Vec<SchemaType<'_>>> = IndexMap::new();

    for schema in schemas {
        for definition in schema.types() {
            groups
                .entry(definition.name.as_str())
                .or_default()
                .push((schema, definition));
        }
    }

    groups
}

/// Group the output fields of same-named types by field name, in order of first appearance.
pub(crate) fn field_groups<'a>(definitions: &[SchemaType<'a>]) -> IndexMap<&'a str, Vec<SchemaField<'a>>> {
    let mut groups: IndexMap<&str, Vec<SchemaField<'_>>> = IndexMap::new();

    for &(schema, definition) in definitions {
        for field in definition.fields() {
            groups
                .entry(field.name.as_str())
                .or_default()
                .push((schema, definition, field));
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_are_named_by_position() {
        let context = CompositionContext::from_sdl(&["scalar A", "scalar B", "scalar C"]).unwrap();
        let names = context.schemas().iter().map(|schema| schema.name()).collect::<Vec<_>>();

        assert_eq!(names, ["A", "B", "C"]);
        assert!(context.log().is_empty());
    }

    #[test]
    fn explicit_names_are_kept() {
        let context = CompositionContext::from_named_sdl(&[("products", "scalar A"), ("reviews", "scalar B")]).unwrap();
        let names = context.schemas().iter().map(|schema| schema.name()).collect::<Vec<_>>();

        assert_eq!(names, ["products", "reviews"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let schemas = vec![
            SchemaDefinition::default().with_name("B"),
            SchemaDefinition::default(),
        ];

        assert!(matches!(
            CompositionContext::new(schemas),
            Err(ContextError::DuplicateSchemaName(name)) if name == "B"
        ));
    }

    #[test]
    fn ingestion_errors_point_at_the_source() {
        assert!(matches!(
            CompositionContext::from_sdl(&["scalar A", "type {"]),
            Err(ContextError::Ingest { index: 1, .. })
        ));
    }

    #[test]
    fn display_names_past_z() {
        assert_eq!(display_name(0), "A");
        assert_eq!(display_name(25), "Z");
        assert_eq!(display_name(26), "AA");
        assert_eq!(display_name(27), "AB");
        assert_eq!(display_name(26 * 27), "AAA");
    }
}
