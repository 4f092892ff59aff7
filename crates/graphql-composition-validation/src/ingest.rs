//! This is a separate module because we want to keep GraphQL parser types out of the schema
//! model: rules only ever see [SchemaDefinition].

use crate::schema::{
    CompositeBody, DirectiveApplication, DirectiveDefinition, Directives, EnumValueDefinition, FieldDefinition,
    InputValueDefinition, RootOperationTypes, SchemaDefinition, TypeBody, TypeDefinition, TypeReference, Value,
};
use cynic_parser::{ConstValue, common::WrappingType, type_system as ast};
use indexmap::IndexMap;

/// Errors raised while turning SDL text into a [SchemaDefinition].
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("could not parse the schema: {0}")]
    Parse(String),
}

pub(crate) fn ingest_schema(sdl: &str) -> Result<SchemaDefinition, IngestError> {
    let document = cynic_parser::parse_type_system_document(sdl).map_err(|err| IngestError::Parse(err.to_string()))?;

    let mut schema = SchemaDefinition::default();
    let mut explicit_root_types: Option<RootOperationTypes> = None;

    for definition in document.definitions() {
        match definition {
            ast::Definition::Type(type_definition) | ast::Definition::TypeExtension(type_definition) => {
                ingest_type_definition(&mut schema, type_definition);
            }
            ast::Definition::Schema(schema_definition) | ast::Definition::SchemaExtension(schema_definition) => {
                let root_types = explicit_root_types.get_or_insert_with(RootOperationTypes::default);

                if let Some(query) = schema_definition.query_type() {
                    root_types.query = Some(query.named_type().to_owned());
                }
                if let Some(mutation) = schema_definition.mutation_type() {
                    root_types.mutation = Some(mutation.named_type().to_owned());
                }
                if let Some(subscription) = schema_definition.subscription_type() {
                    root_types.subscription = Some(subscription.named_type().to_owned());
                }
            }
            ast::Definition::Directive(directive_definition) => {
                let definition = DirectiveDefinition {
                    name: directive_definition.name().to_owned(),
                    arguments: ingest_input_values(directive_definition.arguments()),
                };
                schema
                    .directive_definitions
                    .insert(definition.name.clone(), definition);
            }
        }
    }

    schema.root_operation_types = explicit_root_types.unwrap_or_else(|| default_root_operation_types(&schema));

    Ok(schema)
}

/// Without a schema definition, root types are found by their default names.
fn default_root_operation_types(schema: &SchemaDefinition) -> RootOperationTypes {
    let default_root = |name: &str| {
        schema
            .type_by_name(name)
            .filter(|definition| matches!(definition.body, TypeBody::Object(_)))
            .map(|definition| definition.name.clone())
    };

    RootOperationTypes {
        query: default_root("Query"),
        mutation: default_root("Mutation"),
        subscription: default_root("Subscription"),
    }
}

fn ingest_type_definition(schema: &mut SchemaDefinition, type_definition: ast::TypeDefinition<'_>) {
    let name = type_definition.name();
    let directives = ingest_directives(type_definition.directives());
    let description = type_definition
        .description()
        .map(|description| description.to_cow().into_owned());

    let body = match type_definition {
        ast::TypeDefinition::Scalar(_) => TypeBody::Scalar,
        ast::TypeDefinition::Object(object) => TypeBody::Object(CompositeBody {
            fields: ingest_fields(object.fields()),
            implements: object.implements_interfaces().map(str::to_owned).collect(),
        }),
        ast::TypeDefinition::Interface(interface) => TypeBody::Interface(CompositeBody {
            fields: ingest_fields(interface.fields()),
            implements: interface.implements_interfaces().map(str::to_owned).collect(),
        }),
        ast::TypeDefinition::Union(union) => {
            TypeBody::Union(union.members().map(|member| member.name().to_owned()).collect())
        }
        ast::TypeDefinition::Enum(enum_type) => TypeBody::Enum(
            enum_type
                .values()
                .map(|value| EnumValueDefinition {
                    name: value.value().to_owned(),
                    description: value.description().map(|description| description.to_cow().into_owned()),
                    directives: ingest_directives(value.directives()),
                })
                .collect(),
        ),
        ast::TypeDefinition::InputObject(input_object) => TypeBody::InputObject(ingest_input_values(input_object.fields())),
    };

    let Some(existing) = schema.types.get_mut(name) else {
        schema.insert_type(TypeDefinition {
            name: name.to_owned(),
            description,
            directives,
            body,
        });
        return;
    };

    // Type extensions (or repeated definitions) are merged into the first definition.
    for directive in &directives {
        existing.directives.push(directive.clone());
    }

    if existing.description.is_none() {
        existing.description = description;
    }

    match (&mut existing.body, body) {
        (TypeBody::Object(existing), TypeBody::Object(extension))
        | (TypeBody::Interface(existing), TypeBody::Interface(extension)) => {
            existing.fields.extend(extension.fields);
            existing.implements.extend(extension.implements);
        }
        (TypeBody::Union(existing), TypeBody::Union(extension)) => existing.extend(extension),
        (TypeBody::Enum(existing), TypeBody::Enum(extension)) => existing.extend(extension),
        (TypeBody::InputObject(existing), TypeBody::InputObject(extension)) => existing.extend(extension),
        (TypeBody::Scalar, TypeBody::Scalar) => (),
        (_, _) => {
            tracing::debug!(type_name = name, "ignoring the body of a definition with a conflicting kind");
        }
    }
}

fn ingest_fields(fields: ast::iter::Iter<'_, ast::FieldDefinition<'_>>) -> IndexMap<String, FieldDefinition> {
    fields
        .map(|field| {
            let definition = FieldDefinition {
                name: field.name().to_owned(),
                description: field.description().map(|description| description.to_cow().into_owned()),
                ty: ingest_type(field.ty()),
                arguments: ingest_input_values(field.arguments()),
                directives: ingest_directives(field.directives()),
            };

            (definition.name.clone(), definition)
        })
        .collect()
}

fn ingest_input_values(
    values: ast::iter::Iter<'_, ast::InputValueDefinition<'_>>,
) -> IndexMap<String, InputValueDefinition> {
    values
        .map(|value| {
            let definition = InputValueDefinition {
                name: value.name().to_owned(),
                description: value.description().map(|description| description.to_cow().into_owned()),
                ty: ingest_type(value.ty()),
                default_value: value.default_value().map(ast_value_to_value),
                directives: ingest_directives(value.directives()),
            };

            (definition.name.clone(), definition)
        })
        .collect()
}

fn ingest_directives(directives: ast::iter::Iter<'_, ast::Directive<'_>>) -> Directives {
    directives
        .map(|directive| DirectiveApplication {
            name: directive.name().to_owned(),
            arguments: directive
                .arguments()
                .map(|argument| (argument.name().to_owned(), ast_value_to_value(argument.value())))
                .collect(),
        })
        .collect::<Vec<_>>()
        .into()
}

/// Wrappers come outermost first.
fn ingest_type(ty: ast::Type<'_>) -> TypeReference {
    let wrappers = ty.wrappers().collect::<Vec<_>>();

    wrappers
        .into_iter()
        .rev()
        .fold(TypeReference::named(ty.name()), |inner, wrapper| match wrapper {
            WrappingType::NonNull => TypeReference::non_null(inner),
            WrappingType::List => TypeReference::list(inner),
        })
}

pub(crate) fn ast_value_to_value(value: ConstValue<'_>) -> Value {
    match &value {
        ConstValue::Null(_) => Value::Null,
        ConstValue::Int(n) => Value::Int(n.as_i64()),
        ConstValue::Float(n) => Value::Float(n.as_f64()),
        ConstValue::String(s) => Value::String(s.as_str().to_owned()),
        ConstValue::Boolean(b) => Value::Boolean(b.value()),
        ConstValue::Enum(e) => Value::Enum(e.name().to_owned()),
        ConstValue::List(l) => Value::List(l.items().map(ast_value_to_value).collect()),
        ConstValue::Object(o) => Value::Object(
            o.fields()
                .map(|field| (field.name().to_owned(), ast_value_to_value(field.value())))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DefinitionKind, HasDirectives};

    #[test]
    fn ingests_types_fields_and_defaults() {
        let schema = SchemaDefinition::parse(
            r#"
            type Query {
              products(first: Int = 10, filter: ProductFilter): [Product!]!
            }

            type Product @key(fields: "id") {
              id: ID!
              name(language: String = "en"): String @inaccessible
            }

            input ProductFilter {
              tags: [String!] = ["new", "sale"]
              order: Order = { by: NAME, desc: false }
            }

            enum Order { NAME PRICE @inaccessible }

            union SearchResult = Product
            "#,
        )
        .unwrap();

        assert_eq!(schema.root_operation_types().query.as_deref(), Some("Query"));

        let product = schema.type_by_name("Product").unwrap();
        assert_eq!(product.kind(), DefinitionKind::Object);
        assert_eq!(product.directives.keys().count(), 1);

        let name = product.field_by_name("name").unwrap();
        assert!(!name.is_accessible());
        assert_eq!(
            name.argument_by_name("language").unwrap().default_value,
            Some(Value::String("en".to_owned()))
        );

        let products = schema.query_type().unwrap().field_by_name("products").unwrap();
        assert_eq!(products.ty.to_string(), "[Product!]!");

        let filter = schema.type_by_name("ProductFilter").unwrap();
        assert_eq!(
            filter.input_field_by_name("tags").unwrap().default_value,
            Some(Value::List(vec![
                Value::String("new".to_owned()),
                Value::String("sale".to_owned())
            ]))
        );
        assert_eq!(
            filter.input_field_by_name("order").unwrap().default_value,
            Some(Value::Object(IndexMap::from([
                ("desc".to_owned(), Value::Boolean(false)),
                ("by".to_owned(), Value::Enum("NAME".to_owned())),
            ])))
        );

        let order = schema.type_by_name("Order").unwrap();
        assert_eq!(order.enum_values().len(), 2);
        assert!(!order.enum_values()[1].is_accessible());

        assert!(schema.type_by_name("SearchResult").unwrap().has_union_member("Product"));
    }

    #[test]
    fn explicit_schema_definition_wins_over_default_names() {
        let schema = SchemaDefinition::parse(
            r#"
            schema { query: RootQuery }
            type RootQuery { a: Int }
            type Query { b: Int }
            "#,
        )
        .unwrap();

        assert_eq!(schema.root_operation_types().query.as_deref(), Some("RootQuery"));
    }

    #[test]
    fn type_extensions_are_merged() {
        let schema = SchemaDefinition::parse(
            r#"
            type Product { id: ID! }
            extend type Product @key(fields: "id") { name: String }
            "#,
        )
        .unwrap();

        let product = schema.type_by_name("Product").unwrap();
        assert_eq!(product.fields().map(|field| field.name.as_str()).collect::<Vec<_>>(), ["id", "name"]);
        assert!(product.directives.keys().next().is_some());
    }

    #[test]
    fn nested_wrapping_types() {
        let schema = SchemaDefinition::parse("type T { matrix: [[Int!]]! }").unwrap();
        let ty = &schema.type_by_name("T").unwrap().field_by_name("matrix").unwrap().ty;

        assert_eq!(ty.to_string(), "[[Int!]]!");
        assert_eq!(ty.list_depth(), 2);
    }

    #[test]
    fn invalid_sdl_is_an_error() {
        let error = SchemaDefinition::parse("type Product {").unwrap_err();
        assert!(matches!(error, IngestError::Parse(_)));
    }
}
