use super::{
    field_coordinate,
    field_selection::{fields_argument, fields_with_directive, selected_fields},
};
use crate::{
    ErrorCode, ValidateContext,
    context::{field_groups, type_groups},
    schema::{SchemaDefinition, TypeDefinition},
};

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-External-Missing-on-Base
    ExternalMissingOnBase => ExternalMissingOnBase, external_missing_on_base
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-External-Unused
    ExternalUnused => ExternalUnused, external_unused
);

fn external_missing_on_base(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        for (field_name, fields) in field_groups(&definitions) {
            let has_base = fields.iter().any(|(_, _, field)| !field.directives.external());

            if has_base {
                continue;
            }

            for (schema, _, _) in fields {
                ctx.push_error(
                    ErrorCode::ExternalMissingOnBase,
                    format!(
                        "The external field '{}' in schema '{}' is not defined without @external in any other schema.",
                        field_coordinate(type_name, field_name),
                        schema.name(),
                    ),
                );
            }
        }
    }
}

fn external_unused(ctx: &mut ValidateContext<'_>) {
    for schema in ctx.schemas() {
        for definition in schema.types() {
            for field in definition.fields() {
                if !field.directives.external() || is_provided(schema, definition, &field.name) {
                    continue;
                }

                ctx.push_error(
                    ErrorCode::ExternalUnused,
                    format!(
                        "The external field '{}' in schema '{}' is not referenced by any @provides directive.",
                        field_coordinate(&definition.name, &field.name),
                        schema.name(),
                    ),
                );
            }
        }
    }
}

/// Is the field selected by any `@provides` in the schema? Selections on an interface the type
/// implements count.
fn is_provided(schema: &SchemaDefinition, definition: &TypeDefinition, field_name: &str) -> bool {
    fields_with_directive(std::slice::from_ref(schema), "provides").any(|(_, _, field, provides)| {
        let Some(selections) = fields_argument(provides).into_parsed() else {
            return false;
        };

        selected_fields(schema, field.ty.named_type(), &selections)
            .iter()
            .any(|selected| {
                selected.node.name == field_name
                    && (selected.parent_type == definition.name
                        || definition.implements_interface(selected.parent_type))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::validate_with;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_on_base() {
        let messages = validate_with(
            ExternalMissingOnBase,
            &[
                "type Product { id: ID! name: String @external }",
                "type Product { id: ID! name: String @external }",
                "type Product { id: ID! price: Float @external } type Query { product: Product }",
                "type Product { price: Float }",
            ],
        );

        assert_eq!(
            messages,
            [
                "The external field 'Product.name' in schema 'A' is not defined without @external in any other schema.",
                "The external field 'Product.name' in schema 'B' is not defined without @external in any other schema.",
            ]
        );
    }

    #[test]
    fn unused_external_fields() {
        let messages = validate_with(
            ExternalUnused,
            &[
                r#"
                type Review {
                  product: Product @provides(fields: "name")
                }

                type Product {
                  id: ID!
                  name: String @external
                  price: Float @external
                }
                "#,
                r#"
                type Review {
                  product: Product
                }

                type Product {
                  name: String @external
                }
                "#,
            ],
        );

        assert_eq!(
            messages,
            [
                "The external field 'Product.price' in schema 'A' is not referenced by any @provides directive.",
                "The external field 'Product.name' in schema 'B' is not referenced by any @provides directive.",
            ]
        );
    }

    #[test]
    fn provided_through_an_interface_and_nested_selections() {
        let messages = validate_with(
            ExternalUnused,
            &[r#"
            type Query {
              node: Node @provides(fields: "label")
              review: Review @provides(fields: "product { sku }")
            }

            interface Node { label: String }
            type Review { product: Product }

            type Product implements Node {
              label: String @external
              sku: String @external
            }
            "#],
        );

        assert!(messages.is_empty(), "{messages:?}");
    }
}
