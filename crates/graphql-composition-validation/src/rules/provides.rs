use super::{
    field_coordinate,
    field_selection::{FieldsArgument, fields_argument, fields_with_directive, paths_with_directives, selected_fields},
};
use crate::{
    ErrorCode, ValidateContext,
    schema::{FieldDefinition, SchemaDefinition},
};

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Provides-Invalid-Fields-Type
    ProvidesInvalidFieldsType => ProvidesInvalidFieldsType, provides_invalid_fields_type
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Provides-Invalid-Syntax
    ProvidesInvalidSyntax => ProvidesInvalidSyntax, provides_invalid_syntax
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Provides-on-Non-Composite-Field
    ProvidesOnNonCompositeField => ProvidesOnNonCompositeField, provides_on_non_composite_field
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Provides-Invalid-Fields
    ProvidesInvalidFields => ProvidesInvalidFields, provides_invalid_fields
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Provides-Directive-in-Fields-Argument
    ProvidesDirectiveInFieldsArg => ProvidesDirectiveInFieldsArg, provides_directive_in_fields_arg
);

fn returns_composite_type(schema: &SchemaDefinition, field: &FieldDefinition) -> bool {
    schema
        .type_by_name(field.ty.named_type())
        .is_some_and(|ty| ty.is_composite())
}

fn provides_invalid_fields_type(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, provides) in fields_with_directive(ctx.schemas(), "provides") {
        let FieldsArgument::NotAString(value) = fields_argument(provides) else {
            continue;
        };

        ctx.push_error(
            ErrorCode::ProvidesInvalidFieldsType,
            format!(
                "The @provides directive on field '{}' in schema '{}' must specify a string for the 'fields' argument, found {}.",
                field_coordinate(&definition.name, &field.name),
                schema.name(),
                value.kind_name(),
            ),
        );
    }
}

fn provides_invalid_syntax(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, provides) in fields_with_directive(ctx.schemas(), "provides") {
        let FieldsArgument::Invalid(error) = fields_argument(provides) else {
            continue;
        };

        ctx.push_error(
            ErrorCode::ProvidesInvalidSyntax,
            format!(
                "The @provides directive on field '{}' in schema '{}' has an invalid 'fields' argument: {error}.",
                field_coordinate(&definition.name, &field.name),
                schema.name(),
            ),
        );
    }
}

fn provides_on_non_composite_field(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, _) in fields_with_directive(ctx.schemas(), "provides") {
        if returns_composite_type(schema, field) {
            continue;
        }

        ctx.push_error(
            ErrorCode::ProvidesOnNonCompositeField,
            format!(
                "The field '{}' in schema '{}' includes a @provides directive, but returns the non-composite type '{}'.",
                field_coordinate(&definition.name, &field.name),
                schema.name(),
                field.ty.named_type(),
            ),
        );
    }
}

fn provides_invalid_fields(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, provides) in fields_with_directive(ctx.schemas(), "provides") {
        // Reported by PROVIDES_ON_NON_COMPOSITE_FIELD.
        if !returns_composite_type(schema, field) {
            continue;
        }

        let Some(selections) = fields_argument(provides).into_parsed() else {
            continue;
        };

        for selected in selected_fields(schema, field.ty.named_type(), &selections) {
            if selected.definition.is_some() || selected.is_typename() {
                continue;
            }

            ctx.push_error(
                ErrorCode::ProvidesInvalidFields,
                format!(
                    "The @provides directive on field '{}' in schema '{}' selects the field '{}', which does not exist on type '{}'.",
                    field_coordinate(&definition.name, &field.name),
                    schema.name(),
                    selected.path,
                    selected.parent_type,
                ),
            );
        }
    }
}

fn provides_directive_in_fields_arg(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, provides) in fields_with_directive(ctx.schemas(), "provides") {
        let Some(selections) = fields_argument(provides).into_parsed() else {
            continue;
        };

        for path in paths_with_directives(&selections) {
            ctx.push_error(
                ErrorCode::ProvidesDirectiveInFieldsArg,
                format!(
                    "The @provides directive on field '{}' in schema '{}' selects the field '{}' with a directive application, which is not allowed.",
                    field_coordinate(&definition.name, &field.name),
                    schema.name(),
                    path,
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::validate_with;
    use pretty_assertions::assert_eq;

    const VALID: &str = r#"
        type Review {
          id: ID!
          product: Product @provides(fields: "name category { slug }")
          author: User @provides(fields: "__typename")
        }

        type Product {
          id: ID!
          name: String @external
          category: Category @external
        }

        type Category { slug: String }
        type User { id: ID! }
    "#;

    #[test]
    fn valid_provides_are_quiet() {
        assert!(validate_with(ProvidesInvalidFieldsType, &[VALID]).is_empty());
        assert!(validate_with(ProvidesInvalidSyntax, &[VALID]).is_empty());
        assert!(validate_with(ProvidesOnNonCompositeField, &[VALID]).is_empty());
        assert!(validate_with(ProvidesInvalidFields, &[VALID]).is_empty());
        assert!(validate_with(ProvidesDirectiveInFieldsArg, &[VALID]).is_empty());
    }

    #[test]
    fn fields_type_must_be_a_string() {
        let messages = validate_with(
            ProvidesInvalidFieldsType,
            &["type Review { product: Product @provides(fields: 12) } type Product { name: String }"],
        );

        assert_eq!(
            messages,
            ["The @provides directive on field 'Review.product' in schema 'A' must specify a string for the 'fields' argument, found int."]
        );
    }

    #[test]
    fn invalid_syntax() {
        let messages = validate_with(
            ProvidesInvalidSyntax,
            &[r#"type Review { product: Product @provides(fields: "name }") } type Product { name: String }"#],
        );

        assert_eq!(messages.len(), 1);
        assert!(
            messages[0].starts_with("The @provides directive on field 'Review.product' in schema 'A' has an invalid 'fields' argument:")
        );
    }

    #[test]
    fn on_non_composite_field() {
        let messages = validate_with(
            ProvidesOnNonCompositeField,
            &[r#"
            type Product {
              name: String @provides(fields: "length")
              tags: [Tag!]! @provides(fields: "label")
              kind: Kind @provides(fields: "value")
            }

            type Tag { label: String }
            enum Kind { BOOK }
            "#],
        );

        assert_eq!(
            messages,
            [
                "The field 'Product.name' in schema 'A' includes a @provides directive, but returns the non-composite type 'String'.",
                "The field 'Product.kind' in schema 'A' includes a @provides directive, but returns the non-composite type 'Kind'.",
            ]
        );
    }

    #[test]
    fn invalid_fields() {
        let messages = validate_with(
            ProvidesInvalidFields,
            &[r#"
            type Review {
              product: Product @provides(fields: "name price category { title }")
            }

            type Product { name: String category: Category }
            type Category { slug: String }
            "#],
        );

        assert_eq!(
            messages,
            [
                "The @provides directive on field 'Review.product' in schema 'A' selects the field 'price', which does not exist on type 'Product'.",
                "The @provides directive on field 'Review.product' in schema 'A' selects the field 'category.title', which does not exist on type 'Category'.",
            ]
        );
    }

    #[test]
    fn directive_in_fields_argument() {
        let messages = validate_with(
            ProvidesDirectiveInFieldsArg,
            &[r#"
            type Review {
              product: Product @provides(fields: "name @lowercase")
            }

            type Product { name: String }
            "#],
        );

        assert_eq!(
            messages,
            ["The @provides directive on field 'Review.product' in schema 'A' selects the field 'name' with a directive application, which is not allowed."]
        );
    }

    #[test]
    fn directive_below_an_unknown_field() {
        let messages = validate_with(
            ProvidesDirectiveInFieldsArg,
            &[r#"type Review { product: Product @provides(fields: "nope { x @foo }") } type Product { name: String }"#],
        );

        assert_eq!(
            messages,
            ["The @provides directive on field 'Review.product' in schema 'A' selects the field 'nope.x' with a directive application, which is not allowed."]
        );
    }
}
