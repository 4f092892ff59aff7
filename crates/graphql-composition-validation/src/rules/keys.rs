use super::field_selection::{FieldsArgument, fields_argument, paths_with_directives, selected_fields};
use crate::{
    ErrorCode, ValidateContext,
    schema::{DefinitionKind, DirectiveApplication, SchemaDefinition, TypeDefinition},
};

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Key-Invalid-Fields-Type
    KeyInvalidFieldsType => KeyInvalidFieldsType, key_invalid_fields_type
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Key-Invalid-Syntax
    KeyInvalidSyntax => KeyInvalidSyntax, key_invalid_syntax
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Key-Invalid-Fields
    KeyInvalidFields => KeyInvalidFields, key_invalid_fields
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Key-Directive-in-Fields-Argument
    KeyDirectiveInFieldsArg => KeyDirectiveInFieldsArg, key_directive_in_fields_arg
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Key-Fields-Has-Arguments
    KeyFieldsHasArgs => KeyFieldsHasArgs, key_fields_has_args
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Key-Fields-Select-Invalid-Type
    KeyFieldsSelectInvalidType => KeyFieldsSelectInvalidType, key_fields_select_invalid_type
);

/// Every `@key` application, a type may carry several.
fn keys(
    schemas: &[SchemaDefinition],
) -> impl Iterator<Item = (&SchemaDefinition, &TypeDefinition, &DirectiveApplication)> {
    schemas.iter().flat_map(|schema| {
        schema
            .types()
            .flat_map(move |definition| definition.directives.keys().map(move |key| (schema, definition, key)))
    })
}

fn key_invalid_fields_type(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, key) in keys(ctx.schemas()) {
        let FieldsArgument::NotAString(value) = fields_argument(key) else {
            continue;
        };

        ctx.push_error(
            ErrorCode::KeyInvalidFieldsType,
            format!(
                "The @key directive on type '{}' in schema '{}' must specify a string for the 'fields' argument, found {}.",
                definition.name,
                schema.name(),
                value.kind_name(),
            ),
        );
    }
}

fn key_invalid_syntax(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, key) in keys(ctx.schemas()) {
        let FieldsArgument::Invalid(error) = fields_argument(key) else {
            continue;
        };

        ctx.push_error(
            ErrorCode::KeyInvalidSyntax,
            format!(
                "The @key directive on type '{}' in schema '{}' has an invalid 'fields' argument: {error}.",
                definition.name,
                schema.name(),
            ),
        );
    }
}

fn key_invalid_fields(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, key) in keys(ctx.schemas()) {
        let Some(selections) = fields_argument(key).into_parsed() else {
            continue;
        };

        for field in selected_fields(schema, &definition.name, &selections) {
            if field.definition.is_some() || field.is_typename() {
                continue;
            }

            ctx.push_error(
                ErrorCode::KeyInvalidFields,
                format!(
                    "The @key directive on type '{}' in schema '{}' selects the field '{}', which does not exist on type '{}'.",
                    definition.name,
                    schema.name(),
                    field.path,
                    field.parent_type,
                ),
            );
        }
    }
}

fn key_directive_in_fields_arg(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, key) in keys(ctx.schemas()) {
        let Some(selections) = fields_argument(key).into_parsed() else {
            continue;
        };

        for path in paths_with_directives(&selections) {
            ctx.push_error(
                ErrorCode::KeyDirectiveInFieldsArg,
                format!(
                    "The @key directive on type '{}' in schema '{}' selects the field '{}' with a directive application, which is not allowed.",
                    definition.name,
                    schema.name(),
                    path,
                ),
            );
        }
    }
}

fn key_fields_has_args(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, key) in keys(ctx.schemas()) {
        let Some(selections) = fields_argument(key).into_parsed() else {
            continue;
        };

        for field in selected_fields(schema, &definition.name, &selections) {
            let Some(field_definition) = field.definition else {
                continue;
            };

            if field_definition.arguments.is_empty() {
                continue;
            }

            ctx.push_error(
                ErrorCode::KeyFieldsHasArgs,
                format!(
                    "The @key directive on type '{}' in schema '{}' selects the field '{}.{}', which must not have arguments.",
                    definition.name,
                    schema.name(),
                    field.parent_type,
                    field_definition.name,
                ),
            );
        }
    }
}

fn key_fields_select_invalid_type(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, key) in keys(ctx.schemas()) {
        let Some(selections) = fields_argument(key).into_parsed() else {
            continue;
        };

        for field in selected_fields(schema, &definition.name, &selections) {
            let Some(field_definition) = field.definition else {
                continue;
            };

            let selects_abstract_type = schema
                .type_by_name(field_definition.ty.named_type())
                .is_some_and(|ty| matches!(ty.kind(), DefinitionKind::Interface | DefinitionKind::Union));

            if !field_definition.ty.is_list() && !selects_abstract_type {
                continue;
            }

            ctx.push_error(
                ErrorCode::KeyFieldsSelectInvalidType,
                format!(
                    "The @key directive on type '{}' in schema '{}' selects the field '{}.{}' of type '{}', keys must not select lists, interfaces or unions.",
                    definition.name,
                    schema.name(),
                    field.parent_type,
                    field_definition.name,
                    field_definition.ty,
                ),
            );
        }
    }
}
