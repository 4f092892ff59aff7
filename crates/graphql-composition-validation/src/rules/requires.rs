use super::{
    field_coordinate,
    field_selection::{FieldsArgument, fields_argument, fields_with_directive, paths_with_directives, selected_fields},
};
use crate::{ErrorCode, ValidateContext};

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Require-Invalid-Fields-Type
    RequireInvalidFieldsType => RequireInvalidFieldsType, require_invalid_fields_type
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Require-Invalid-Syntax
    RequireInvalidSyntax => RequireInvalidSyntax, require_invalid_syntax
);

rule!(
    /// The fields required by `@requires` must exist on the type declaring the field.
    RequireInvalidFields => RequireInvalidFields, require_invalid_fields
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Require-Directive-in-Fields-Argument
    RequireDirectiveInFieldsArg => RequireDirectiveInFieldsArg, require_directive_in_fields_arg
);

fn require_invalid_fields_type(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, requires) in fields_with_directive(ctx.schemas(), "requires") {
        let FieldsArgument::NotAString(value) = fields_argument(requires) else {
            continue;
        };

        ctx.push_error(
            ErrorCode::RequireInvalidFieldsType,
            format!(
                "The @requires directive on field '{}' in schema '{}' must specify a string for the 'fields' argument, found {}.",
                field_coordinate(&definition.name, &field.name),
                schema.name(),
                value.kind_name(),
            ),
        );
    }
}

fn require_invalid_syntax(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, requires) in fields_with_directive(ctx.schemas(), "requires") {
        let FieldsArgument::Invalid(error) = fields_argument(requires) else {
            continue;
        };

        ctx.push_error(
            ErrorCode::RequireInvalidSyntax,
            format!(
                "The @requires directive on field '{}' in schema '{}' has an invalid 'fields' argument: {error}.",
                field_coordinate(&definition.name, &field.name),
                schema.name(),
            ),
        );
    }
}

fn require_invalid_fields(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, requires) in fields_with_directive(ctx.schemas(), "requires") {
        let Some(selections) = fields_argument(requires).into_parsed() else {
            continue;
        };

        for selected in selected_fields(schema, &definition.name, &selections) {
            if selected.definition.is_some() || selected.is_typename() {
                continue;
            }

            ctx.push_error(
                ErrorCode::RequireInvalidFields,
                format!(
                    "The @requires directive on field '{}' in schema '{}' selects the field '{}', which does not exist on type '{}'.",
                    field_coordinate(&definition.name, &field.name),
                    schema.name(),
                    selected.path,
                    selected.parent_type,
                ),
            );
        }
    }
}

fn require_directive_in_fields_arg(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, requires) in fields_with_directive(ctx.schemas(), "requires") {
        let Some(selections) = fields_argument(requires).into_parsed() else {
            continue;
        };

        for path in paths_with_directives(&selections) {
            ctx.push_error(
                ErrorCode::RequireDirectiveInFieldsArg,
                format!(
                    "The @requires directive on field '{}' in schema '{}' selects the field '{}' with a directive application, which is not allowed.",
                    field_coordinate(&definition.name, &field.name),
                    schema.name(),
                    path,
                ),
            );
        }
    }
}
