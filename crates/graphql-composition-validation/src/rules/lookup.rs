use super::{field_coordinate, field_selection::fields_with_directive};
use crate::{ErrorCode, ValidateContext, schema::TypeReference};

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Lookup-Must-Not-Return-a-List
    LookupMustNotReturnList => LookupMustNotReturnList, lookup_must_not_return_list
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Lookup-Should-Have-Nullable-Return-Type
    ///
    /// The only rule reporting a warning rather than an error.
    LookupShouldHaveNullableReturnType => LookupShouldHaveNullableReturnType, lookup_should_have_nullable_return_type
);

fn lookup_must_not_return_list(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, _) in fields_with_directive(ctx.schemas(), "lookup") {
        if !matches!(field.ty.nullable(), TypeReference::List(_)) {
            continue;
        }

        ctx.push_error(
            ErrorCode::LookupMustNotReturnList,
            format!(
                "The lookup field '{}' in schema '{}' must not return a list, found '{}'.",
                field_coordinate(&definition.name, &field.name),
                schema.name(),
                field.ty,
            ),
        );
    }
}

fn lookup_should_have_nullable_return_type(ctx: &mut ValidateContext<'_>) {
    for (schema, definition, field, _) in fields_with_directive(ctx.schemas(), "lookup") {
        if !field.ty.is_required() {
            continue;
        }

        ctx.push_warning(
            ErrorCode::LookupShouldHaveNullableReturnType,
            format!(
                "The lookup field '{}' in schema '{}' should have a nullable return type, found '{}'.",
                field_coordinate(&definition.name, &field.name),
                schema.name(),
                field.ty,
            ),
        );
    }
}
