use super::{argument_coordinate, field_coordinate};
use crate::{
    ErrorCode, ValidateContext,
    schema::{is_builtin_directive, is_builtin_scalar, is_introspection_field, is_introspection_type},
};

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Disallowed-Inaccessible-Elements
    DisallowedInaccessible => DisallowedInaccessible, disallowed_inaccessible
);

fn disallowed_inaccessible(ctx: &mut ValidateContext<'_>) {
    for schema in ctx.schemas() {
        let mut push = |subject: String| {
            ctx.push_error(
                ErrorCode::DisallowedInaccessible,
                format!("{subject} in schema '{}' is not allowed to be inaccessible.", schema.name()),
            );
        };

        for definition in schema.types() {
            if is_introspection_type(&definition.name) && definition.directives.inaccessible() {
                let kind = if is_builtin_scalar(&definition.name) {
                    "built-in scalar type"
                } else {
                    "introspection type"
                };

                push(format!("The {kind} '{}'", definition.name));
            }

            for value in definition.enum_values() {
                if is_introspection_type(&definition.name) && value.directives.inaccessible() {
                    push(format!(
                        "The introspection enum value '{}'",
                        field_coordinate(&definition.name, &value.name)
                    ));
                }
            }

            for field in definition.fields() {
                if !is_introspection_field(&definition.name, &field.name) {
                    continue;
                }

                if field.directives.inaccessible() {
                    push(format!(
                        "The introspection field '{}'",
                        field_coordinate(&definition.name, &field.name)
                    ));
                }

                for argument in field.arguments.values() {
                    if argument.directives.inaccessible() {
                        push(format!(
                            "The introspection argument '{}'",
                            argument_coordinate(&definition.name, &field.name, &argument.name)
                        ));
                    }
                }
            }
        }

        for directive in schema.directive_definitions() {
            if !is_builtin_directive(&directive.name) {
                continue;
            }

            for argument in directive.arguments.values() {
                if argument.directives.inaccessible() {
                    push(format!(
                        "The built-in directive argument '@{}({}:)'",
                        directive.name, argument.name
                    ));
                }
            }
        }
    }
}
