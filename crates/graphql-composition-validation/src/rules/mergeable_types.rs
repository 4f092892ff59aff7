use super::{argument_coordinate, field_coordinate};
use crate::{
    ErrorCode, ValidateContext,
    context::{field_groups, type_groups},
    schema::{DefinitionKind, HasDirectives, SchemaDefinition, TypeReference},
    shapes_match,
};
use indexmap::IndexMap;
use itertools::Itertools;

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Output-Field-Types-Mergeable
    OutputFieldTypesNotMergeable => OutputFieldTypesNotMergeable, output_field_types_not_mergeable
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Input-Field-Types-Mergeable
    InputFieldTypesNotMergeable => InputFieldTypesNotMergeable, input_field_types_not_mergeable
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Field-Argument-Types-Mergeable
    FieldArgumentTypesNotMergeable => FieldArgumentTypesNotMergeable, field_argument_types_not_mergeable
);

/// The first pair of adjacent declarations whose types cannot be merged. Only adjacent pairs are
/// compared, in schema order.
fn first_unmergeable_pair<'a>(
    declarations: &[(&'a SchemaDefinition, &'a TypeReference)],
) -> Option<((&'a SchemaDefinition, &'a TypeReference), (&'a SchemaDefinition, &'a TypeReference))> {
    declarations
        .iter()
        .copied()
        .tuple_windows()
        .find(|((_, a), (_, b))| !shapes_match(a, b))
}

fn not_mergeable_message(
    subject: &str,
    coordinate: &str,
    (schema_a, ty_a): (&SchemaDefinition, &TypeReference),
    (schema_b, ty_b): (&SchemaDefinition, &TypeReference),
) -> String {
    format!(
        "The {subject} '{coordinate}' in schema '{}' has type '{ty_a}', which is not mergeable with type '{ty_b}' in schema '{}'.",
        schema_a.name(),
        schema_b.name(),
    )
}

fn output_field_types_not_mergeable(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        for (field_name, fields) in field_groups(&definitions) {
            let declarations = fields
                .iter()
                .filter(|(_, definition, field)| definition.is_accessible() && field.is_accessible())
                .map(|(schema, _, field)| (*schema, &field.ty))
                .collect::<Vec<_>>();

            let Some((a, b)) = first_unmergeable_pair(&declarations) else {
                continue;
            };

            ctx.push_error(
                ErrorCode::OutputFieldTypesNotMergeable,
                not_mergeable_message("field", &field_coordinate(type_name, field_name), a, b),
            );
        }
    }
}

fn input_field_types_not_mergeable(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        let mut input_fields: IndexMap<&str, Vec<_>> = IndexMap::new();

        for (schema, definition) in &definitions {
            if definition.kind() != DefinitionKind::InputObject || !definition.is_accessible() {
                continue;
            }

            for input_field in definition.input_fields().filter(|field| field.is_accessible()) {
                input_fields
                    .entry(input_field.name.as_str())
                    .or_default()
                    .push((*schema, &input_field.ty));
            }
        }

        for (input_field_name, declarations) in input_fields {
            let Some((a, b)) = first_unmergeable_pair(&declarations) else {
                continue;
            };

            ctx.push_error(
                ErrorCode::InputFieldTypesNotMergeable,
                not_mergeable_message("input field", &field_coordinate(type_name, input_field_name), a, b),
            );
        }
    }
}

fn field_argument_types_not_mergeable(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        for (field_name, fields) in field_groups(&definitions) {
            let mut arguments: IndexMap<&str, Vec<_>> = IndexMap::new();

            for (schema, definition, field) in &fields {
                if !definition.is_accessible() || !field.is_accessible() {
                    continue;
                }

                for argument in field.arguments.values().filter(|argument| argument.is_accessible()) {
                    arguments
                        .entry(argument.name.as_str())
                        .or_default()
                        .push((*schema, &argument.ty));
                }
            }

            for (argument_name, declarations) in arguments {
                let Some((a, b)) = first_unmergeable_pair(&declarations) else {
                    continue;
                };

                ctx.push_error(
                    ErrorCode::FieldArgumentTypesNotMergeable,
                    not_mergeable_message(
                        "argument",
                        &argument_coordinate(type_name, field_name, argument_name),
                        a,
                        b,
                    ),
                );
            }
        }
    }
}
