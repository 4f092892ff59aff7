use crate::{
    ErrorCode, ValidateContext,
    context::type_groups,
    schema::{DefinitionKind, HasDirectives},
};
use indexmap::IndexSet;

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Input-With-Missing-Required-Fields
    InputWithMissingRequiredFields => InputWithMissingRequiredFields, input_with_missing_required_fields
);

fn input_with_missing_required_fields(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        let definitions = definitions
            .into_iter()
            .filter(|(_, definition)| definition.kind() == DefinitionKind::InputObject && definition.is_accessible())
            .collect::<Vec<_>>();

        if definitions.len() < 2 {
            continue;
        }

        let required_fields = definitions
            .iter()
            .flat_map(|&(_, definition)| definition.input_fields())
            .filter(|field| field.is_required())
            .map(|field| field.name.as_str())
            .collect::<IndexSet<_>>();

        for (schema, definition) in &definitions {
            for &field_name in &required_fields {
                if definition.input_field_by_name(field_name).is_some() {
                    continue;
                }

                ctx.push_error(
                    ErrorCode::InputWithMissingRequiredFields,
                    format!(
                        "The input type '{type_name}' in schema '{}' must define the required field '{field_name}'.",
                        schema.name(),
                    ),
                );
            }
        }
    }
}
