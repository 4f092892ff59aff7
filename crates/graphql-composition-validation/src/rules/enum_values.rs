use crate::{
    ErrorCode, ValidateContext,
    context::{SchemaType, type_groups},
    schema::DefinitionKind,
};
use indexmap::IndexSet;

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Enum-Values-Mismatch
    EnumValuesMismatch => EnumValuesMismatch, enum_values_mismatch
);

rule!(
    /// Same check as [EnumValuesMismatch], reported under its own code. Not part of the default
    /// rule set.
    EnumValuesMustBeTheSameAcrossSchemas => EnumValuesMustBeTheSameAcrossSchemas, enum_values_must_be_the_same_across_schemas
);

fn enum_values_mismatch(ctx: &mut ValidateContext<'_>) {
    validate_enum_values(ctx, ErrorCode::EnumValuesMismatch);
}

fn enum_values_must_be_the_same_across_schemas(ctx: &mut ValidateContext<'_>) {
    validate_enum_values(ctx, ErrorCode::EnumValuesMustBeTheSameAcrossSchemas);
}

/// Every schema defining an enum must define all the values that are accessible in at least one
/// of the schemas. A value that is defined but `@inaccessible` still counts as defined.
fn validate_enum_values(ctx: &mut ValidateContext<'_>, code: ErrorCode) {
    for (enum_name, definitions) in type_groups(ctx.schemas()) {
        let definitions = definitions
            .into_iter()
            .filter(|(_, definition)| definition.kind() == DefinitionKind::Enum)
            .collect::<Vec<_>>();

        if definitions.len() < 2 {
            continue;
        }

        let values = required_values(&definitions);

        for (schema, definition) in &definitions {
            for &value in &values {
                if definition.enum_values().iter().any(|candidate| candidate.name == value) {
                    continue;
                }

                ctx.push_error(
                    code,
                    format!(
                        "The enum type '{enum_name}' in schema '{}' must define the value '{value}'.",
                        schema.name(),
                    ),
                );
            }
        }
    }
}

/// The union of the values each schema keeps accessible, in order of first appearance.
fn required_values<'a>(definitions: &[SchemaType<'a>]) -> IndexSet<&'a str> {
    definitions
        .iter()
        .flat_map(|&(_, definition)| definition.enum_values())
        .filter(|value| !value.directives.inaccessible())
        .map(|value| value.name.as_str())
        .collect()
}
