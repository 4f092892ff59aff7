use super::field_coordinate;
use crate::{
    ErrorCode, ValidateContext,
    context::{field_groups, type_groups},
};

rule!(
    /// Only one schema may take over a field with `@override(from: "...")`.
    OverrideSourceHasOverride => OverrideSourceHasOverride, override_source_has_override
);

fn override_source_has_override(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        for (field_name, fields) in field_groups(&definitions) {
            let mut overrides = fields
                .iter()
                .filter_map(|(schema, _, field)| field.directives.r#override().map(|from| (*schema, from)));

            let Some((first_schema, _)) = overrides.next() else {
                continue;
            };

            for (schema, from) in overrides {
                ctx.push_error(
                    ErrorCode::OverrideSourceHasOverride,
                    format!(
                        "The field '{}' in schema '{}' overrides the field from '{from}', but it is already overridden in schema '{}'.",
                        field_coordinate(type_name, field_name),
                        schema.name(),
                        first_schema.name(),
                    ),
                );
            }
        }
    }
}
