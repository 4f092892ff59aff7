use super::{argument_coordinate, field_coordinate};
use crate::{
    ErrorCode, ValidateContext,
    context::{field_groups, type_groups},
    schema::{DefinitionKind, InputValueDefinition, SchemaDefinition, Value},
};
use indexmap::IndexMap;

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-External-Argument-Default-Mismatch
    ExternalArgumentDefaultMismatch => ExternalArgumentDefaultMismatch, external_argument_default_mismatch
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Input-Field-Default-Mismatch
    InputFieldDefaultMismatch => InputFieldDefaultMismatch, input_field_default_mismatch
);

struct DefaultMismatch<'a> {
    schema: &'a SchemaDefinition,
    default_value: Option<&'a Value>,
    first_schema: &'a SchemaDefinition,
    first_default_value: Option<&'a Value>,
}

/// Compare every declaration with the first one. One mismatch per differing declaration.
fn default_mismatches<'a>(
    declarations: &[(&'a SchemaDefinition, &'a InputValueDefinition)],
) -> Vec<DefaultMismatch<'a>> {
    let Some((&(first_schema, first), rest)) = declarations.split_first() else {
        return Vec::new();
    };

    rest.iter()
        .filter(|(_, declaration)| declaration.default_value != first.default_value)
        .map(|&(schema, declaration)| DefaultMismatch {
            schema,
            default_value: declaration.default_value.as_ref(),
            first_schema,
            first_default_value: first.default_value.as_ref(),
        })
        .collect()
}

fn describe_default(default_value: Option<&Value>) -> String {
    match default_value {
        Some(value) => format!("'{value}'"),
        None => "no default value".to_owned(),
    }
}

fn external_argument_default_mismatch(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        for (field_name, fields) in field_groups(&definitions) {
            if fields.len() < 2 || !fields.iter().any(|(_, _, field)| field.directives.external()) {
                continue;
            }

            let mut arguments: IndexMap<&str, Vec<_>> = IndexMap::new();

            for (schema, _, field) in &fields {
                for argument in field.arguments.values() {
                    arguments.entry(argument.name.as_str()).or_default().push((*schema, argument));
                }
            }

            for (argument_name, declarations) in arguments {
                for mismatch in default_mismatches(&declarations) {
                    ctx.push_error(
                        ErrorCode::ExternalArgumentDefaultMismatch,
                        format!(
                            "The argument '{}' in schema '{}' has {}, which differs from {} in schema '{}'.",
                            argument_coordinate(type_name, field_name, argument_name),
                            mismatch.schema.name(),
                            describe_default(mismatch.default_value),
                            describe_default(mismatch.first_default_value),
                            mismatch.first_schema.name(),
                        ),
                    );
                }
            }
        }
    }
}

fn input_field_default_mismatch(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        let mut input_fields: IndexMap<&str, Vec<_>> = IndexMap::new();

        for (schema, definition) in &definitions {
            if definition.kind() != DefinitionKind::InputObject {
                continue;
            }

            for input_field in definition.input_fields() {
                input_fields
                    .entry(input_field.name.as_str())
                    .or_default()
                    .push((*schema, input_field));
            }
        }

        for (input_field_name, declarations) in input_fields {
            for mismatch in default_mismatches(&declarations) {
                ctx.push_error(
                    ErrorCode::InputFieldDefaultMismatch,
                    format!(
                        "The input field '{}' in schema '{}' has {}, which differs from {} in schema '{}'.",
                        field_coordinate(type_name, input_field_name),
                        mismatch.schema.name(),
                        describe_default(mismatch.default_value),
                        describe_default(mismatch.first_default_value),
                        mismatch.first_schema.name(),
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::validate_with;
    use pretty_assertions::assert_eq;

    #[test]
    fn external_argument_defaults_must_match() {
        let messages = validate_with(
            ExternalArgumentDefaultMismatch,
            &[
                r#"type Product { name(language: String = "en"): String }"#,
                r#"type Product { name(language: String = "de"): String @external }"#,
            ],
        );

        assert_eq!(
            messages,
            [r#"The argument 'Product.name(language:)' in schema 'B' has '"de"', which differs from '"en"' in schema 'A'."#]
        );
    }

    #[test]
    fn missing_default_is_a_mismatch() {
        let messages = validate_with(
            ExternalArgumentDefaultMismatch,
            &[
                r#"type Product { name(language: String = "en"): String }"#,
                r#"type Product { name(language: String = "en"): String @external }"#,
                r#"type Product { name(language: String): String @external }"#,
            ],
        );

        assert_eq!(
            messages,
            [r#"The argument 'Product.name(language:)' in schema 'C' has no default value, which differs from '"en"' in schema 'A'."#]
        );
    }

    #[test]
    fn arguments_of_non_external_fields_are_not_compared() {
        let messages = validate_with(
            ExternalArgumentDefaultMismatch,
            &[
                "type Product { price(currency: String = \"EUR\"): Float }",
                "type Product { price(currency: String = \"USD\"): Float }",
            ],
        );

        assert!(messages.is_empty());
    }

    #[test]
    fn input_field_defaults_must_match() {
        let messages = validate_with(
            InputFieldDefaultMismatch,
            &[
                "input BookFilter { genre: Genre = FANTASY limit: Int = 10 sort: Sort = { field: TITLE, desc: false } }",
                "input BookFilter { genre: Genre = FANTASY limit: Int = 20 sort: Sort = { desc: false, field: TITLE } }",
                "input BookFilter { genre: Genre = FANTASY limit: Int }",
            ],
        );

        assert_eq!(
            messages,
            [
                "The input field 'BookFilter.limit' in schema 'B' has '20', which differs from '10' in schema 'A'.",
                "The input field 'BookFilter.limit' in schema 'C' has no default value, which differs from '10' in schema 'A'.",
            ]
        );
    }
}
