use crate::{ErrorCode, ValidateContext, context::type_groups};

rule!(
    /// A type name must denote the same kind of type in every schema defining it.
    TypeKindMismatch => TypeKindMismatch, type_kind_mismatch
);

fn type_kind_mismatch(ctx: &mut ValidateContext<'_>) {
    for (type_name, definitions) in type_groups(ctx.schemas()) {
        let Some(((first_schema, first), rest)) = definitions.split_first() else {
            continue;
        };

        for (schema, definition) in rest {
            if definition.kind() == first.kind() {
                continue;
            }

            ctx.push_error(
                ErrorCode::TypeKindMismatch,
                format!(
                    "The type '{type_name}' in schema '{}' is defined as {}, but as {} in schema '{}'.",
                    schema.name(),
                    with_article(definition.kind()),
                    with_article(first.kind()),
                    first_schema.name(),
                ),
            );
        }
    }
}

fn with_article(kind: impl std::fmt::Display) -> String {
    let kind = kind.to_string();

    if kind.starts_with(['a', 'e', 'i', 'o', 'u']) {
        format!("an {kind}")
    } else {
        format!("a {kind}")
    }
}
