use crate::{ErrorCode, ValidateContext};

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Query-Root-Type-Inaccessible
    QueryRootTypeInaccessible => QueryRootTypeInaccessible, query_root_type_inaccessible
);

rule!(
    /// https://graphql.github.io/composite-schemas-spec/draft/#sec-Root-Query-Used
    RootQueryUsed => RootQueryUsed, root_query_used
);

const QUERY: &str = "Query";

fn query_root_type_inaccessible(ctx: &mut ValidateContext<'_>) {
    for schema in ctx.schemas() {
        let Some(query_root) = schema.query_type() else {
            continue;
        };

        if !query_root.directives.inaccessible() {
            continue;
        }

        ctx.push_error(
            ErrorCode::QueryRootTypeInaccessible,
            format!(
                "The query root type '{}' in schema '{}' must not be inaccessible.",
                query_root.name,
                schema.name(),
            ),
        );
    }
}

fn root_query_used(ctx: &mut ValidateContext<'_>) {
    for schema in ctx.schemas() {
        let query_root = schema.root_operation_types().query.as_deref();

        if let Some(query_root) = query_root.filter(|name| *name != QUERY) {
            ctx.push_error(
                ErrorCode::RootQueryUsed,
                format!(
                    "The root query type '{query_root}' in schema '{}' must be named '{QUERY}'.",
                    schema.name(),
                ),
            );
        }

        if schema.type_by_name(QUERY).is_some() && query_root != Some(QUERY) {
            ctx.push_error(
                ErrorCode::RootQueryUsed,
                format!(
                    "The type '{QUERY}' in schema '{}' must be the root query type.",
                    schema.name(),
                ),
            );
        }
    }
}
