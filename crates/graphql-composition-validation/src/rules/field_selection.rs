//! Shared plumbing for the rules over `fields: "..."` selections in `@key`, `@provides` and
//! `@requires`.

use crate::{
    schema::{DirectiveApplication, FieldDefinition, SchemaDefinition, TypeDefinition, Value},
    selection_path::{self, SelectionPathError, SelectionPathNode},
};

/// The `fields` argument of a directive, parsed.
pub(super) enum FieldsArgument<'a> {
    Missing,
    NotAString(&'a Value),
    Invalid(SelectionPathError),
    Parsed(Vec<SelectionPathNode>),
}

impl FieldsArgument<'_> {
    pub(super) fn into_parsed(self) -> Option<Vec<SelectionPathNode>> {
        match self {
            FieldsArgument::Parsed(selections) => Some(selections),
            _ => None,
        }
    }
}

pub(super) fn fields_argument(directive: &DirectiveApplication) -> FieldsArgument<'_> {
    let Some(value) = directive.argument("fields") else {
        return FieldsArgument::Missing;
    };

    let Some(text) = value.as_str() else {
        return FieldsArgument::NotAString(value);
    };

    match selection_path::parse(text) {
        Ok(selections) => FieldsArgument::Parsed(selections),
        Err(error) => {
            tracing::debug!(directive = %directive.name, fields = text, %error, "could not parse fields argument");
            FieldsArgument::Invalid(error)
        }
    }
}

/// A field reached while walking a selection.
pub(super) struct SelectedField<'a> {
    /// Dotted path from the root of the selection, e.g. `name.firstName`.
    pub(super) path: String,
    pub(super) parent_type: &'a str,
    pub(super) node: &'a SelectionPathNode,
    /// `None` when the parent type has no such field.
    pub(super) definition: Option<&'a FieldDefinition>,
}

impl SelectedField<'_> {
    pub(super) fn is_typename(&self) -> bool {
        self.node.name == "__typename"
    }
}

/// Walk the selection depth-first, left to right, resolving every field against the type it is
/// selected on. Selections below an unresolved field are not visited.
pub(super) fn selected_fields<'a>(
    schema: &'a SchemaDefinition,
    root_type: &'a str,
    selections: &'a [SelectionPathNode],
) -> Vec<SelectedField<'a>> {
    let mut fields = Vec::new();
    collect_selected_fields(schema, root_type, selections, None, &mut fields);
    fields
}

fn collect_selected_fields<'a>(
    schema: &'a SchemaDefinition,
    parent_type: &'a str,
    selections: &'a [SelectionPathNode],
    parent_path: Option<&str>,
    out: &mut Vec<SelectedField<'a>>,
) {
    for node in selections {
        let path = match parent_path {
            Some(parent_path) => format!("{parent_path}.{}", node.name),
            None => node.name.clone(),
        };

        let definition = schema
            .type_by_name(parent_type)
            .and_then(|definition| definition.field_by_name(&node.name));

        out.push(SelectedField {
            path: path.clone(),
            parent_type,
            node,
            definition,
        });

        if let Some(definition) = definition {
            collect_selected_fields(schema, definition.ty.named_type(), &node.selections, Some(&path), out);
        }
    }
}

/// Dotted paths of the fields that carry a directive application, depth-first, left to right.
/// No type resolution: fields below unknown fields are visited too.
pub(super) fn paths_with_directives(selections: &[SelectionPathNode]) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths_with_directives(selections, None, &mut paths);
    paths
}

fn collect_paths_with_directives(selections: &[SelectionPathNode], parent_path: Option<&str>, out: &mut Vec<String>) {
    for node in selections {
        let path = match parent_path {
            Some(parent_path) => format!("{parent_path}.{}", node.name),
            None => node.name.clone(),
        };

        if node.has_directives() {
            out.push(path.clone());
        }

        collect_paths_with_directives(&node.selections, Some(&path), out);
    }
}

/// Every application of the directive on an output field, across all schemas.
pub(super) fn fields_with_directive<'a>(
    schemas: &'a [SchemaDefinition],
    directive_name: &'static str,
) -> impl Iterator<
    Item = (
        &'a SchemaDefinition,
        &'a TypeDefinition,
        &'a FieldDefinition,
        &'a DirectiveApplication,
    ),
> + 'a {
    schemas.iter().flat_map(move |schema| {
        schema.types().flat_map(move |definition| {
            definition.fields().filter_map(move |field| {
                field
                    .directives
                    .get(directive_name)
                    .map(|directive| (schema, definition, field, directive))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn walk_order_and_paths() {
        let schema = SchemaDefinition::parse(
            r#"
            type Product {
              id: ID!
              name: Name
              dimensions: Dimensions
            }

            type Name { first: String last: String }
            type Dimensions { size: Int }
            "#,
        )
        .unwrap();

        let selections = selection_path::parse("id name { first middle { x } last } weight { grams }").unwrap();
        let fields = selected_fields(&schema, "Product", &selections)
            .into_iter()
            .map(|field| (field.path, field.parent_type, field.definition.is_some()))
            .collect::<Vec<_>>();

        assert_eq!(
            fields,
            [
                ("id".to_owned(), "Product", true),
                ("name".to_owned(), "Product", true),
                ("name.first".to_owned(), "Name", true),
                ("name.middle".to_owned(), "Name", false),
                ("name.last".to_owned(), "Name", true),
                ("weight".to_owned(), "Product", false),
            ]
        );
    }

    #[test]
    fn fields_argument_variants() {
        let missing = DirectiveApplication::new("key");
        assert!(matches!(fields_argument(&missing), FieldsArgument::Missing));

        let not_a_string = DirectiveApplication::new("key").with_argument("fields", Value::Int(1));
        assert!(matches!(fields_argument(&not_a_string), FieldsArgument::NotAString(Value::Int(1))));

        let invalid = DirectiveApplication::new("key").with_argument("fields", Value::String("id {".to_owned()));
        assert!(matches!(fields_argument(&invalid), FieldsArgument::Invalid(_)));

        let parsed = DirectiveApplication::new("key").with_argument("fields", Value::String("id".to_owned()));
        assert_eq!(fields_argument(&parsed).into_parsed(), Some(vec![SelectionPathNode::new("id")]));
    }

    #[test]
    fn directive_paths_reach_below_unknown_fields() {
        let selections = selection_path::parse("id @a missing { nested { x @b } y } z").unwrap();

        assert_eq!(paths_with_directives(&selections), ["id", "missing.nested.x"]);
    }
}
