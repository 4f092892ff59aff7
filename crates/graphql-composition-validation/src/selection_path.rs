//! Parser for the selection sets embedded in `@key(fields:)`, `@provides(fields:)` and
//! `@requires(fields:)`.
//!
//! ```graphql,ignore
//! type Product @key(fields: "id variation { sku }") {
//!                            ^^^^^^^^^^^^^^^^^^^^
//! ```
//!
//! The text is parsed as the selection set of a GraphQL executable document, restricted to
//! fields: no fragments, no aliases, no variables. Directive applications are accepted and kept
//! on the field they follow, so that rules can report them.

use crate::{
    ingest::ast_value_to_value,
    schema::{DirectiveApplication, Value},
};
use cynic_parser::{ConstValue, executable as ast};
use indexmap::IndexMap;

/// Selection sets, lists and objects nested deeper than this are rejected before parsing.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The selection is wrapped in braces before parsing, this is the length of the opening.
const PREFIX_LEN: usize = 2;

/// A field in a selection path, with its nested selections.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPathNode {
    pub name: String,
    pub arguments: IndexMap<String, Value>,
    pub directives: Vec<DirectiveApplication>,
    /// Empty when the field has no selection set.
    pub selections: Vec<SelectionPathNode>,
}

impl SelectionPathNode {
    pub fn new(name: impl Into<String>) -> Self {
        SelectionPathNode {
            name: name.into(),
            arguments: IndexMap::new(),
            directives: Vec::new(),
            selections: Vec::new(),
        }
    }

    pub fn with_selections(mut self, selections: Vec<SelectionPathNode>) -> Self {
        self.selections = selections;
        self
    }

    pub fn has_directives(&self) -> bool {
        !self.directives.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionPathError {
    #[error("the selection is empty")]
    EmptySelection,
    #[error("could not parse the selection: {0}")]
    Syntax(String),
    #[error("the braces of the selection are not balanced")]
    UnbalancedBraces,
    #[error("fields must be separated by whitespace, found `{name}` right after the previous field at offset {offset}")]
    MissingSeparator { name: String, offset: usize },
    #[error("variables are not allowed, found one in the argument `{argument}` at offset {offset}")]
    VariableNotAllowed { argument: String, offset: usize },
    #[error("aliases are not allowed, found `{alias}: {name}`")]
    AliasNotAllowed { alias: String, name: String },
    #[error("fragments are not allowed in a selection")]
    FragmentNotAllowed,
    #[error("the selection is nested deeper than {} levels at offset {offset}", MAX_NESTING_DEPTH)]
    TooDeeplyNested { offset: usize },
}

/// Parse the `fields` argument of `@key`, `@provides` or `@requires`.
///
/// Never panics: malformed input always comes back as an error.
pub fn parse(text: &str) -> Result<Vec<SelectionPathNode>, SelectionPathError> {
    if text
        .trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '\u{feff}')
        .is_empty()
    {
        return Err(SelectionPathError::EmptySelection);
    }

    check_nesting(text)?;

    // The closing brace goes on its own line so that a trailing comment cannot swallow it.
    let document = format!("{{ {text}\n}}");
    let parsed = cynic_parser::parse_executable_document(&document)
        .map_err(|error| SelectionPathError::Syntax(error.to_string()))?;

    // `a } { b` parses as two operations.
    if parsed.definitions().len() != 1 {
        return Err(SelectionPathError::UnbalancedBraces);
    }

    let Some(operation) = parsed.operations().next() else {
        return Err(SelectionPathError::UnbalancedBraces);
    };

    let selections = build_selections(&document, operation.selection_set())?;

    if selections.is_empty() {
        return Err(SelectionPathError::EmptySelection);
    }

    Ok(selections)
}

fn build_selections(
    document: &str,
    selections: ast::Iter<'_, ast::Selection<'_>>,
) -> Result<Vec<SelectionPathNode>, SelectionPathError> {
    selections
        .map(|selection| match selection {
            ast::Selection::Field(field) => build_field(document, field),
            ast::Selection::InlineFragment(_) | ast::Selection::FragmentSpread(_) => {
                Err(SelectionPathError::FragmentNotAllowed)
            }
        })
        .collect()
}

fn build_field(document: &str, field: ast::FieldSelection<'_>) -> Result<SelectionPathNode, SelectionPathError> {
    if let Some(alias) = field.alias() {
        return Err(SelectionPathError::AliasNotAllowed {
            alias: alias.to_owned(),
            name: field.name().to_owned(),
        });
    }

    let start = field.name_span().start;

    // `a(x: 1)b` and `a { b }c` lex as two fields.
    if let Some(b')' | b'}') = start
        .checked_sub(1)
        .and_then(|previous| document.as_bytes().get(previous).copied())
    {
        return Err(SelectionPathError::MissingSeparator {
            name: field.name().to_owned(),
            offset: start.saturating_sub(PREFIX_LEN),
        });
    }

    let directives = field
        .directives()
        .map(|directive| {
            Ok(DirectiveApplication {
                name: directive.name().to_owned(),
                arguments: build_arguments(directive.arguments())?,
            })
        })
        .collect::<Result<Vec<_>, SelectionPathError>>()?;

    Ok(SelectionPathNode {
        name: field.name().to_owned(),
        arguments: build_arguments(field.arguments())?,
        directives,
        selections: build_selections(document, field.selection_set())?,
    })
}

fn build_arguments(
    arguments: ast::Iter<'_, ast::Argument<'_>>,
) -> Result<IndexMap<String, Value>, SelectionPathError> {
    arguments
        .map(|argument| {
            let value = argument.value();
            let offset = value.span().start.saturating_sub(PREFIX_LEN);

            let value = ConstValue::try_from(value).map_err(|_| SelectionPathError::VariableNotAllowed {
                argument: argument.name().to_owned(),
                offset,
            })?;

            Ok((argument.name().to_owned(), ast_value_to_value(value)))
        })
        .collect()
}

/// Rejects inputs whose braces, brackets or parentheses nest deeper than [MAX_NESTING_DEPTH].
/// Strings and comments are skipped.
fn check_nesting(text: &str) -> Result<(), SelectionPathError> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut position = 0;

    while let Some(&byte) = bytes.get(position) {
        match byte {
            b'{' | b'[' | b'(' => {
                depth += 1;

                if depth > MAX_NESTING_DEPTH {
                    return Err(SelectionPathError::TooDeeplyNested { offset: position });
                }
            }
            b'}' | b']' | b')' => depth = depth.saturating_sub(1),
            b'#' => {
                position = bytes
                    .iter()
                    .skip(position)
                    .position(|&byte| byte == b'\n')
                    .map_or(bytes.len(), |newline| position + newline);
                continue;
            }
            b'"' => {
                position = skip_string(bytes, position);
                continue;
            }
            _ => (),
        }

        position += 1;
    }

    Ok(())
}

/// The position right after the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let starts_with_at = |position: usize, pattern: &[u8]| {
        bytes
            .get(position..)
            .is_some_and(|rest| rest.starts_with(pattern))
    };

    if starts_with_at(start, b"\"\"\"") {
        let mut position = start + 3;

        while position < bytes.len() {
            if starts_with_at(position, b"\\\"\"\"") {
                position += 4;
            } else if starts_with_at(position, b"\"\"\"") {
                return position + 3;
            } else {
                position += 1;
            }
        }

        return bytes.len();
    }

    let mut position = start + 1;

    while let Some(&byte) = bytes.get(position) {
        match byte {
            b'\\' => position += 2,
            b'"' | b'\n' => return position + 1,
            _ => position += 1,
        }
    }

    bytes.len()
}
