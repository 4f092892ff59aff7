#![deny(unsafe_code)]

//! Pre-merge validation of GraphQL source schemas for federated composition.
//!
//! Before source schemas (subgraphs) are merged into one composite schema, every schema and
//! every group of same-named elements across schemas is checked against a catalog of rules. The
//! outcome is a [CompositionResult] and a [CompositionLog] of diagnostics, each with a stable
//! [ErrorCode].
//!
//! ```
//! # #![allow(unused_crate_dependencies)]
//! use graphql_composition_validation::{CompositionContext, PreMergeValidator};
//!
//! let mut context = CompositionContext::from_sdl(&[
//!     "enum Genre { FANTASY }",
//!     "enum Genre { SCIENCE_FICTION }",
//! ])
//! .unwrap();
//!
//! let result = PreMergeValidator::default().validate(&mut context);
//!
//! assert!(result.is_failure());
//! assert_eq!(context.log().len(), 2);
//! ```

#[cfg(test)]
use insta as _;
#[cfg(test)]
use tracing_subscriber as _;

mod context;
mod diagnostics;
mod ingest;
mod options;
mod type_shape;
mod validator;

/// The catalog of rules.
pub mod rules;
/// The in-memory model of a source schema.
pub mod schema;
/// The mini-language of `fields: "..."` directive arguments.
pub mod selection_path;

pub use self::{
    context::{CompositionContext, ContextError},
    diagnostics::{CompositionLog, ErrorCode, LogEntry, Severity},
    ingest::IngestError,
    options::{OptionsError, ValidationOptions},
    schema::SchemaDefinition,
    type_shape::shapes_match,
    validator::{CompositionResult, PreMergeValidator, Rule, ValidateContext},
};
