#![allow(unused_crate_dependencies)]

use graphql_composition_validation::{
    CompositionContext, CompositionLog, CompositionResult, PreMergeValidator, Rule, Severity, ValidationOptions, rules,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

fn run(validator: &PreMergeValidator, sources: &[&str]) -> (CompositionResult, CompositionLog) {
    init_logging();

    let mut context = CompositionContext::from_sdl(sources).unwrap();
    let result = validator.validate(&mut context);

    (result, context.into_log())
}

fn run_rule(rule: impl Rule + 'static, sources: &[&str]) -> (CompositionResult, CompositionLog) {
    run(&PreMergeValidator::new(vec![Box::new(rule)]), sources)
}

fn codes(log: &CompositionLog) -> Vec<&'static str> {
    log.iter().map(|entry| entry.code()).collect()
}

#[test]
fn inaccessible_built_in_scalar() {
    let sources = ["scalar String @inaccessible type Product { price: Float name: String }"];

    for (result, log) in [
        run_rule(rules::DisallowedInaccessible, &sources),
        run(&PreMergeValidator::default(), &sources),
    ] {
        assert!(result.is_failure());
        assert_eq!(codes(&log), ["DISALLOWED_INACCESSIBLE"]);
        assert_eq!(log.iter().next().map(|entry| entry.severity), Some(Severity::Error));
    }
}

#[test]
fn enum_values_missing_on_both_sides() {
    let sources = ["enum Genre { FANTASY }", "enum Genre { SCIENCE_FICTION }"];

    for (result, log) in [
        run_rule(rules::EnumValuesMismatch, &sources),
        run(&PreMergeValidator::default(), &sources),
    ] {
        assert!(result.is_failure());
        assert_eq!(
            log.iter_messages().collect::<Vec<_>>(),
            [
                "The enum type 'Genre' in schema 'A' must define the value 'SCIENCE_FICTION'.",
                "The enum type 'Genre' in schema 'B' must define the value 'FANTASY'.",
            ]
        );
    }
}

#[test]
fn external_argument_default_mismatch() {
    let sources = [
        r#"type Product { name(language: String = "en"): String }"#,
        r#"type Product { name(language: String = "de"): String @external }"#,
    ];

    let (result, log) = run_rule(rules::ExternalArgumentDefaultMismatch, &sources);

    assert!(result.is_failure());
    assert_eq!(codes(&log), ["EXTERNAL_ARGUMENT_DEFAULT_MISMATCH"]);
    assert!(log.iter_messages().all(|message| message.contains("Product.name(language:)")));

    // The default rule set also notices that nothing provides the external field.
    let (result, log) = run(&PreMergeValidator::default(), &sources);

    assert!(result.is_failure());
    insta::assert_snapshot!(log.to_string(), @r#"
    error[EXTERNAL_ARGUMENT_DEFAULT_MISMATCH]: The argument 'Product.name(language:)' in schema 'B' has '"de"', which differs from '"en"' in schema 'A'.
    error[EXTERNAL_UNUSED]: The external field 'Product.name' in schema 'B' is not referenced by any @provides directive.
    "#);
}

#[test]
fn key_selecting_an_interface() {
    let sources =
        [r#"type Product @key(fields: "featuredItem { id }") { featuredItem: Node! sku: String! } interface Node { id: ID! }"#];

    for (result, log) in [
        run_rule(rules::KeyFieldsSelectInvalidType, &sources),
        run(&PreMergeValidator::default(), &sources),
    ] {
        assert!(result.is_failure());
        assert_eq!(codes(&log), ["KEY_FIELDS_SELECT_INVALID_TYPE"]);
        assert!(log.iter_messages().all(|message| message.contains("Product.featuredItem")));
    }
}

#[test]
fn nullable_lookup_is_valid() {
    let sources = ["type Query { userById(id: ID!): User @lookup } type User { id: ID! name: String }"];

    let (result, log) = run(&PreMergeValidator::default(), &sources);

    assert!(result.is_success());
    assert!(log.is_empty(), "{log}");
}

#[test]
fn non_null_lookup_is_only_a_warning() {
    let sources = ["type Query { userById(id: ID!): User! @lookup } type User { id: ID! }"];

    for (result, log) in [
        run_rule(rules::LookupShouldHaveNullableReturnType, &sources),
        run(&PreMergeValidator::default(), &sources),
    ] {
        assert!(result.is_success());
        assert_eq!(codes(&log), ["LOOKUP_SHOULD_HAVE_NULLABLE_RETURN_TYPE"]);
        assert_eq!(log.iter_warnings().count(), 1);
        assert!(!log.has_errors());
    }
}

#[test]
fn options_from_toml() {
    let options = ValidationOptions::from_toml(
        r#"
        warnings_are_fatal = true
        enabled_rules = ["ENUM_VALUES_MUST_BE_THE_SAME_ACROSS_SCHEMAS"]
        "#,
    )
    .unwrap();

    let validator = PreMergeValidator::from_options(&options);

    let (result, log) = run(
        &validator,
        &["type Query { userById(id: ID!): User! @lookup } type User { id: ID! }"],
    );
    assert!(result.is_failure());
    assert_eq!(codes(&log), ["LOOKUP_SHOULD_HAVE_NULLABLE_RETURN_TYPE"]);

    let (_, log) = run(&validator, &["enum Genre { FANTASY }", "enum Genre { FANTASY HORROR }"]);
    assert_eq!(
        codes(&log),
        ["ENUM_VALUES_MISMATCH", "ENUM_VALUES_MUST_BE_THE_SAME_ACROSS_SCHEMAS"]
    );
}

#[test]
fn named_schemas_appear_in_messages() {
    init_logging();

    let mut context = CompositionContext::from_named_sdl(&[
        ("products", "type Product @key(fields: \"id {\") { id: ID! }"),
        ("reviews", "type Query { reviews: [Review] } type Review { id: ID! }"),
    ])
    .unwrap();

    let result = PreMergeValidator::default().validate(&mut context);

    assert!(result.is_failure());
    assert_eq!(codes(context.log()), ["KEY_INVALID_SYNTAX"]);
    assert!(
        context
            .log()
            .iter_messages()
            .all(|message| message.starts_with("The @key directive on type 'Product' in schema 'products'"))
    );
}

#[test]
fn a_valid_federated_pair() {
    let sources = [
        r#"
        type Query {
          productById(id: ID!): Product @lookup
        }

        type Product @key(fields: "id") {
          id: ID!
          name: String
          price(currency: String = "EUR"): Float
          category: Category
        }

        enum Category { BOOKS MUSIC }
        "#,
        r#"
        type Query {
          reviewById(id: ID!): Review @lookup
        }

        type Review @key(fields: "id") {
          id: ID!
          product: Product @provides(fields: "name price")
        }

        type Product @key(fields: "id") {
          id: ID!
          name: String @external
          price(currency: String = "EUR"): Float @external
          category: Category
        }

        enum Category { BOOKS MUSIC }
        "#,
    ];

    let (result, log) = run(&PreMergeValidator::default(), &sources);

    assert!(result.is_success());
    assert!(log.is_empty(), "{log}");
}
