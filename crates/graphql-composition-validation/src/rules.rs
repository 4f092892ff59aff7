//! The catalog of pre-merge rules. One rule per [ErrorCode].

/// Declare a unit struct implementing [Rule] by delegating to a validation function.
macro_rules! rule {
    ($(#[$meta:meta])* $name:ident => $code:ident, $validate:path) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl crate::Rule for $name {
            fn code(&self) -> crate::ErrorCode {
                crate::ErrorCode::$code
            }

            fn validate(&self, ctx: &mut crate::ValidateContext<'_>) {
                $validate(ctx)
            }
        }
    };
}

mod default_values;
mod disallowed_inaccessible;
mod enum_values;
mod external;
mod field_selection;
mod input_fields;
mod keys;
mod lookup;
mod mergeable_types;
mod r#override;
mod provides;
mod requires;
mod root_types;
mod type_kinds;

pub use self::{
    default_values::{ExternalArgumentDefaultMismatch, InputFieldDefaultMismatch},
    disallowed_inaccessible::DisallowedInaccessible,
    enum_values::{EnumValuesMismatch, EnumValuesMustBeTheSameAcrossSchemas},
    external::{ExternalMissingOnBase, ExternalUnused},
    input_fields::InputWithMissingRequiredFields,
    keys::{
        KeyDirectiveInFieldsArg, KeyFieldsHasArgs, KeyFieldsSelectInvalidType, KeyInvalidFields, KeyInvalidFieldsType,
        KeyInvalidSyntax,
    },
    lookup::{LookupMustNotReturnList, LookupShouldHaveNullableReturnType},
    mergeable_types::{FieldArgumentTypesNotMergeable, InputFieldTypesNotMergeable, OutputFieldTypesNotMergeable},
    r#override::OverrideSourceHasOverride,
    provides::{
        ProvidesDirectiveInFieldsArg, ProvidesInvalidFields, ProvidesInvalidFieldsType, ProvidesInvalidSyntax,
        ProvidesOnNonCompositeField,
    },
    requires::{RequireDirectiveInFieldsArg, RequireInvalidFields, RequireInvalidFieldsType, RequireInvalidSyntax},
    root_types::{QueryRootTypeInaccessible, RootQueryUsed},
    type_kinds::TypeKindMismatch,
};

use crate::{ErrorCode, Rule};

/// Every rule, in registration order. This is the order diagnostics are reported in.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(TypeKindMismatch),
        Box::new(DisallowedInaccessible),
        Box::new(QueryRootTypeInaccessible),
        Box::new(RootQueryUsed),
        Box::new(EnumValuesMismatch),
        Box::new(EnumValuesMustBeTheSameAcrossSchemas),
        Box::new(OutputFieldTypesNotMergeable),
        Box::new(InputFieldTypesNotMergeable),
        Box::new(FieldArgumentTypesNotMergeable),
        Box::new(ExternalArgumentDefaultMismatch),
        Box::new(InputFieldDefaultMismatch),
        Box::new(InputWithMissingRequiredFields),
        Box::new(ExternalMissingOnBase),
        Box::new(ExternalUnused),
        Box::new(OverrideSourceHasOverride),
        Box::new(KeyInvalidFieldsType),
        Box::new(KeyInvalidSyntax),
        Box::new(KeyInvalidFields),
        Box::new(KeyDirectiveInFieldsArg),
        Box::new(KeyFieldsHasArgs),
        Box::new(KeyFieldsSelectInvalidType),
        Box::new(ProvidesInvalidFieldsType),
        Box::new(ProvidesInvalidSyntax),
        Box::new(ProvidesOnNonCompositeField),
        Box::new(ProvidesInvalidFields),
        Box::new(ProvidesDirectiveInFieldsArg),
        Box::new(RequireInvalidFieldsType),
        Box::new(RequireInvalidSyntax),
        Box::new(RequireInvalidFields),
        Box::new(RequireDirectiveInFieldsArg),
        Box::new(LookupMustNotReturnList),
        Box::new(LookupShouldHaveNullableReturnType),
    ]
}

/// [all_rules()] minus the opt-in ones.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    all_rules().into_iter().filter(|rule| is_default(rule.code())).collect()
}

/// `ENUM_VALUES_MUST_BE_THE_SAME_ACROSS_SCHEMAS` overlaps with `ENUM_VALUES_MISMATCH` and has to be
/// enabled explicitly.
pub(crate) fn is_default(code: ErrorCode) -> bool {
    code != ErrorCode::EnumValuesMustBeTheSameAcrossSchemas
}

/// `Type.field`
fn field_coordinate(type_name: &str, field_name: &str) -> String {
    format!("{type_name}.{field_name}")
}

/// `Type.field(argument:)`
fn argument_coordinate(type_name: &str, field_name: &str, argument_name: &str) -> String {
    format!("{type_name}.{field_name}({argument_name}:)")
}

/// Run a single rule over the SDL sources, return the messages it logged.
#[cfg(test)]
fn validate_with(rule: impl Rule + 'static, sources: &[&str]) -> Vec<String> {
    log_of(rule, sources).iter_messages().map(str::to_owned).collect()
}

#[cfg(test)]
fn log_of(rule: impl Rule + 'static, sources: &[&str]) -> crate::CompositionLog {
    let mut context = crate::CompositionContext::from_sdl(sources).unwrap();
    let _ = crate::PreMergeValidator::new(vec![Box::new(rule)]).validate(&mut context);
    context.into_log()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn one_rule_per_code() {
        let codes = all_rules().iter().map(|rule| rule.code()).collect::<Vec<_>>();
        let unique = codes.iter().copied().collect::<HashSet<_>>();

        assert_eq!(codes.len(), unique.len());
        assert_eq!(codes.len(), 32);
    }

    #[test]
    fn default_rules_leave_out_opt_in_rules() {
        let codes = default_rules().iter().map(|rule| rule.code()).collect::<Vec<_>>();

        assert!(codes.contains(&ErrorCode::EnumValuesMismatch));
        assert!(!codes.contains(&ErrorCode::EnumValuesMustBeTheSameAcrossSchemas));
        assert_eq!(codes.len(), all_rules().len() - 1);
    }

    #[test]
    fn coordinates() {
        assert_eq!(field_coordinate("Product", "name"), "Product.name");
        assert_eq!(argument_coordinate("Product", "name", "language"), "Product.name(language:)");
    }
}
