use crate::ErrorCode;

/// Configuration for a [crate::PreMergeValidator].
///
/// ```toml
/// warnings_are_fatal = true
/// disabled_rules = ["ROOT_QUERY_USED"]
/// enabled_rules = ["ENUM_VALUES_MUST_BE_THE_SAME_ACROSS_SCHEMAS"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    /// Warnings also fail the run.
    pub warnings_are_fatal: bool,
    /// Rules removed from the default rule set.
    pub disabled_rules: Vec<ErrorCode>,
    /// Rules added to the default rule set.
    pub enabled_rules: Vec<ErrorCode>,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("invalid validation options: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ValidationOptions {
    pub fn from_toml(source: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(source)?)
    }
}
