use std::fmt;

/// Warnings and errors produced by pre-merge validation, in emission order.
///
/// Entries are only ever appended. The log lives as long as the validation run.
#[derive(Default, Debug, Clone)]
pub struct CompositionLog(Vec<LogEntry>);

impl CompositionLog {
    /// Is there any diagnostic, warning or error?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is any of the entries fatal, i.e. a hard error?
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|entry| entry.severity == Severity::Error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.0.iter()
    }

    /// Iterate fatal entries.
    pub fn iter_errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.0.iter().filter(|entry| entry.severity == Severity::Error)
    }

    /// Iterate non-fatal entries.
    pub fn iter_warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.0.iter().filter(|entry| entry.severity == Severity::Warning)
    }

    /// Iterate over all diagnostic messages.
    pub fn iter_messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|entry| entry.message.as_str())
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.0.push(entry);
    }

    pub(crate) fn push_error(&mut self, code: ErrorCode, message: String) {
        self.push(LogEntry {
            code,
            message,
            severity: Severity::Error,
        });
    }

    pub(crate) fn push_warning(&mut self, code: ErrorCode, message: String) {
        self.push(LogEntry {
            code,
            message,
            severity: Severity::Warning,
        });
    }

    pub(crate) fn extend(&mut self, other: CompositionLog) {
        self.0.extend(other.0)
    }
}

impl<'a> IntoIterator for &'a CompositionLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CompositionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.0 {
            writeln!(f, "{entry}")?;
        }

        Ok(())
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub code: ErrorCode,
    /// Always of the form `<Subject> in schema '<Name>' <violation clause>.`
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    /// The stable string form of the error code, e.g. `KEY_INVALID_SYNTAX`.
    pub fn code(&self) -> &'static str {
        self.code.into()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Blocks composition.
    Error,
    /// Reported, but does not fail the run.
    Warning,
}

/// Stable diagnostic codes, one per rule.
///
/// See https://graphql.github.io/composite-schemas-spec/draft/ for most of them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    serde::Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    DisallowedInaccessible,
    EnumValuesMismatch,
    EnumValuesMustBeTheSameAcrossSchemas,
    ExternalArgumentDefaultMismatch,
    ExternalMissingOnBase,
    ExternalUnused,
    FieldArgumentTypesNotMergeable,
    InputFieldDefaultMismatch,
    InputFieldTypesNotMergeable,
    InputWithMissingRequiredFields,
    KeyDirectiveInFieldsArg,
    KeyFieldsHasArgs,
    KeyFieldsSelectInvalidType,
    KeyInvalidFields,
    KeyInvalidFieldsType,
    KeyInvalidSyntax,
    LookupMustNotReturnList,
    LookupShouldHaveNullableReturnType,
    OutputFieldTypesNotMergeable,
    OverrideSourceHasOverride,
    ProvidesDirectiveInFieldsArg,
    ProvidesInvalidFields,
    ProvidesInvalidFieldsType,
    ProvidesInvalidSyntax,
    ProvidesOnNonCompositeField,
    QueryRootTypeInaccessible,
    RequireDirectiveInFieldsArg,
    RequireInvalidFields,
    RequireInvalidFieldsType,
    RequireInvalidSyntax,
    RootQueryUsed,
    TypeKindMismatch,
}
