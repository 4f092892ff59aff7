use crate::{
    CompositionContext, CompositionLog, ErrorCode, ValidationOptions,
    rules,
    schema::SchemaDefinition,
};

/// One pre-merge check.
///
/// Rules are stateless and independent: a rule never observes the entries emitted by another
/// rule.
pub trait Rule: Send + Sync {
    /// The code of the diagnostics this rule emits.
    fn code(&self) -> ErrorCode;

    fn validate(&self, ctx: &mut ValidateContext<'_>);
}

/// What a [Rule] gets to see: the source schemas, and the log to append to.
pub struct ValidateContext<'a> {
    pub(crate) schemas: &'a [SchemaDefinition],
    pub(crate) log: &'a mut CompositionLog,
}

impl<'a> ValidateContext<'a> {
    pub fn schemas(&self) -> &'a [SchemaDefinition] {
        self.schemas
    }

    pub fn log(&mut self) -> &mut CompositionLog {
        self.log
    }

    pub(crate) fn push_error(&mut self, code: ErrorCode, message: String) {
        self.log.push_error(code, message);
    }

    pub(crate) fn push_warning(&mut self, code: ErrorCode, message: String) {
        self.log.push_warning(code, message);
    }
}

/// Runs an ordered set of rules over a [CompositionContext].
pub struct PreMergeValidator {
    rules: Vec<Box<dyn Rule>>,
    warnings_are_fatal: bool,
}

impl Default for PreMergeValidator {
    fn default() -> Self {
        PreMergeValidator::new(rules::default_rules())
    }
}

impl PreMergeValidator {
    /// Rules run, and report, in the order given.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        PreMergeValidator {
            rules,
            warnings_are_fatal: false,
        }
    }

    /// The default rule set, adjusted by the options.
    pub fn from_options(options: &ValidationOptions) -> Self {
        let rules = rules::all_rules()
            .into_iter()
            .filter(|rule| {
                let code = rule.code();
                let enabled_by_default = rules::is_default(code) && !options.disabled_rules.contains(&code);
                enabled_by_default || options.enabled_rules.contains(&code)
            })
            .collect();

        PreMergeValidator {
            rules,
            warnings_are_fatal: options.warnings_are_fatal,
        }
    }

    /// Treat all warnings as fatal.
    pub fn warnings_are_fatal(mut self) -> Self {
        self.warnings_are_fatal = true;
        self
    }

    pub fn rule_codes(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.rules.iter().map(|rule| rule.code())
    }

    /// Run every rule. Diagnostics accumulate in the context's log, the verdict is returned.
    #[tracing::instrument(name = "pre_merge_validation", skip_all, fields(schemas = context.schemas().len(), rules = self.rules.len()))]
    pub fn validate(&self, context: &mut CompositionContext) -> CompositionResult {
        let schemas = context.schemas();
        let mut log = CompositionLog::default();

        for rule in &self.rules {
            // Each rule writes to its own buffer, merged in registration order.
            let mut rule_log = CompositionLog::default();
            let mut ctx = ValidateContext {
                schemas,
                log: &mut rule_log,
            };

            rule.validate(&mut ctx);

            tracing::debug!(rule = %rule.code(), entries = rule_log.len(), "rule finished");
            log.extend(rule_log);
        }

        context.log.extend(log);

        let is_success = if self.warnings_are_fatal {
            context.log.is_empty()
        } else {
            !context.log.has_errors()
        };

        if !is_success {
            tracing::debug!(errors = context.log.iter_errors().count(), "pre-merge validation failed");
        }

        CompositionResult { is_success }
    }
}

/// The verdict of a [PreMergeValidator::validate()] run. The merge step must not run unless it is
/// a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct CompositionResult {
    is_success: bool,
}

impl CompositionResult {
    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success
    }
}
