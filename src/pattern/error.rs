use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("segment '{segment}' contains parentheses outside a parameter constraint")]
    ParenthesisNotAllowed { segment: String },
    #[error("route pattern '{pattern}' has unbalanced parentheses")]
    UnbalancedParenthesis { pattern: String },
    #[error("parameter segment '{segment}' is missing a name")]
    ParameterMissingName { segment: String },
    #[error(
        "parameter name '{name}' in segment '{segment}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    ParameterInvalidStart {
        segment: String,
        name: String,
        found: char,
    },
    #[error(
        "parameter name '{name}' in segment '{segment}' contains invalid character '{invalid}'"
    )]
    ParameterInvalidCharacter {
        segment: String,
        name: String,
        invalid: char,
    },
    #[error("segment '{segment}' mixes parameter and literal syntax")]
    MixedParameterLiteralSyntax { segment: String },
    #[error("constraint for parameter '{name}' in segment '{segment}' is empty")]
    EmptyConstraint { segment: String, name: String },
    #[error("wildcard parameter '{name}' in segment '{segment}' cannot carry a constraint")]
    WildcardConstraintUnsupported { segment: String, name: String },
    #[error("constraint '{pattern}' for parameter '{name}' failed to compile: {error}")]
    RegexConstraintInvalid {
        pattern: String,
        name: String,
        error: String,
    },
    #[error("constraint '{pattern}' rejected by safety guard: {reason}")]
    UnsafePattern { pattern: String, reason: String },
    #[error("constraint '{pattern}' exceeded its execution budget ({elapsed:?} > {budget:?})")]
    ExecutionTimeout {
        pattern: String,
        elapsed: Duration,
        budget: Duration,
    },
}

pub type PatternResult<T> = Result<T, PatternError>;
