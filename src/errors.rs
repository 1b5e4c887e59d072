use crate::path::PathError;
use crate::pattern::PatternError;
use crate::radix::RadixError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("router is sealed; cannot add route '{path}'")]
    AddWhileSealed { path: String },
    #[error("router is sealed; cannot add {count} routes in bulk")]
    BulkAddWhileSealed { count: usize },
    #[error("router is not sealed; cannot perform route lookup")]
    FindWhileMutable,
    #[error("router is not sealed; readonly snapshot is unavailable")]
    ReadOnlyUnavailable,
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Radix(#[from] RadixError),
}

pub type RouterResult<T> = Result<T, RouterError>;

/// Closed classification of every failure the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    DuplicateRoute,
    PathSyntaxInvalid,
    WildcardNotAtEnd,
    DisallowedCharacters,
    DuplicateParamName,
    ParamNameInvalidStart,
    ParamNameInvalidChar,
    MixedLiteralAndParam,
    EmptyPath,
    NonAsciiPath,
    UnsafePattern,
    InvalidConstraint,
    AmbiguousRoute,
    RouteLimit,
    PatternExecutionTimeout,
    Lifecycle,
}

impl RouterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouterError::AddWhileSealed { .. }
            | RouterError::BulkAddWhileSealed { .. }
            | RouterError::FindWhileMutable
            | RouterError::ReadOnlyUnavailable => ErrorKind::Lifecycle,
            RouterError::Path(err) => ErrorKind::from(err),
            RouterError::Pattern(err) => ErrorKind::from(err),
            RouterError::Radix(err) => ErrorKind::from(err),
        }
    }
}

impl From<&PathError> for ErrorKind {
    fn from(err: &PathError) -> Self {
        match err {
            PathError::Empty => ErrorKind::EmptyPath,
            PathError::NonAscii { .. } => ErrorKind::NonAsciiPath,
            PathError::MissingLeadingSlash { .. } | PathError::InvalidParentTraversal { .. } => {
                ErrorKind::PathSyntaxInvalid
            }
            PathError::ControlOrWhitespace { .. } | PathError::DisallowedCharacter { .. } => {
                ErrorKind::DisallowedCharacters
            }
        }
    }
}

impl From<&PatternError> for ErrorKind {
    fn from(err: &PatternError) -> Self {
        match err {
            PatternError::ParenthesisNotAllowed { .. }
            | PatternError::UnbalancedParenthesis { .. }
            | PatternError::ParameterMissingName { .. } => ErrorKind::PathSyntaxInvalid,
            PatternError::ParameterInvalidStart { .. } => ErrorKind::ParamNameInvalidStart,
            PatternError::ParameterInvalidCharacter { .. } => ErrorKind::ParamNameInvalidChar,
            PatternError::MixedParameterLiteralSyntax { .. } => ErrorKind::MixedLiteralAndParam,
            PatternError::EmptyConstraint { .. }
            | PatternError::WildcardConstraintUnsupported { .. }
            | PatternError::RegexConstraintInvalid { .. } => ErrorKind::InvalidConstraint,
            PatternError::UnsafePattern { .. } => ErrorKind::UnsafePattern,
            PatternError::ExecutionTimeout { .. } => ErrorKind::PatternExecutionTimeout,
        }
    }
}

impl From<&RadixError> for ErrorKind {
    fn from(err: &RadixError) -> Self {
        match err {
            RadixError::TreeSealed { .. } => ErrorKind::Lifecycle,
            RadixError::WildcardMustBeTerminal { .. } => ErrorKind::WildcardNotAtEnd,
            RadixError::MaxRoutesExceeded { .. } => ErrorKind::RouteLimit,
            RadixError::ParamNameConflict { .. } | RadixError::WildcardConflict { .. } => {
                ErrorKind::AmbiguousRoute
            }
            RadixError::DuplicateParamName { .. } => ErrorKind::DuplicateParamName,
            RadixError::DuplicateRoute { .. } => ErrorKind::DuplicateRoute,
            RadixError::Path(err) => ErrorKind::from(err),
            RadixError::Pattern(err) => ErrorKind::from(err),
        }
    }
}
