use crate::enums::HttpMethod;
use crate::path::PathError;
use crate::pattern::PatternError;
use crate::types::RouteKey;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RadixError {
    #[error("radix tree is sealed; cannot perform {operation}")]
    TreeSealed {
        operation: &'static str,
        path: Option<String>,
    },
    #[error("wildcard segment must be terminal: index {segment_index} of {total_segments}")]
    WildcardMustBeTerminal {
        segment_index: usize,
        total_segments: usize,
    },
    #[error("maximum number of routes exceeded (limit {limit})")]
    MaxRoutesExceeded { limit: u16 },
    #[error(
        "parameter ':{requested}' in '{path}' conflicts with existing parameter ':{existing}' at the same position"
    )]
    ParamNameConflict {
        existing: String,
        requested: String,
        path: String,
    },
    #[error("wildcard '{requested}' in '{path}' conflicts with existing wildcard '{existing}'")]
    WildcardConflict {
        existing: String,
        requested: String,
        path: String,
    },
    #[error("duplicate parameter name '{param}' in path '{path}'")]
    DuplicateParamName { param: String, path: String },
    #[error("duplicate route for method {method} and path '{path}' (existing key {existing_key})")]
    DuplicateRoute {
        method: HttpMethod,
        path: String,
        existing_key: RouteKey,
    },
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

pub type RadixResult<T> = Result<T, RadixError>;
