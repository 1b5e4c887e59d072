use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::pattern::{DEFAULT_MAX_PATTERN_LENGTH, TimeoutObserver, TimeoutPolicy};
use crate::readonly::DEFAULT_CACHE_CAPACITY;

pub const DEFAULT_REGEX_TIMEOUT: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterOptions {
    pub case_sensitive: bool,
    pub ignore_trailing_slash: bool,
    pub max_pattern_length: usize,
    pub regex_timeout: Option<Duration>,
    pub timeout_policy: TimeoutPolicy,
    pub cache_routes: bool,
    pub cache_capacity: usize,
    pub debug: bool,
    #[serde(skip)]
    pub timeout_observer: Option<TimeoutObserver>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            ignore_trailing_slash: true,
            max_pattern_length: DEFAULT_MAX_PATTERN_LENGTH,
            regex_timeout: Some(DEFAULT_REGEX_TIMEOUT),
            timeout_policy: TimeoutPolicy::default(),
            cache_routes: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            debug: false,
            timeout_observer: None,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.max_pattern_length == 0 {
            return Err(RouterOptionsError::MaxPatternLengthInvalid { provided: 0 });
        }
        if self.cache_routes && self.cache_capacity == 0 {
            return Err(RouterOptionsError::CacheCapacityInvalid { provided: 0 });
        }
        if self.regex_timeout.is_some_and(|budget| budget.is_zero()) {
            return Err(RouterOptionsError::RegexTimeoutZero);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.options.case_sensitive = value;
        self
    }

    pub fn ignore_trailing_slash(mut self, value: bool) -> Self {
        self.options.ignore_trailing_slash = value;
        self
    }

    pub fn max_pattern_length(mut self, value: usize) -> Self {
        self.options.max_pattern_length = value;
        self
    }

    pub fn regex_timeout(mut self, value: Option<Duration>) -> Self {
        self.options.regex_timeout = value;
        self
    }

    pub fn timeout_policy(mut self, value: TimeoutPolicy) -> Self {
        self.options.timeout_policy = value;
        self
    }

    pub fn timeout_observer(mut self, observer: TimeoutObserver) -> Self {
        self.options.timeout_observer = Some(observer);
        self
    }

    pub fn cache_routes(mut self, value: bool) -> Self {
        self.options.cache_routes = value;
        self
    }

    pub fn cache_capacity(mut self, value: usize) -> Self {
        self.options.cache_capacity = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("max_pattern_length must be at least 1 (got {provided})")]
    MaxPatternLengthInvalid { provided: usize },
    #[error("cache_capacity must be at least 1 when caching is enabled (got {provided})")]
    CacheCapacityInvalid { provided: usize },
    #[error("regex_timeout must be non-zero; use None to disable the budget")]
    RegexTimeoutZero,
}
