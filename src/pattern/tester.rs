use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{PatternError, PatternResult};

pub const DEFAULT_PARAM_PATTERN: &str = "[^/]+";

/// What happens when a regex constraint overruns its execution budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeoutPolicy {
    /// Surface `PatternError::ExecutionTimeout` to the caller.
    #[default]
    Error,
    /// Treat the overrun as a non-match and continue the lookup.
    NoMatch,
}

/// Details handed to a timeout observer.
#[derive(Debug, Clone, Copy)]
pub struct PatternTimeout<'a> {
    pub pattern: &'a str,
    pub segment_len: usize,
    pub elapsed: Duration,
    pub budget: Duration,
}

/// Notified of every overrun. It cannot change the outcome; `TimeoutPolicy`
/// alone decides that.
#[derive(Clone)]
pub struct TimeoutObserver(Arc<dyn Fn(&PatternTimeout<'_>) + Send + Sync>);

impl TimeoutObserver {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&PatternTimeout<'_>) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    fn notify(&self, event: &PatternTimeout<'_>) {
        (self.0)(event)
    }
}

impl PartialEq for TimeoutObserver {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for TimeoutObserver {}

impl fmt::Debug for TimeoutObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeoutObserver")
    }
}

/// Execution budget shared by every regex tester in a tree.
#[derive(Debug, Clone, Default)]
pub struct TimeoutGuard {
    pub budget: Option<Duration>,
    pub policy: TimeoutPolicy,
    pub observer: Option<TimeoutObserver>,
}

impl TimeoutGuard {
    pub fn new(budget: Option<Duration>, policy: TimeoutPolicy) -> Self {
        Self {
            budget,
            policy,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: TimeoutObserver) -> Self {
        self.observer = Some(observer);
        self
    }
}

#[derive(Debug)]
enum TesterKind {
    Digits,
    Alpha,
    AlphaNumericDashUnderscore,
    NoSlash,
    Regex(Regex),
}

/// A compiled parameter constraint.
///
/// Common constraint shapes run as byte scans; anything else goes through
/// the regex engine under the tree's `TimeoutGuard`.
#[derive(Debug)]
pub struct PatternTester {
    source: Box<str>,
    kind: TesterKind,
}

const DIGIT_SOURCES: &[&str] = &["\\d+", "[0-9]+"];
const ALPHA_SOURCES: &[&str] = &["[a-zA-Z]+", "[A-Za-z]+"];
const ALNUM_DASH_SOURCES: &[&str] = &[
    "[a-zA-Z0-9_-]+",
    "[A-Za-z0-9_-]+",
    "[a-zA-Z0-9-_]+",
    "[A-Za-z0-9-_]+",
    "[a-zA-Z0-9_\\-]+",
    "[A-Za-z0-9_\\-]+",
    "[\\w-]+",
    "[-\\w]+",
];
const NO_SLASH_SOURCES: &[&str] = &[DEFAULT_PARAM_PATTERN];

impl PatternTester {
    /// Tester used when a parameter declares no constraint.
    pub fn unconstrained() -> Self {
        Self {
            source: DEFAULT_PARAM_PATTERN.into(),
            kind: TesterKind::NoSlash,
        }
    }

    /// Compiles `source` for the parameter `name`. Safety checks happen
    /// before this is called.
    pub fn compile(name: &str, source: &str) -> PatternResult<Self> {
        let body = strip_anchors(source);

        let kind = if DIGIT_SOURCES.contains(&body) {
            TesterKind::Digits
        } else if ALPHA_SOURCES.contains(&body) {
            TesterKind::Alpha
        } else if ALNUM_DASH_SOURCES.contains(&body) {
            TesterKind::AlphaNumericDashUnderscore
        } else if NO_SLASH_SOURCES.contains(&body) {
            TesterKind::NoSlash
        } else {
            let anchored = format!("^(?:{})$", body);
            let regex = Regex::new(&anchored).map_err(|err| PatternError::RegexConstraintInvalid {
                pattern: source.to_string(),
                name: name.to_string(),
                error: err.to_string(),
            })?;
            TesterKind::Regex(regex)
        };

        Ok(Self {
            source: source.into(),
            kind,
        })
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether this tester avoids the regex engine.
    #[inline]
    pub fn is_specialized(&self) -> bool {
        !matches!(self.kind, TesterKind::Regex(_))
    }

    /// Tests one segment. `Err` only on a budget overrun under
    /// `TimeoutPolicy::Error`.
    #[inline]
    pub fn test(&self, segment: &str, guard: &TimeoutGuard) -> PatternResult<bool> {
        let bytes = segment.as_bytes();
        match &self.kind {
            TesterKind::Digits => Ok(!bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)),
            TesterKind::Alpha => Ok(!bytes.is_empty() && bytes.iter().all(u8::is_ascii_alphabetic)),
            TesterKind::AlphaNumericDashUnderscore => Ok(!bytes.is_empty()
                && bytes
                    .iter()
                    .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')),
            TesterKind::NoSlash => Ok(!bytes.is_empty() && memchr::memchr(b'/', bytes).is_none()),
            TesterKind::Regex(regex) => self.test_regex(regex, segment, guard),
        }
    }

    fn test_regex(&self, regex: &Regex, segment: &str, guard: &TimeoutGuard) -> PatternResult<bool> {
        let Some(budget) = guard.budget else {
            return Ok(regex.is_match(segment));
        };

        let started = Instant::now();
        let matched = regex.is_match(segment);
        let elapsed = started.elapsed();

        if elapsed <= budget {
            return Ok(matched);
        }

        let event = PatternTimeout {
            pattern: &self.source,
            segment_len: segment.len(),
            elapsed,
            budget,
        };
        if let Some(observer) = guard.observer.as_ref() {
            observer.notify(&event);
        }

        tracing::event!(
            tracing::Level::WARN,
            operation = "pattern_test",
            pattern = %self.source,
            segment_len = segment.len() as u64,
            elapsed_us = elapsed.as_micros() as u64,
            budget_us = budget.as_micros() as u64,
            policy = ?guard.policy,
            "constraint exceeded its execution budget"
        );

        match guard.policy {
            TimeoutPolicy::Error => Err(PatternError::ExecutionTimeout {
                pattern: self.source.to_string(),
                elapsed,
                budget,
            }),
            TimeoutPolicy::NoMatch => Ok(false),
        }
    }
}

fn strip_anchors(source: &str) -> &str {
    let body = source.strip_prefix('^').unwrap_or(source);
    match body.strip_suffix('$') {
        Some(stripped) if !stripped.ends_with('\\') => stripped,
        _ => body,
    }
}
