use serde::{Deserialize, Serialize};

/// How a wildcard was declared, which decides how many segments it may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildcardOrigin {
    /// `*` or `*name`: every remaining segment, possibly none.
    Star,
    /// `:name+`: one or more remaining segments.
    Multi,
    /// `:name*`: zero or more remaining segments.
    Zero,
}

impl WildcardOrigin {
    #[inline]
    pub fn allows_empty(self) -> bool {
        !matches!(self, WildcardOrigin::Multi)
    }

    /// Whether an empty capture is still reported as a parameter.
    #[inline]
    pub fn records_empty(self) -> bool {
        matches!(self, WildcardOrigin::Zero)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPattern {
    Literal(String),
    Param {
        name: String,
        constraint: Option<String>,
    },
    Wildcard {
        name: String,
        origin: WildcardOrigin,
    },
}

impl SegmentPattern {
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, SegmentPattern::Literal(_))
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, SegmentPattern::Wildcard { .. })
    }

    pub fn param_name(&self) -> Option<&str> {
        match self {
            SegmentPattern::Literal(_) => None,
            SegmentPattern::Param { name, .. } | SegmentPattern::Wildcard { name, .. } => {
                Some(name.as_str())
            }
        }
    }
}
