use smallvec::SmallVec;

use super::{PatternError, PatternResult, SegmentPattern, WildcardOrigin};

/// Splits a route pattern on `/` outside parameter constraints.
///
/// Mirrors `split_segments`: duplicate separators collapse and a trailing
/// slash yields an empty segment unless `ignore_trailing_slash` is set.
pub fn split_pattern_segments(
    pattern: &str,
    ignore_trailing_slash: bool,
) -> PatternResult<SmallVec<[&str; 16]>> {
    let bytes = pattern.as_bytes();
    let mut out: SmallVec<[&str; 16]> = SmallVec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if depth > 0 => {
                i += 2;
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    return Err(PatternError::UnbalancedParenthesis {
                        pattern: pattern.to_string(),
                    });
                }
                depth -= 1;
            }
            b'/' if depth == 0 => {
                if i > start {
                    out.push(&pattern[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if depth != 0 {
        return Err(PatternError::UnbalancedParenthesis {
            pattern: pattern.to_string(),
        });
    }

    if start < bytes.len() {
        out.push(&pattern[start..]);
    } else if !ignore_trailing_slash && !out.is_empty() {
        out.push("");
    }

    Ok(out)
}

#[tracing::instrument(level = "trace", fields(segment=%seg))]
pub fn parse_segment(seg: &str) -> PatternResult<SegmentPattern> {
    if let Some(rest) = seg.strip_prefix('*') {
        if rest.is_empty() {
            return Ok(SegmentPattern::Wildcard {
                name: "*".to_string(),
                origin: WildcardOrigin::Star,
            });
        }
        if rest.contains('(') {
            return Err(PatternError::WildcardConstraintUnsupported {
                segment: seg.to_string(),
                name: rest.split('(').next().unwrap_or_default().to_string(),
            });
        }
        validate_param_name(seg, rest)?;
        return Ok(SegmentPattern::Wildcard {
            name: rest.to_string(),
            origin: WildcardOrigin::Star,
        });
    }

    if let Some(rest) = seg.strip_prefix(':') {
        if rest.is_empty() {
            return Err(PatternError::ParameterMissingName {
                segment: seg.to_string(),
            });
        }

        if let Some(open) = rest.find('(') {
            let name = &rest[..open];
            let body = &rest[open..];

            if !body.ends_with(')') {
                let trailing = body.trim_end_matches(['+', '*']);
                if trailing.len() != body.len() && trailing.ends_with(')') {
                    return Err(PatternError::WildcardConstraintUnsupported {
                        segment: seg.to_string(),
                        name: name.to_string(),
                    });
                }
                return Err(PatternError::MixedParameterLiteralSyntax {
                    segment: seg.to_string(),
                });
            }

            validate_param_name(seg, name)?;

            let constraint = &body[1..body.len() - 1];
            if !closes_at_end(body) {
                return Err(PatternError::MixedParameterLiteralSyntax {
                    segment: seg.to_string(),
                });
            }
            if constraint.is_empty() {
                return Err(PatternError::EmptyConstraint {
                    segment: seg.to_string(),
                    name: name.to_string(),
                });
            }

            return Ok(SegmentPattern::Param {
                name: name.to_string(),
                constraint: Some(constraint.to_string()),
            });
        }

        if let Some(name) = rest.strip_suffix('+') {
            validate_param_name(seg, name)?;
            return Ok(SegmentPattern::Wildcard {
                name: name.to_string(),
                origin: WildcardOrigin::Multi,
            });
        }
        if let Some(name) = rest.strip_suffix('*') {
            validate_param_name(seg, name)?;
            return Ok(SegmentPattern::Wildcard {
                name: name.to_string(),
                origin: WildcardOrigin::Zero,
            });
        }

        validate_param_name(seg, rest)?;
        return Ok(SegmentPattern::Param {
            name: rest.to_string(),
            constraint: None,
        });
    }

    if seg.contains(':') || seg.contains('*') {
        return Err(PatternError::MixedParameterLiteralSyntax {
            segment: seg.to_string(),
        });
    }

    if seg.contains('(') || seg.contains(')') {
        return Err(PatternError::ParenthesisNotAllowed {
            segment: seg.to_string(),
        });
    }

    Ok(SegmentPattern::Literal(seg.to_string()))
}

/// True when the `(` opening `body` is closed by its final `)`.
fn closes_at_end(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i == bytes.len() - 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    false
}

fn validate_param_name(seg: &str, name: &str) -> PatternResult<()> {
    let bytes = name.as_bytes();

    let Some(&first) = bytes.first() else {
        return Err(PatternError::ParameterMissingName {
            segment: seg.to_string(),
        });
    };

    if !(first.is_ascii_alphabetic() || first == b'_') {
        return Err(PatternError::ParameterInvalidStart {
            segment: seg.to_string(),
            name: name.to_string(),
            found: first as char,
        });
    }

    for &c in &bytes[1..] {
        if !(c.is_ascii_alphanumeric() || c == b'_') {
            return Err(PatternError::ParameterInvalidCharacter {
                segment: seg.to_string(),
                name: name.to_string(),
                invalid: c as char,
            });
        }
    }

    Ok(())
}
