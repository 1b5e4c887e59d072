use smallvec::SmallVec;

use super::{PatternError, PatternResult};

pub const DEFAULT_MAX_PATTERN_LENGTH: usize = 256;

/// What the scanner saw immediately before the current byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastAtom {
    None,
    Atom,
    Group { repeats_inside: bool },
}

/// Static registration-time check for user supplied constraint sources.
///
/// Rejects overlong sources, backreferences and unbounded quantifiers applied
/// to a group that itself repeats without bound (`(a+)+`, `(?:x*y)*`, ...).
/// Passing this check does not prove a pattern is cheap; the runtime budget in
/// the tester covers what slips through.
#[tracing::instrument(level = "trace", skip(source), fields(len = source.len() as u64))]
pub fn check_pattern_safety(source: &str, max_length: usize) -> PatternResult<()> {
    if source.len() > max_length {
        return Err(unsafe_pattern(
            source,
            format!(
                "pattern length {} exceeds the maximum of {}",
                source.len(),
                max_length
            ),
        ));
    }

    if let Some(reason) = find_backreference(source) {
        return Err(unsafe_pattern(source, reason));
    }

    if has_nested_unbounded_quantifier(source) {
        return Err(unsafe_pattern(
            source,
            "nested unbounded quantifier on a repeated group".to_string(),
        ));
    }

    Ok(())
}

fn unsafe_pattern(source: &str, reason: String) -> PatternError {
    tracing::event!(tracing::Level::DEBUG, operation = "pattern_guard", pattern = %source, reason = %reason, "constraint rejected");
    PatternError::UnsafePattern {
        pattern: source.to_string(),
        reason,
    }
}

fn find_backreference(source: &str) -> Option<String> {
    let bytes = source.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1) {
            Some(d @ b'1'..=b'9') => {
                return Some(format!("backreference \\{} is not allowed", *d as char));
            }
            Some(b'k') if matches!(bytes.get(i + 2), Some(b'<' | b'{' | b'\'')) => {
                return Some("named backreference \\k is not allowed".to_string());
            }
            _ => {}
        }
        i += 2;
    }

    None
}

fn has_nested_unbounded_quantifier(source: &str) -> bool {
    let bytes = source.as_bytes();
    // one frame per open group; true once anything inside repeats without bound
    let mut frames: SmallVec<[bool; 8]> = SmallVec::new();
    frames.push(false);
    let mut last = LastAtom::None;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                last = LastAtom::Atom;
                i += 2;
            }
            b'[' => {
                i = skip_class(bytes, i);
                last = LastAtom::Atom;
            }
            b'(' => {
                frames.push(false);
                last = LastAtom::None;
                i += 1;
            }
            b')' => {
                let inner = if frames.len() > 1 {
                    frames.pop().unwrap_or(false)
                } else {
                    false
                };
                if inner && let Some(parent) = frames.last_mut() {
                    *parent = true;
                }
                last = LastAtom::Group {
                    repeats_inside: inner,
                };
                i += 1;
            }
            b'*' | b'+' => {
                if last == (LastAtom::Group { repeats_inside: true }) {
                    return true;
                }
                if last != LastAtom::None
                    && let Some(frame) = frames.last_mut()
                {
                    *frame = true;
                }
                last = LastAtom::None;
                i += 1;
            }
            b'{' => match parse_counted(bytes, i) {
                Some((unbounded, next)) => {
                    if unbounded {
                        if last == (LastAtom::Group { repeats_inside: true }) {
                            return true;
                        }
                        if last != LastAtom::None
                            && let Some(frame) = frames.last_mut()
                        {
                            *frame = true;
                        }
                    }
                    last = LastAtom::None;
                    i = next;
                }
                None => {
                    last = LastAtom::Atom;
                    i += 1;
                }
            },
            b'?' | b'|' => {
                last = LastAtom::None;
                i += 1;
            }
            _ => {
                last = LastAtom::Atom;
                i += 1;
            }
        }
    }

    false
}

/// Returns the index just past the class starting at `start`.
fn skip_class(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    if bytes.get(i) == Some(&b'^') {
        i += 1;
    }
    if bytes.get(i) == Some(&b']') {
        i += 1;
    }
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b']' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Parses `{n}`, `{n,}` or `{n,m}` at `start`. Returns whether the upper bound
/// is open and the index past the closing brace.
fn parse_counted(bytes: &[u8], start: usize) -> Option<(bool, usize)> {
    let close = start + 1 + bytes[start + 1..].iter().position(|&b| b == b'}')?;
    let body = &bytes[start + 1..close];
    let mut parts = body.splitn(2, |&b| b == b',');
    let min = parts.next()?;
    if min.is_empty() || !min.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let unbounded = match parts.next() {
        None => false,
        Some([]) => true,
        Some(max) if max.iter().all(u8::is_ascii_digit) => false,
        Some(_) => return None,
    };
    Some((unbounded, close + 1))
}
