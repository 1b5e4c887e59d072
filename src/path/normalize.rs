use memchr::memchr_iter;
use smallvec::SmallVec;

use crate::path::{PathError, PathResult};

/// Canonical segment sequence of a path. Borrowed from the input.
pub type Segments<'a> = SmallVec<[&'a str; 16]>;

/// Splits `path` into its non-empty segments.
///
/// Repeated separators collapse. A trailing `/` yields one trailing empty
/// segment unless `ignore_trailing_slash` is set. The root path yields no
/// segments.
#[inline]
pub fn split_segments(path: &str, ignore_trailing_slash: bool) -> Segments<'_> {
    let bytes = path.as_bytes();
    let mut out = Segments::new();
    let mut start = 0usize;

    for idx in memchr_iter(b'/', bytes) {
        if idx > start {
            out.push(&path[start..idx]);
        }
        start = idx + 1;
    }

    if start < bytes.len() {
        out.push(&path[start..]);
    } else if !ignore_trailing_slash && !out.is_empty() {
        out.push("");
    }

    out
}

/// Checks shared by registration patterns and request paths: non-empty,
/// ASCII, rooted, no control or whitespace bytes.
pub(crate) fn validate_envelope(path: &str) -> PathResult<()> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if !path.is_ascii() {
        return Err(PathError::NonAscii {
            input: path.to_string(),
        });
    }
    if !path.starts_with('/') {
        return Err(PathError::MissingLeadingSlash {
            input: path.to_string(),
        });
    }
    if let Some(&byte) = path.as_bytes().iter().find(|&&b| b <= 0x20 || b == 0x7f) {
        return Err(PathError::ControlOrWhitespace {
            input: path.to_string(),
            byte,
        });
    }
    Ok(())
}

#[inline(always)]
pub(crate) fn is_allowed_literal_byte(b: u8) -> bool {
    matches!(
        b,
        b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'-'
            | b'.'
            | b'_'
            | b'~'
            | b'!'
            | b'$'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b'+'
            | b','
            | b';'
            | b'='
            | b':'
            | b'@'
            | b'/'
            | b'%'
    )
}

/// Validates a request path before lookup.
#[tracing::instrument(level = "trace", skip(path), fields(path_len = path.len() as u64))]
pub fn validate_match_path(path: &str) -> PathResult<()> {
    validate_envelope(path)?;

    for &b in path.as_bytes() {
        if !is_allowed_literal_byte(b) {
            return Err(PathError::DisallowedCharacter {
                input: path.to_string(),
                character: b as char,
                byte: b,
            });
        }
    }

    if path.split('/').any(|seg| seg == "..") {
        return Err(PathError::InvalidParentTraversal {
            input: path.to_string(),
        });
    }

    Ok(())
}
