//! Dot-separated path helpers.
//!
//! Segments are taken literally: no escaping or decoding is applied, so a key
//! that itself contains the separator cannot be addressed by path.

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Iterates over the segments of `path`.
pub fn segments(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

/// Splits `path` into its parent path (if any) and its final segment.
pub fn split_last(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once(SEPARATOR) {
        Some((parent, last)) => (Some(parent), last),
        None => (None, path),
    }
}

/// Joins a prefix and a key into a compound path.
pub fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{key}")
    }
}
