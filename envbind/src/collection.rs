//! Splitting raw values and materializing collections

use indexmap::IndexSet;
use regex::Regex;

use crate::coerce::coerce;
use crate::error::BindError;
use crate::types::{CollectionShape, ScalarKind};
use crate::value::BoundValue;

/// Bind `raw` into a collection of `shape` whose elements are `element`.
///
/// An absent or empty raw value binds to an empty collection, never to an
/// unset member. Tokens are coerced independently and a single failure fails
/// the whole collection. A unique set keeps the first occurrence of each
/// value at its original position.
pub fn bind(
    shape: CollectionShape,
    element: ScalarKind,
    raw: Option<&str>,
    separator: &str,
) -> Result<BoundValue, BindError> {
    let tokens = match raw {
        Some(raw) => split(raw, separator)?,
        None => Vec::new(),
    };

    let values = tokens.into_iter().map(|token| coerce(element, Some(token)));
    match shape {
        CollectionShape::Sequence => Ok(BoundValue::Sequence(
            values.collect::<Result<Vec<_>, _>>()?,
        )),
        CollectionShape::UniqueSet => Ok(BoundValue::UniqueSet(
            values.collect::<Result<IndexSet<_>, _>>()?,
        )),
    }
}

/// Split `raw` around matches of the `separator` pattern.
///
/// The separator is a regular expression. A zero-width match at the start of
/// the input does not produce a leading empty token, trailing empty tokens
/// are dropped, and an input without any match is returned whole. An empty
/// input yields no tokens. An empty match directly after a non-empty one
/// produces an empty token.
///
/// ```
/// use envbind::split;
///
/// assert_eq!(split("a,b,,", ",").unwrap(), ["a", "b"]);
/// assert_eq!(split("a1b22c", r"\d+").unwrap(), ["a", "b", "c"]);
/// assert_eq!(split("a.b", ".").unwrap(), Vec::<&str>::new());
/// ```
pub fn split<'a>(raw: &'a str, separator: &str) -> Result<Vec<&'a str>, BindError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = Regex::new(separator).map_err(|e| BindError::InvalidSeparator {
        pattern: separator.to_string(),
        message: e.to_string(),
    })?;

    let mut tokens = Vec::new();
    let mut index = 0;
    let mut from = 0;
    while from <= raw.len() {
        let Some(m) = pattern.find_at(raw, from) else {
            break;
        };
        if m.end() > 0 {
            tokens.push(&raw[index..m.start()]);
            index = m.end();
        }
        // An empty match may follow a non-empty one at the same position;
        // after an empty match the search moves on by one character.
        from = if m.is_empty() {
            m.end() + raw[m.end()..].chars().next().map_or(1, char::len_utf8)
        } else {
            m.end()
        };
    }

    if index == 0 {
        return Ok(vec![raw]);
    }

    tokens.push(&raw[index..]);
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }
    Ok(tokens)
}
