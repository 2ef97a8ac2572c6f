//! Coercion of one raw token into one scalar value

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::error::BindError;
use crate::types::ScalarKind;
use crate::value::ScalarValue;

/// Coerce `raw` into a scalar of `kind`.
///
/// Numbers follow the base-10 literal rules of their target width and fail
/// when out of range instead of truncating or saturating. Text and `Any`
/// pass the token through unchanged, the empty string included. An absent
/// token always fails.
///
/// Decimals keep any number of digits, but the exponent must fit in an
/// `i64`; `1e99999999999999999999` fails with an exponent overflow.
///
/// ```
/// use envbind::{coerce, ScalarKind, ScalarValue};
///
/// assert_eq!(coerce(ScalarKind::Int32, Some("42")), Ok(ScalarValue::Int32(42)));
/// assert!(coerce(ScalarKind::Int16, Some("40000")).is_err());
/// ```
pub fn coerce(kind: ScalarKind, raw: Option<&str>) -> Result<ScalarValue, BindError> {
    let Some(token) = raw else {
        return Err(BindError::coercion(kind, None, "no value present"));
    };

    match kind {
        ScalarKind::Int16 => parse_number(kind, token).map(ScalarValue::Int16),
        ScalarKind::Int32 => parse_number(kind, token).map(ScalarValue::Int32),
        ScalarKind::Int64 => parse_number(kind, token).map(ScalarValue::Int64),
        ScalarKind::Float32 => {
            parse_float(kind, token, f32::is_infinite).map(ScalarValue::Float32)
        }
        ScalarKind::Float64 => {
            parse_float(kind, token, f64::is_infinite).map(ScalarValue::Float64)
        }
        ScalarKind::Decimal => {
            parse_number::<BigDecimal>(kind, token).map(ScalarValue::Decimal)
        }
        ScalarKind::Text => Ok(ScalarValue::Text(token.to_string())),
        ScalarKind::Any => Ok(ScalarValue::Any(token.to_string())),
    }
}

fn parse_number<T>(kind: ScalarKind, token: &str) -> Result<T, BindError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    token
        .parse::<T>()
        .map_err(|e| BindError::coercion(kind, Some(token), e))
}

fn parse_float<T>(kind: ScalarKind, token: &str, is_infinite: fn(T) -> bool) -> Result<T, BindError>
where
    T: FromStr + Copy,
    T::Err: std::fmt::Display,
{
    let value = parse_number::<T>(kind, token)?;
    if is_infinite(value) && !is_infinity_literal(token) {
        return Err(BindError::coercion(kind, Some(token), "number out of range"));
    }
    Ok(value)
}

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
