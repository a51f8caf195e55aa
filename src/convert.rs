// used for rendering timestamps
use chrono::SecondsFormat;
use tracing::trace;

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::datatype::{FieldType, Kind, Timestamp, zero_time};
use crate::error::{FieldkitError, Result};
use crate::value::Value;

/// Renders a value as text.
///
/// Integers are written in base 10, floats with six digits after the
/// decimal point, booleans as `true`/`false` and timestamps as RFC-3339
/// wrapped in single quotes. A null pointer renders as the default of its
/// kind: `""` for strings, `"0"` for numbers, `"false"` for booleans and the
/// quoted zero timestamp for timestamps. Anything else renders as `""`.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Ptr(kind, None) => null_display(*kind),
        Value::Ptr(_, Some(inner)) => plain_display(inner).unwrap_or_default(),
        other => plain_display(other).unwrap_or_default(),
    }
}

fn plain_display(value: &Value) -> Option<String> {
    let text = match value {
        Value::Str(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::I8(v) => v.to_string(),
        Value::I16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::Isize(v) => v.to_string(),
        Value::U8(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::Usize(v) => v.to_string(),
        Value::F32(v) => fixed(f64::from(*v), || format!("{v:.6}")),
        Value::F64(v) => fixed(*v, || format!("{v:.6}")),
        Value::Time(t) => quoted(t),
        _ => return None,
    };
    Some(text)
}

fn null_display(kind: Kind) -> String {
    match kind {
        Kind::Bool => "false".to_owned(),
        Kind::Time => quoted(&zero_time()),
        k if k.is_numeric() => "0".to_owned(),
        _ => String::new(),
    }
}

fn fixed(value: f64, render: impl FnOnce() -> String) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "+" } else { "-" };
        format!("{sign}Inf")
    } else {
        render()
    }
}

fn quoted(timestamp: &Timestamp) -> String {
    format!("'{}'", timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Picks `truthy` or `falsy` depending on [`Value::is_truthy`].
pub fn ternary<T>(subject: &Value, truthy: T, falsy: T) -> T {
    if subject.is_truthy() { truthy } else { falsy }
}

/// Checks that `value` reads as a floating point number.
pub fn is_numeric_string(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(FieldkitError::Empty);
    }
    value
        .parse::<f64>()
        .map(|_| ())
        .map_err(|e| FieldkitError::NotANumber(e.to_string()))
}

/// Looks up `key` and hands it back as a `T`.
///
/// The stored value must already be a `T`, except for timestamps and
/// decimals, which are also parsed from strings. Timestamps use the first of
/// `layouts` when given, otherwise every supported layout. A missing mapping
/// or key, a value of another type and a failed parse all give `None`.
pub fn coerce_from_mapping<T, S>(
    mapping: Option<&HashMap<String, Value, S>>,
    key: &str,
    layouts: &[&str],
) -> Option<T>
where
    T: FieldType,
    S: BuildHasher,
{
    let raw = mapping?.get(key)?;
    if let Some(value) = T::from_value(raw) {
        return Some(value);
    }
    if !matches!(T::KIND, Kind::Time | Kind::Decimal) {
        trace!(key, expected = T::DATA_TYPE, found = ?raw.kind(), "type mismatch");
        return None;
    }
    let text = raw.as_str()?;
    let parsed = T::from_text(text, layouts.first().copied());
    if parsed.is_none() {
        trace!(key, expected = T::DATA_TYPE, text, "cannot parse");
    }
    parsed
}

/// Best-effort conversion of any value into a `T`.
///
/// Pointers are followed once, matching values are taken directly and
/// everything else goes through its textual form. Gives the zero value of
/// `T` when nothing works.
pub fn coerce_any<T: FieldType>(value: &Value) -> T {
    let value = value.pointee().unwrap_or(value);
    if let Some(direct) = T::from_value(value) {
        return direct;
    }
    let text = match value {
        Value::Str(s) => s.clone(),
        other => to_display_string(other),
    };
    T::from_text(&text, None).unwrap_or_else(|| {
        trace!(expected = T::DATA_TYPE, text = %text, "cannot coerce, using zero");
        T::zero()
    })
}
