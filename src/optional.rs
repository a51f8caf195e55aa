//! Optional values over the constrained type set.
//!
//! An optional value is an `Option<T>` where `T: FieldType`; `None` is the
//! null handle. The zero value of `T` doubles as the "empty" sentinel and as
//! the fallback whenever a value is absent.

use tracing::trace;

use crate::datatype::FieldType;
use crate::value::Value;

/// Wraps a value in a non-null optional.
pub fn make_optional<T: FieldType>(value: T) -> Option<T> {
    Some(value)
}

/// The held value, or the zero value of `T` when null.
pub fn unwrap_or_zero<T: FieldType>(value: Option<T>) -> T {
    value.unwrap_or_else(T::zero)
}

/// True only for a non-null optional holding the zero value.
pub fn is_empty<T: FieldType>(value: Option<&T>) -> bool {
    value.is_some_and(|v| v.is_zero())
}

/// True for a null optional or one holding the zero value.
pub fn is_absent_or_empty<T: FieldType>(value: Option<&T>) -> bool {
    value.is_none_or(|v| v.is_zero())
}

/// Compares two optionals that are expected to be non-null.
///
/// Returns -1 when either side is null, 0 when both are equal and 1
/// otherwise. Null therefore sorts as "less than" anything, itself included.
pub fn compare_non_null<T: FieldType>(a: Option<&T>, b: Option<&T>) -> i32 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 0,
        (Some(_), Some(_)) => 1,
        _ => -1,
    }
}

// Resolves `fallback` into T, nil meaning the zero value.
fn fallback_as<T: FieldType>(fallback: &Value) -> T {
    match fallback {
        Value::Nil => T::zero(),
        other => T::from_value(other).unwrap_or_else(|| {
            trace!(expected = T::DATA_TYPE, "fallback has another type, using zero");
            T::zero()
        }),
    }
}

/// Extracts a `T` from `test`, using `fallback` when `test` is nil or a null
/// handle.
///
/// Only a pointer is dereferenced. A plain value is not a handle, so it gives
/// the zero value of `T` rather than itself, as does a pointee that is not a
/// `T` or a non-null list, map or function.
pub fn default_if_absent<T: FieldType>(test: &Value, fallback: &Value) -> T {
    if test.is_nil() {
        return fallback_as(fallback);
    }
    let extracted = match test {
        Value::Ptr(_, Some(inner)) => T::from_value(inner),
        _ => None,
    };
    extracted.unwrap_or_else(|| {
        trace!(expected = T::DATA_TYPE, found = ?test.kind(), "cannot extract, using zero");
        T::zero()
    })
}

/// Like [`default_if_absent`], handing the result back boxed.
pub fn default_if_absent_ref<T: FieldType>(test: &Value, fallback: &Value) -> Box<T> {
    Box::new(default_if_absent(test, fallback))
}

/// The element at `index` and whether it exists. A missing sequence or an
/// index past the end gives the zero value and `false`.
pub fn element_at<T: FieldType>(sequence: Option<&[T]>, index: usize) -> (T, bool) {
    match element_at_ref(sequence, index) {
        Some(element) => (element.clone(), true),
        None => (T::zero(), false),
    }
}

/// Borrows the element at `index`, if there is one.
pub fn element_at_ref<T>(sequence: Option<&[T]>, index: usize) -> Option<&T> {
    sequence.and_then(|elements| elements.get(index))
}

/// Whether `seek` equals any element of `list`.
pub fn contains<T: PartialEq>(seek: &T, list: &[T]) -> bool {
    list.iter().any(|element| element == seek)
}

/// The first element of `list` equal to `seek`.
pub fn find_equal<T: PartialEq + Clone>(seek: &T, list: &[T]) -> Option<T> {
    list.iter().find(|element| *element == seek).cloned()
}

pub fn to_single_element_list<T: FieldType>(value: T) -> Vec<Value> {
    vec![value.into_value()]
}
