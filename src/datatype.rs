// used for timestamps
use chrono::{DateTime, Utc};
// used for decimal numbers
use bigdecimal::BigDecimal;
// the zero timestamp is computed once
use lazy_static::lazy_static;

// used when parsing a string to a Decimal
use std::str::FromStr;
// used to print out readable forms of a data type
use std::fmt;
// used to let a Decimal stand in for its BigDecimal
use std::ops;

use crate::date::parse_date;
use crate::value::Value;

pub type Timestamp = DateTime<Utc>;

lazy_static! {
    static ref ZERO_TIME: Timestamp = DateTime::from_timestamp(-62_135_596_800, 0)
        .expect("0001-01-01T00:00:00Z is representable");
}

/// The zero timestamp, `0001-01-01T00:00:00Z`.
pub fn zero_time() -> Timestamp {
    *ZERO_TIME
}

/// Every shape an untyped [`Value`] can take, apart from nil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    Time,
    Decimal,
    Ptr,
    List,
    Map,
    Func,
}

impl Kind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::Isize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::Usize
        )
    }
    pub fn is_float(self) -> bool {
        matches!(self, Kind::F32 | Kind::F64)
    }
    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Str => "String",
            Kind::Time => "Timestamp",
            Kind::Decimal => "Decimal",
            Kind::Ptr => "pointer",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Func => "function",
        }
    }
}
impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// The closed set of types the generic helpers in this crate accept.
///
/// The set is sealed: zero values and comparisons are fixed per type, so
/// downstream crates cannot add members.
pub trait FieldType: sealed::Sealed + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    // static stuff which every member of the set provides
    const UID: u8;
    const DATA_TYPE: &'static str;
    const KIND: Kind;
    fn zero() -> Self;
    fn into_value(self) -> Value;
    /// Direct type assertion, no coercion.
    fn from_value(value: &Value) -> Option<Self>;
    /// Parses the textual form. `layout` only matters to timestamps.
    fn from_text(text: &str, layout: Option<&str>) -> Option<Self>;
    // instance callable with pre-made implementation
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
    fn data_type(&self) -> &'static str {
        Self::DATA_TYPE
    }
    fn identifier(&self) -> u8 {
        Self::UID
    }
}

// ------------- Data Types --------------
macro_rules! numeric_field_type {
    ($($t:ty => $variant:ident, $uid:expr;)*) => {$(
        impl sealed::Sealed for $t {}
        impl FieldType for $t {
            const UID: u8 = $uid;
            const DATA_TYPE: &'static str = stringify!($t);
            const KIND: Kind = Kind::$variant;
            fn zero() -> Self {
                0 as $t
            }
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }
            fn from_text(text: &str, _layout: Option<&str>) -> Option<Self> {
                text.parse::<$t>().ok()
            }
        }
    )*};
}

numeric_field_type! {
    i8 => I8, 1;
    i16 => I16, 2;
    i32 => I32, 3;
    i64 => I64, 4;
    isize => Isize, 5;
    u8 => U8, 6;
    u16 => U16, 7;
    u32 => U32, 8;
    u64 => U64, 9;
    usize => Usize, 10;
    f32 => F32, 11;
    f64 => F64, 12;
}

impl sealed::Sealed for String {}
impl FieldType for String {
    const UID: u8 = 13;
    const DATA_TYPE: &'static str = "String";
    const KIND: Kind = Kind::Str;
    fn zero() -> Self {
        String::new()
    }
    fn into_value(self) -> Value {
        Value::Str(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
    fn from_text(text: &str, _layout: Option<&str>) -> Option<Self> {
        Some(text.to_owned())
    }
}

impl sealed::Sealed for bool {}
impl FieldType for bool {
    const UID: u8 = 14;
    const DATA_TYPE: &'static str = "bool";
    const KIND: Kind = Kind::Bool;
    fn zero() -> Self {
        false
    }
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
    fn from_text(text: &str, _layout: Option<&str>) -> Option<Self> {
        match text {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
            _ => None,
        }
    }
}

impl sealed::Sealed for Timestamp {}
impl FieldType for Timestamp {
    const UID: u8 = 15;
    const DATA_TYPE: &'static str = "Timestamp";
    const KIND: Kind = Kind::Time;
    fn zero() -> Self {
        zero_time()
    }
    fn into_value(self) -> Value {
        Value::Time(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
    fn from_text(text: &str, layout: Option<&str>) -> Option<Self> {
        parse_date(text, layout).ok().map(|(timestamp, _)| timestamp)
    }
}

impl sealed::Sealed for Decimal {}
impl FieldType for Decimal {
    const UID: u8 = 16;
    const DATA_TYPE: &'static str = "Decimal";
    const KIND: Kind = Kind::Decimal;
    fn zero() -> Self {
        Decimal::default()
    }
    fn into_value(self) -> Value {
        Value::Decimal(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Decimal(d) => Some(d.clone()),
            _ => None,
        }
    }
    fn from_text(text: &str, _layout: Option<&str>) -> Option<Self> {
        Decimal::from_str(text)
    }
}

// Special types below
#[derive(Eq, PartialEq, Hash, PartialOrd, Ord, Clone, Debug, Default)]
pub struct Decimal (BigDecimal);

impl Decimal {
    pub fn new(decimal: BigDecimal) -> Self {
        Decimal (decimal)
    }
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Decimal> {
        match BigDecimal::from_str(s) {
            Ok(decimal) => Some(Decimal (decimal)),
            _ => None
        }
    }
    pub fn into_inner(self) -> BigDecimal {
        self.0
    }
}
impl From<BigDecimal> for Decimal {
    fn from(decimal: BigDecimal) -> Self {
        Decimal (decimal)
    }
}
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ops::Deref for Decimal {
    type Target = BigDecimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl ops::DerefMut for Decimal {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_stable() {
        assert_eq!(i64::zero(), 0);
        assert_eq!(String::zero(), "");
        assert!(!bool::zero());
        assert_eq!(Timestamp::zero(), Timestamp::zero());
        assert_eq!(Timestamp::zero().to_rfc3339(), "0001-01-01T00:00:00+00:00");
        assert!(Decimal::zero().is_zero());
        assert!(Decimal::from_str("0.000").unwrap().is_zero(), "scale does not matter for zero");
    }

    #[test]
    fn uids_are_distinct() {
        let mut uids = vec![
            i8::UID, i16::UID, i32::UID, i64::UID, isize::UID, u8::UID, u16::UID, u32::UID,
            u64::UID, usize::UID, f32::UID, f64::UID, String::UID, bool::UID, Timestamp::UID,
            Decimal::UID,
        ];
        uids.sort();
        uids.dedup();
        assert_eq!(uids.len(), 16);
    }

    #[test]
    fn bool_text_forms() {
        assert_eq!(bool::from_text("T", None), Some(true));
        assert_eq!(bool::from_text("0", None), Some(false));
        assert_eq!(bool::from_text("yes", None), None);
    }
}
