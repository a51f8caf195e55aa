//! Fieldkit – conversions, nullability helpers, date parsing and guarded map
//! access for application code working with loosely typed field values.
//!
//! Fieldkit centers on a *closed set of field types*: integers of every
//! width, floats, strings, booleans, timestamps and arbitrary precision
//! decimals. Each of them implements the sealed [`datatype::FieldType`]
//! trait, which fixes its zero value (the "empty" sentinel and the fallback
//! for anything absent) along with a stable identifier and name.
//!
//! ## Modules
//! * [`datatype`] – The [`datatype::FieldType`] trait, [`datatype::Kind`],
//!   [`datatype::Decimal`] and [`datatype::Timestamp`].
//! * [`value`] – The untyped [`value::Value`], covering plain values, typed
//!   pointers that may be null, and list/map/function handles.
//! * [`optional`] – Helpers over `Option<T>`: making, unwrapping, emptiness,
//!   comparison, defaults, element access and membership.
//! * [`convert`] – Rendering values as text, truthiness, numeric checks and
//!   coercion of untyped values (optionally out of a mapping).
//! * [`date`] – Parsing dates against twenty fixed layouts.
//! * [`guarded`] – A mapping guarded by a lock that is only ever tried.
//! * [`series`] – Zero-padded series codes.
//! * [`settings`] – Settings read from a file and the environment.
//!
//! ## Nulls and zeros
//! Coercion and guarded access never fail loudly. A `None` or a zero value
//! coming back from them may mean the value was absent, had the wrong type,
//! or (for guarded access) that the guard was busy. Parsing functions on the
//! other hand report failures as [`FieldkitError`].
//!
//! ## Quick Start
//! ```
//! use fieldkit::convert::{coerce_from_mapping, to_display_string};
//! use fieldkit::datatype::Timestamp;
//! use fieldkit::value::{Mapping, Value};
//!
//! let mut mapping = Mapping::new();
//! mapping.insert("born".to_owned(), Value::from("1815-12-10"));
//! let born: Option<Timestamp> = coerce_from_mapping(Some(&mapping), "born", &[]);
//! assert_eq!(to_display_string(&Value::from(born)), "'1815-12-10T00:00:00Z'");
//! ```

pub mod convert;
pub mod datatype;
pub mod date;
pub mod error;
pub mod guarded;
pub mod optional;
pub mod series;
pub mod settings;
pub mod value;

pub use error::{FieldkitError, Result};
