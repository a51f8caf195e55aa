use chrono::{TimeZone, Utc};
use fieldkit::FieldkitError;
use fieldkit::convert::{coerce_any, coerce_from_mapping, is_numeric_string, ternary, to_display_string};
use fieldkit::datatype::{Decimal, Kind, Timestamp};
use fieldkit::value::{Callback, Mapping, Value};
use serde_json::json;

#[test]
fn display_plain_values() {
    assert_eq!(to_display_string(&Value::from("hello")), "hello");
    assert_eq!(to_display_string(&Value::I8(-8)), "-8");
    assert_eq!(to_display_string(&Value::U64(u64::MAX)), "18446744073709551615");
    assert_eq!(to_display_string(&Value::F64(1.5)), "1.500000");
    assert_eq!(to_display_string(&Value::F32(0.1)), "0.100000");
    assert_eq!(to_display_string(&Value::Bool(true)), "true");
    assert_eq!(to_display_string(&Value::Bool(false)), "false");
    let moment = Utc.with_ymd_and_hms(2024, 3, 5, 13, 45, 0).unwrap();
    assert_eq!(to_display_string(&Value::Time(moment)), "'2024-03-05T13:45:00Z'");
}

#[test]
fn display_special_floats() {
    assert_eq!(to_display_string(&Value::F64(f64::NAN)), "NaN");
    assert_eq!(to_display_string(&Value::F64(f64::INFINITY)), "+Inf");
    assert_eq!(to_display_string(&Value::F32(f32::NEG_INFINITY)), "-Inf");
}

#[test]
fn display_null_pointers_as_defaults() {
    assert_eq!(to_display_string(&Value::null_ptr(Kind::Str)), "");
    assert_eq!(to_display_string(&Value::null_ptr(Kind::I32)), "0");
    assert_eq!(to_display_string(&Value::null_ptr(Kind::F64)), "0");
    assert_eq!(to_display_string(&Value::null_ptr(Kind::Bool)), "false");
    assert_eq!(to_display_string(&Value::null_ptr(Kind::Time)), "'0001-01-01T00:00:00Z'");
    assert_eq!(to_display_string(&Value::from(None::<Timestamp>)), "'0001-01-01T00:00:00Z'");
}

#[test]
fn display_through_pointers() {
    assert_eq!(to_display_string(&Value::ptr(42u16)), "42");
    assert_eq!(to_display_string(&Value::from(Some(true))), "true");
    assert_eq!(to_display_string(&Value::from(Some(String::from("x")))), "x");
}

#[test]
fn display_unrecognized_is_empty() {
    assert_eq!(to_display_string(&Value::Nil), "");
    assert_eq!(to_display_string(&Value::from(vec![Value::I64(1)])), "");
    assert_eq!(to_display_string(&Value::Map(None)), "");
    assert_eq!(to_display_string(&Value::from(Decimal::from_str("1.5").unwrap())), "");
    assert_eq!(to_display_string(&Value::ptr(Value::ptr(1i64))), "", "only one indirection is followed");
}

#[test]
fn display_is_idempotent() {
    let inputs = [Value::F64(2.25), Value::null_ptr(Kind::Time), Value::from("abc"), Value::Bool(true)];
    for input in &inputs {
        assert_eq!(to_display_string(input), to_display_string(input));
    }
}

#[test]
fn ternary_on_truthiness() {
    assert_eq!(ternary(&Value::Nil, "yes", "no"), "no");
    assert_eq!(ternary(&Value::from(""), "yes", "no"), "no");
    assert_eq!(ternary(&Value::from("x"), "yes", "no"), "yes");
    assert_eq!(ternary(&Value::I64(0), 1, 2), 2);
    assert_eq!(ternary(&Value::F64(-0.0), 1, 2), 2);
    assert_eq!(ternary(&Value::U8(3), 1, 2), 1);
    assert_eq!(ternary(&Value::Bool(false), 1, 2), 2);
    assert_eq!(ternary(&Value::from(Some(false)), 1, 2), 2);
    assert_eq!(ternary(&Value::from(None::<bool>), 1, 2), 2, "a null pointer never panics");
    assert_eq!(ternary(&Value::from(Some(0i32)), 1, 2), 2);
    assert_eq!(ternary(&Value::from(Some(String::new())), 1, 2), 2);
    assert_eq!(ternary(&Value::from(Some(7i32)), 1, 2), 1);
    assert_eq!(ternary(&Value::Time(Timestamp::default()), 1, 2), 1, "timestamps are always truthy");
    assert_eq!(ternary(&Value::from(Vec::<Value>::new()), 1, 2), 1, "an empty list is still present");
}

#[test]
fn ternary_treats_decimals_as_numbers() {
    assert_eq!(ternary(&Value::from(Decimal::from_str("0.00").unwrap()), 1, 2), 2);
    assert_eq!(ternary(&Value::from(Decimal::from_str("0.01").unwrap()), 1, 2), 1);
}

#[test]
fn numeric_strings() {
    assert_eq!(is_numeric_string(""), Err(FieldkitError::Empty));
    assert!(matches!(is_numeric_string("abc"), Err(FieldkitError::NotANumber(_))));
    assert!(is_numeric_string("42").is_ok());
    assert!(is_numeric_string("-2.5").is_ok());
    assert!(is_numeric_string("1.5e3").is_ok());
    assert_eq!(format!("{}", is_numeric_string("").unwrap_err()), "is empty");
}

fn sample_mapping() -> Mapping {
    let mut mapping = Mapping::new();
    mapping.insert("count".into(), Value::I64(3));
    mapping.insert("name".into(), Value::from("Ada"));
    mapping.insert("born".into(), Value::from("1815-12-10"));
    mapping.insert("died".into(), Value::from("27/11/1852"));
    mapping.insert("price".into(), Value::from("19.99"));
    mapping.insert("broken".into(), Value::from("not a value"));
    mapping
}

#[test]
fn mapping_direct_match() {
    let mapping = sample_mapping();
    assert_eq!(coerce_from_mapping::<i64, _>(Some(&mapping), "count", &[]), Some(3));
    assert_eq!(coerce_from_mapping::<String, _>(Some(&mapping), "name", &[]), Some("Ada".to_owned()));
}

#[test]
fn mapping_misses_give_none() {
    let mapping = sample_mapping();
    assert_eq!(coerce_from_mapping::<i64, _>(None::<&Mapping>, "count", &[]), None);
    assert_eq!(coerce_from_mapping::<i64, _>(Some(&mapping), "missing", &[]), None);
    assert_eq!(coerce_from_mapping::<i32, _>(Some(&mapping), "count", &[]), None, "no widening");
    assert_eq!(coerce_from_mapping::<i64, _>(Some(&mapping), "name", &[]), None, "no parsing for numbers");
}

#[test]
fn mapping_parses_timestamps() {
    let mapping = sample_mapping();
    let born: Option<Timestamp> = coerce_from_mapping(Some(&mapping), "born", &[]);
    assert_eq!(born, Some(Utc.with_ymd_and_hms(1815, 12, 10, 0, 0, 0).unwrap()));

    let died: Option<Timestamp> = coerce_from_mapping(Some(&mapping), "died", &["02/01/2006"]);
    assert_eq!(died, Some(Utc.with_ymd_and_hms(1852, 11, 27, 0, 0, 0).unwrap()));

    let wrong: Option<Timestamp> = coerce_from_mapping(Some(&mapping), "born", &["02/01/2006"]);
    assert_eq!(wrong, None, "explicit layout does not fall back to the others");

    let unsupported: Option<Timestamp> = coerce_from_mapping(Some(&mapping), "born", &["2006"]);
    assert_eq!(unsupported, None);

    let broken: Option<Timestamp> = coerce_from_mapping(Some(&mapping), "broken", &[]);
    assert_eq!(broken, None);
}

#[test]
fn mapping_parses_decimals() {
    let mapping = sample_mapping();
    let price: Option<Decimal> = coerce_from_mapping(Some(&mapping), "price", &[]);
    assert_eq!(price, Decimal::from_str("19.99"));
    let broken: Option<Decimal> = coerce_from_mapping(Some(&mapping), "broken", &[]);
    assert_eq!(broken, None);
    let count: Option<Decimal> = coerce_from_mapping(Some(&mapping), "count", &[]);
    assert_eq!(count, None, "only strings are parsed");
}

#[test]
fn mapping_from_json_document() {
    let document = json!({ "count": 3, "ratio": 0.5, "when": "2020-01-31", "tags": ["a"], "gone": null });
    let mapping = Value::from(document).into_mapping().expect("object becomes a mapping");
    assert_eq!(coerce_from_mapping::<i64, _>(Some(&mapping), "count", &[]), Some(3));
    assert_eq!(coerce_from_mapping::<f64, _>(Some(&mapping), "ratio", &[]), Some(0.5));
    let when: Option<Timestamp> = coerce_from_mapping(Some(&mapping), "when", &[]);
    assert_eq!(when, Some(Utc.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).unwrap()));
    assert!(mapping["gone"].is_nil());
    assert_eq!(mapping["tags"], Value::from(vec![Value::from("a")]));
}

#[test]
fn coerce_any_best_effort() {
    assert_eq!(coerce_any::<i64>(&Value::from("1")), 1);
    assert_eq!(coerce_any::<i64>(&Value::I32(5)), 5);
    assert_eq!(coerce_any::<f64>(&Value::ptr("2.5")), 2.5);
    assert_eq!(coerce_any::<String>(&Value::U8(7)), "7");
    assert!(coerce_any::<bool>(&Value::from("true")));
    assert_eq!(coerce_any::<i64>(&Value::from("abc")), 0);
    assert_eq!(coerce_any::<i64>(&Value::Nil), 0);
    assert_eq!(coerce_any::<i64>(&Value::F64(1.5)), 0, "fractions do not truncate");
    let when: Timestamp = coerce_any(&Value::from("2024-03-05"));
    assert_eq!(when, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
}

#[test]
fn callbacks_are_opaque() {
    let double = Callback::new(|args| match args.first() {
        Some(Value::I64(v)) => Value::I64(v * 2),
        _ => Value::Nil,
    });
    assert_eq!(double.call(&[Value::I64(21)]), Value::I64(42));
    let handle = Value::from(double.clone());
    assert_eq!(handle, Value::Func(Some(double)));
    assert_eq!(to_display_string(&handle), "");
    assert_eq!(ternary(&handle, 1, 2), 1);
}
