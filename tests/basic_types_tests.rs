//! Every literal form in `fixtures/basic_types.sdl`, checked value by value.

use chrono::{FixedOffset, NaiveDate};
use sdlang::{from_str, to_string, DateTime, Tag, TimeSpan, Value, ValueKind, Zone};

const BASIC_TYPES: &str = include_str!("fixtures/basic_types.sdl");

fn document() -> Tag {
    from_str(BASIC_TYPES).expect("basic_types.sdl should parse")
}

fn value<'a>(doc: &'a Tag, name: &str) -> &'a Value {
    doc.child(name)
        .and_then(Tag::value)
        .unwrap_or_else(|| panic!("tag `{}` should have a value", name))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime {
    DateTime::local(date(y, mo, d).and_hms_milli_opt(h, mi, s, ms).unwrap())
}

fn zoned(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32, id: &str, hours: i32) -> DateTime {
    let offset = FixedOffset::east_opt(hours * 3600).unwrap();
    DateTime::new(
        date(y, mo, d).and_hms_milli_opt(h, mi, s, ms).unwrap(),
        Some(Zone::new(id, offset)),
    )
}

#[test]
fn test_strings() {
    let doc = document();
    let cases = [
        ("string1", "hello"),
        ("string2", "hi"),
        ("string3", "aloha"),
        ("string4", "hi there"),
        ("string5", "hi there joe"),
        ("string6", "line1\nline2"),
        ("string7", "line1\nline2"),
        ("string8", "line1\nline2\nline3"),
        (
            "string9",
            "Anything should go in this line without escapes \\ \\\\ \\n \\t \" \"\" ' ''",
        ),
        ("string10", "escapes \"\\\n\t"),
        ("japanese", "日本語"),
        ("korean", "여보세요"),
        ("russian", "здравствулте"),
        ("line_test", "\nnew line above and below\n"),
    ];
    for (name, expected) in cases {
        assert_eq!(value(&doc, name).as_str(), Some(expected), "tag `{}`", name);
    }
    assert!(value(&doc, "xml")
        .as_str()
        .unwrap()
        .contains("<text>Hi there!</text>"));
}

#[test]
fn test_characters() {
    let doc = document();
    let expected = ['a', 'A', '\\', '\n', '\t', '\'', '"', '日', '여', 'з'];
    for (i, c) in expected.iter().enumerate() {
        let name = format!("char{}", i + 1);
        assert_eq!(value(&doc, &name), &Value::Char(*c), "tag `{}`", name);
    }
}

#[test]
fn test_integers() {
    let doc = document();
    assert_eq!(value(&doc, "int1"), &Value::Int32(0));
    assert_eq!(value(&doc, "int2"), &Value::Int32(5));
    assert_eq!(value(&doc, "int3"), &Value::Int32(-100));
    assert_eq!(value(&doc, "int4"), &Value::Int32(234_253_532));
    assert_eq!(value(&doc, "long1"), &Value::Int64(0));
    assert_eq!(value(&doc, "long2"), &Value::Int64(5));
    assert_eq!(value(&doc, "long3"), &Value::Int64(5));
    assert_eq!(value(&doc, "long4"), &Value::Int64(3_904_857_398_753_453_453));
}

#[test]
fn test_floats_and_decimals() {
    let doc = document();
    assert_eq!(value(&doc, "float1"), &Value::Float32(1.0));
    assert_eq!(value(&doc, "float2"), &Value::Float32(0.23));
    assert_eq!(value(&doc, "float3"), &Value::Float32(-0.34));
    assert_eq!(value(&doc, "double1"), &Value::Float64(2.0));
    assert_eq!(value(&doc, "double2"), &Value::Float64(-0.234));
    assert_eq!(value(&doc, "double3"), &Value::Float64(2.34));

    let decimals = [
        ("decimal1", "0"),
        ("decimal2", "11.111111"),
        ("decimal3", "234535.3453453453454345345341242343"),
    ];
    for (name, digits) in decimals {
        let decimal = value(&doc, name).as_decimal().expect("a decimal");
        assert_eq!(decimal.to_string(), digits);
    }
}

#[test]
fn test_booleans_and_null() {
    let doc = document();
    assert_eq!(value(&doc, "light-on"), &Value::Bool(true));
    assert_eq!(value(&doc, "light-off"), &Value::Bool(false));
    assert_eq!(value(&doc, "light1"), &Value::Bool(true));
    assert_eq!(value(&doc, "light2"), &Value::Bool(false));
    assert!(value(&doc, "nothing").is_null());
}

#[test]
fn test_dates() {
    let doc = document();
    assert_eq!(value(&doc, "date1"), &Value::Date(date(2005, 12, 31)));
    assert_eq!(value(&doc, "date2"), &Value::Date(date(1882, 5, 2)));
    assert_eq!(value(&doc, "date3"), &Value::Date(date(1882, 5, 2)));
    assert_eq!(value(&doc, "_way_back"), &Value::Date(date(582, 9, 16)));
}

#[test]
fn test_time_spans() {
    let doc = document();
    let cases = [
        ("time1", TimeSpan::new(0, 12, 30, 0, 0)),
        ("time2", TimeSpan::new(0, 24, 0, 0, 0)),
        ("time3", TimeSpan::new(0, 1, 0, 0, 0)),
        ("time4", TimeSpan::new(0, 1, 0, 0, 0)),
        ("time5", TimeSpan::new(0, 12, 30, 2, 0)),
        ("time6", TimeSpan::new(0, 12, 30, 23, 0)),
        ("time7", TimeSpan::new(0, 0, 0, 0, 100)),
        ("time8", TimeSpan::new(0, 0, 0, 0, 120)),
        ("time9", TimeSpan::new(0, 0, 0, 0, 123)),
        ("time10", TimeSpan::new(34, 12, 30, 23, 100)),
        ("time11", TimeSpan::new(1, 12, 30, 0, 0)),
        ("time12", TimeSpan::new(5, 12, 30, 23, 123)),
        ("time13", TimeSpan::new(0, -12, -30, -23, -123)),
        ("time14", TimeSpan::new(-5, -12, -30, -23, -123)),
    ];
    for (name, expected) in cases {
        assert_eq!(value(&doc, name), &Value::TimeSpan(expected), "tag `{}`", name);
    }

    let time14 = value(&doc, "time14").as_time_span().unwrap();
    assert_eq!(
        (
            time14.days(),
            time14.hours(),
            time14.minutes(),
            time14.seconds(),
            time14.milliseconds()
        ),
        (-5, -12, -30, -23, -123)
    );
}

#[test]
fn test_date_times() {
    let doc = document();
    let cases = [
        ("date_time1", local(2005, 12, 31, 12, 30, 0, 0)),
        ("date_time2", local(1882, 5, 2, 12, 30, 0, 0)),
        ("date_time3", local(2005, 12, 31, 1, 0, 0, 0)),
        ("date_time4", local(1882, 5, 2, 1, 0, 0, 0)),
        ("date_time5", local(2005, 12, 31, 12, 30, 23, 120)),
        ("date_time6", local(1882, 5, 2, 12, 30, 23, 123)),
        ("date_time7", zoned(1882, 5, 2, 12, 30, 23, 123, "JST", 9)),
        ("date_time8", zoned(985, 4, 11, 12, 30, 23, 123, "PST", -8)),
    ];
    for (name, expected) in cases {
        assert_eq!(value(&doc, name), &Value::DateTime(expected), "tag `{}`", name);
    }

    let jst = value(&doc, "date_time7").as_date_time().unwrap();
    assert_eq!(jst.zone().map(Zone::id), Some("JST"));
    assert_eq!(jst.millisecond(), 123);
}

#[test]
fn test_binaries() {
    let doc = document();
    assert_eq!(value(&doc, "hi").as_bytes(), Some(&b"hi"[..]));
    let png = value(&doc, "png").as_bytes().unwrap();
    assert_eq!(png.len(), 70);
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_every_kind_is_present() {
    let doc = document();
    let mut kinds: Vec<ValueKind> = doc
        .children()
        .iter()
        .filter_map(|t| t.value().map(Value::kind))
        .collect();
    kinds.sort_by_key(|k| k.to_string());
    kinds.dedup();
    assert_eq!(kinds.len(), 13);
}

#[test]
fn test_round_trip() {
    let doc = document();
    let written = to_string(&doc);
    let reparsed = from_str(&written).unwrap_or_else(|e| panic!("{}\n---\n{}", e, written));
    assert_eq!(reparsed, doc);
    assert_eq!(to_string(&reparsed), written);
}

#[test]
fn test_zones_without_a_standard_id_round_trip() {
    let mut root = Tag::new("root").unwrap();
    let cases = [
        ("mislabelled", zoned(2005, 12, 31, 12, 30, 0, 0, "JST", 0)),
        ("paris", zoned(2005, 12, 31, 12, 30, 0, 0, "Europe/Paris", 1)),
        ("tokyo", zoned(2005, 12, 31, 12, 30, 0, 0, "JST", 9)),
    ];
    for (name, dt) in &cases {
        let mut child = Tag::new(*name).unwrap();
        child.add_value(Value::DateTime(dt.clone()));
        root.add_child(child);
    }

    let written = to_string(&root);
    assert!(written.contains("mislabelled 2005/12/31 12:30:00-GMT+00:00"), "{}", written);
    assert!(written.contains("paris 2005/12/31 12:30:00-GMT+01:00"), "{}", written);
    assert!(written.contains("tokyo 2005/12/31 12:30:00-JST"), "{}", written);

    let reparsed = from_str(&written).unwrap_or_else(|e| panic!("{}\n---\n{}", e, written));
    assert_eq!(reparsed, root);
    for (name, dt) in &cases {
        let read = value(&reparsed, name).as_date_time().unwrap();
        assert_eq!(read.instant(), dt.instant(), "tag `{}`", name);
    }
}

#[test]
fn test_date_followed_by_span_with_days() {
    let doc = from_str("a 2005/12/31 5:12:30:00").unwrap();
    let a = doc.child("a").unwrap();
    assert_eq!(
        a.values(),
        &[
            Value::Date(date(2005, 12, 31)),
            Value::TimeSpan(TimeSpan::new(5, 12, 30, 0, 0)),
        ]
    );
}
