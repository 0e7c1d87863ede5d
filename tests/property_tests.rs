//! Property-based tests for the round-trip guarantee.
//!
//! Any tree built from legal names and finite values must survive
//! `to_string` followed by `from_str` unchanged, and writing it twice must
//! give the same text.

use chrono::{FixedOffset, NaiveDate};
use num_bigint::BigInt;
use proptest::prelude::*;
use sdlang::{
    from_str, to_string, to_string_with_options, Decimal, DateTime, Tag, TimeSpan, Value,
    WriteOptions, Zone,
};

const KEYWORDS: &[&str] = &["true", "false", "on", "off", "null"];

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_.$-]{0,8}".prop_filter("keywords are literals", |s| {
        !KEYWORDS.contains(&s.as_str())
    })
}

fn namespace() -> impl Strategy<Value = String> {
    prop_oneof![3 => Just(String::new()), 1 => identifier()]
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (-9999i32..=9999, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn date_time() -> impl Strategy<Value = DateTime> {
    let zone = prop_oneof![
        Just(None),
        Just(Some(("UTC", 0))),
        Just(Some(("JST", 9 * 3600))),
        Just(Some(("GMT-08:00", -8 * 3600))),
        Just(Some(("GMT+0530", 5 * 3600 + 1800))),
    ];
    (1i32..=9999, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60, 0u32..1000, zone)
        .prop_map(|(y, mo, d, h, mi, s, ms, zone)| {
            let local = NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_milli_opt(h, mi, s, ms)
                .unwrap();
            let zone = zone.map(|(id, secs)| Zone::new(id, FixedOffset::east_opt(secs).unwrap()));
            DateTime::new(local, zone)
        })
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        "[a-zA-Z0-9 '\"\\\\\t日]".prop_map(|s| Value::Char(s.chars().next().unwrap())),
        "[a-zA-Z0-9 '\"`\\\\\t\r\n#/*=;{}日本]{0,24}".prop_map(Value::String),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        any::<f32>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float32),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float64),
        (any::<i64>(), 0u32..12)
            .prop_map(|(n, scale)| Value::Decimal(Decimal::new(BigInt::from(n), scale))),
        date().prop_map(Value::Date),
        date_time().prop_map(Value::DateTime),
        (-1_000_000_000_000i64..1_000_000_000_000)
            .prop_map(|ms| Value::TimeSpan(TimeSpan::from_millis(ms))),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Binary),
    ]
}

fn leaf_tag() -> impl Strategy<Value = Tag> {
    (
        namespace(),
        prop_oneof![4 => identifier(), 1 => Just("content".to_string())],
        prop::collection::vec(value(), 0..5),
        prop::collection::vec((namespace(), identifier(), value()), 0..4),
    )
        .prop_map(|(ns, name, values, attributes)| {
            let mut tag = Tag::with_namespace(ns, name).unwrap();
            tag.set_values(values);
            for (ns, name, value) in attributes {
                tag.set_attribute_ns(ns, name, value).unwrap();
            }
            tag
        })
}

fn tag() -> impl Strategy<Value = Tag> {
    leaf_tag().prop_recursive(4, 24, 4, |inner| {
        (leaf_tag(), prop::collection::vec(inner, 0..4)).prop_map(|(mut tag, children)| {
            for child in children {
                tag.add_child(child);
            }
            tag
        })
    })
}

fn document() -> impl Strategy<Value = Tag> {
    prop::collection::vec(tag(), 0..4).prop_map(|children| {
        let mut root = Tag::root();
        for child in children {
            root.add_child(child);
        }
        root
    })
}

proptest! {
    #[test]
    fn prop_value_literal_reads_back(v in value()) {
        let text = format!("v {}", v);
        let doc = from_str(&text).map_err(|e| TestCaseError::fail(format!("{}: {}", e, text)))?;
        prop_assert_eq!(doc.children()[0].values(), &[v]);
    }

    #[test]
    fn prop_document_round_trip(doc in document()) {
        let written = to_string(&doc);
        let reparsed = from_str(&written)
            .map_err(|e| TestCaseError::fail(format!("{}\n---\n{}", e, written)))?;
        prop_assert_eq!(&reparsed, &doc);
        prop_assert_eq!(to_string(&reparsed), written);
    }

    #[test]
    fn prop_layout_does_not_change_meaning(doc in document()) {
        let options = WriteOptions::new()
            .with_tabs()
            .with_line_ending("\r\n")
            .with_anonymous_content(false);
        let written = to_string_with_options(&doc, &options);
        let reparsed = from_str(&written)
            .map_err(|e| TestCaseError::fail(format!("{}\n---\n{}", e, written)))?;
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn prop_time_span_components_share_sign(ms in any::<i64>()) {
        let span = TimeSpan::from_millis(ms);
        let parts = [span.days(), span.hours(), span.minutes(), span.seconds(), span.milliseconds()];
        let same_sign = parts.iter().all(|&p| (ms < 0 && p <= 0) || (ms >= 0 && p >= 0));
        prop_assert!(same_sign, "{:?} from {} ms", parts, ms);
    }
}
