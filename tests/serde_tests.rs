//! Exporting parsed trees through serde.

use sdlang::{from_str, Value};
use serde_json::json;

#[test]
fn test_tag_to_json() {
    let doc = from_str(
        "person:daughter \"Akiko\" 12 public:name=\"Akiko\" smoker=false {\n    pet \"Rex\"\n}",
    )
    .unwrap();
    let daughter = &doc.children()[0];

    let json = serde_json::to_value(daughter).unwrap();
    assert_eq!(
        json,
        json!({
            "namespace": "person",
            "name": "daughter",
            "values": ["Akiko", 12],
            "attributes": {
                "smoker": false,
                "public:name": "Akiko"
            },
            "children": [{
                "namespace": "",
                "name": "pet",
                "values": ["Rex"],
                "attributes": {},
                "children": []
            }]
        })
    );
}

#[test]
fn test_typed_values_to_json() {
    let doc = from_str(
        "v null 'c' 5L 1.5F 2.25 10.50BD 2005/12/31 2005/12/31 12:30-UTC 1d:02:00:00 [aGk=]",
    )
    .unwrap();
    let values = doc.children()[0].values();

    let json = serde_json::to_value(values).unwrap();
    assert_eq!(
        json,
        json!([
            null,
            "c",
            5,
            1.5,
            2.25,
            "10.50",
            "2005/12/31",
            "2005/12/31 12:30:00-UTC",
            "1d:02:00:00",
            [104, 105]
        ])
    );
}

#[test]
fn test_attribute_order_in_json_is_canonical() {
    let doc = from_str("t z=1 b:a=2 a=3").unwrap();
    let text = serde_json::to_string(&doc.children()[0]).unwrap();
    let a = text.find("\"a\":").unwrap();
    let z = text.find("\"z\":").unwrap();
    let ba = text.find("\"b:a\":").unwrap();
    assert!(a < z && z < ba, "{}", text);
}

#[test]
fn test_value_to_json() {
    assert_eq!(serde_json::to_value(Value::from("x")).unwrap(), json!("x"));
    assert_eq!(serde_json::to_value(Value::Int64(7)).unwrap(), json!(7));
    assert_eq!(serde_json::to_value(Value::Bool(true)).unwrap(), json!(true));
}
