//! Parse an SDL document and read typed values back.
//!
//! Run with: cargo run --example simple

use sdlang::{from_str, to_string, Tag, Value};
use std::error::Error;

const CONFIG: &str = r#"
// server settings
server "alpha" port=8080 secure=on {
    started 2024/03/01 09:15:00-UTC
    timeout 00:00:30
    banner """
Welcome!
Authorized users only.
"""
}

users {
    user "alice" admin=true
    user "bob" quota=5000000000
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = from_str(CONFIG)?;

    let server = doc.child("server").ok_or("no server tag")?;
    println!("server name: {}", server.value().and_then(Value::as_str).unwrap_or("?"));
    println!("port:        {:?}", server.attribute("port").and_then(Value::as_i32));
    println!("secure:      {:?}", server.attribute("secure").and_then(Value::as_bool));

    if let Some(started) = server.child("started").and_then(Tag::value) {
        println!("started:     {} ({})", started, started.kind());
    }
    if let Some(timeout) = server.child("timeout").and_then(|t| t.value()?.as_time_span()) {
        println!("timeout:     {} s", timeout.to_duration().num_seconds());
    }

    for user in doc.descendants_named("user") {
        println!(
            "user {:<6} attributes: {}",
            user.value().map(ToString::to_string).unwrap_or_default(),
            user.attributes().len()
        );
    }

    // Writing it back gives canonical text that parses to the same tree
    let text = to_string(&doc);
    println!("\nCanonical form:\n{}", text);
    assert_eq!(from_str(&text)?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}
