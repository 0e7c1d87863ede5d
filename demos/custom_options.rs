//! Customizing how SDL is read and written.
//!
//! Run with: cargo run --example custom_options

use chrono::FixedOffset;
use sdlang::{
    from_str, from_str_with_options, to_string, to_string_with_options, Error, ParseOptions,
    StandardZones, WriteOptions, ZoneResolver,
};

/// Knows one extra zone and defers everything else to the built-in table.
#[derive(Debug)]
struct WithMars;

impl ZoneResolver for WithMars {
    fn resolve(&self, id: &str) -> Option<FixedOffset> {
        if id == "MARS" {
            return FixedOffset::east_opt(2 * 3600 + 39 * 60);
        }
        StandardZones.resolve(id)
    }
}

const DOCUMENT: &str = r#"
mission "Ares" {
    launch 2030/07/01 06:00-UTC
    landing 2031/02/14 18:30-MARS
    crew {
        "Ada" role="pilot"
        "Lin" role="geologist"
    }
}
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The built-in resolver rejects unknown zones instead of guessing
    match from_str(DOCUMENT) {
        Err(Error::UnknownTimeZone { zone, line, .. }) => {
            println!("default resolver: unknown zone {} on line {}", zone, line)
        }
        other => println!("unexpected: {:?}", other.map(|doc| doc.children().len())),
    }

    let options = ParseOptions::new()
        .with_zone_resolver(WithMars)
        .with_root_name("missions")
        .with_max_depth(8);
    let doc = from_str_with_options(DOCUMENT, &options)?;
    println!("root tag: {}\n", doc.name());

    println!("Default (4 spaces):");
    println!("{}", to_string(&doc));

    println!("Tabs, named anonymous tags:");
    let verbose = WriteOptions::new().with_tabs().with_anonymous_content(false);
    println!("{}", to_string_with_options(&doc, &verbose));

    println!("Compact, CRLF:");
    let compact = WriteOptions::compact().with_line_ending("\r\n");
    let text = to_string_with_options(&doc, &compact);
    println!("{:?}", text);

    // Layout never changes meaning
    assert_eq!(from_str_with_options(&text, &options)?, doc);
    println!("\n✓ Same tree from every layout");

    Ok(())
}
