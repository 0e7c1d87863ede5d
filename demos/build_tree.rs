//! Build a tag tree in code, then query it.
//!
//! Run with: cargo run --example build_tree

use chrono::NaiveDate;
use sdlang::{ChildValue, Tag, TimeSpan, Value};
use std::error::Error;

fn person(namespace: &str, role: &str, name: &str) -> Result<Tag, Box<dyn Error>> {
    let mut tag = Tag::with_namespace(namespace, role)?;
    tag.add_value(name);
    tag.set_attribute_ns("public", "name", name)?;
    Ok(tag)
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut family = Tag::new("family")?;

    let akiko = family.add_child(person("person", "mother", "Akiko")?);
    akiko.set_attribute_ns("public", "birthday", NaiveDate::from_ymd_opt(1976, 4, 18))?;
    akiko.set_attribute_ns("private", "smokes", false)?;
    akiko.add_child(person("person", "son", "Nouhiro")?);
    akiko.add_child(person("person", "daughter", "Sabrina")?);

    let mut pet = Tag::with_namespace("pet", "dog")?;
    pet.add_value("Rex");
    pet.set_attribute("walk", TimeSpan::new(0, 0, 45, 0, 0))?;
    family.add_child(pet);

    let mut grid = Tag::new("grid")?;
    for row in [[1, 2, 3], [4, 5, 6]] {
        grid.add_child(Tag::new("content")?)
            .set_values(row.iter().copied().map(Value::from).collect());
    }
    family.add_child(grid);

    println!("{}", family);

    println!("people:   {}", family.descendants_in_namespace("person").len());
    println!("pets:     {}", family.children_in_namespace("pet").len());

    if let Some(daughter) = family.descendant("daughter") {
        let parent = family.parent_of(daughter).map(Tag::qualified_name);
        println!("daughter: {:?}, parent {:?}", daughter.value(), parent);
    }
    if let Some(mother) = family.child("mother") {
        for (name, value) in mother.attributes_for_namespace("public") {
            println!("public:{} = {}", name, value);
        }
    }

    if let Some(grid) = family.child("grid") {
        for row in grid.children_values("content") {
            match row {
                ChildValue::List(values) => println!("row of {}", values.len()),
                ChildValue::Single(value) => println!("single {}", value),
                ChildValue::Empty => println!("empty row"),
            }
        }
    }

    for node in family.walk() {
        println!("{}{}", "  ".repeat(node.depth), node.tag.qualified_name());
    }

    Ok(())
}
