//! Parse a document with back-references and walk the resulting graph.

use refjson::{ParseOptions, parse, parse_with_options};

fn main() {
    let input = r##"{
    "name": "root",
    "id": 12345678901234567890,
    "children": [
        {"name": "left", "parent": {"$ref": "#"}},
        {"name": "right", "parent": {"$ref": "#"}}
    ]
}"##;

    let root = parse(input).expect("parse failed");

    let id = root.get("id").expect("id");
    println!("Id (lossless): {}", id.as_number().expect("number"));

    let children = root.get("children").expect("children");
    let list = children.as_array().expect("array").borrow();
    for child in list.iter() {
        let name = child.get("name").expect("name");
        let parent = child.get("parent").expect("parent");
        println!(
            "  {}: parent is root = {}",
            name.as_str().unwrap_or_default(),
            parent.same_container(&root)
        );
    }

    drop(list);

    println!("\nDebug view:\n{root:#?}");
    root.unlink();

    let raw = ParseOptions::new().with_circular_refs(false);
    let markers = parse_with_options(input, &raw).expect("parse failed");
    println!("\nWith markers kept:\n{markers:#?}");
}
