#![allow(missing_docs)]

use objview::object::{CYCLE_MARKER, FormatOptions, build_graph, parse_document, render, render_with};

#[test]
fn document_graphs_render_end_to_end() {
	let text = r#"{
		"types": [
			{
				"name": "demo.Entity",
				"fields": [
					{ "name": "id", "type": "i32", "access": "protected" }
				]
			},
			{
				"name": "demo.User",
				"base": "demo.Entity",
				"fields": [
					{ "name": "name", "type": "str", "access": "private" },
					{ "name": "VERSION", "type": "str", "access": "public", "modifiers": ["static", "final"] }
				],
				"statics": { "VERSION": { "str": "2.0" } }
			}
		],
		"objects": {
			"u": {
				"class": "demo.User",
				"fields": {
					"id": { "i32": 7 },
					"name": { "str": "ada" }
				}
			}
		},
		"root": { "ref": "u" }
	}"#;

	let document = parse_document(text).expect("parse");
	let (registry, root) = build_graph(&document).expect("build");

	let rendered = render(&registry, &root).expect("render");
	assert_eq!(
		rendered,
		"User:{\n\tUser|bti|str|\"VERSION\"=\"2.0\",\n\tEntity|o|i32|\"id\"=7,\n\tUser|i|str|\"name\"=\"ada\"\n}"
	);
}

#[test]
fn document_cycles_render_the_marker() {
	let text = r#"{
		"types": [
			{
				"name": "demo.Node",
				"fields": [
					{ "name": "next", "type": "demo.Node", "access": "private" }
				]
			}
		],
		"objects": {
			"n": { "class": "demo.Node", "fields": { "next": { "ref": "n" } } }
		},
		"root": { "ref": "n" }
	}"#;

	let document = parse_document(text).expect("parse");
	let (registry, root) = build_graph(&document).expect("build");

	let rendered = render(&registry, &root).expect("render");
	assert_eq!(rendered.matches(CYCLE_MARKER).count(), 1);
}

#[test]
fn document_arrays_and_custom_options_render_together() {
	let text = r#"{
		"types": [],
		"root": { "array": { "of": "i32", "items": [ { "i32": 1 }, "null" ] } }
	}"#;

	let document = parse_document(text).expect("parse");
	let (registry, root) = build_graph(&document).expect("build");

	let options = FormatOptions {
		indent: "  ".into(),
		null_representation: "nil".into(),
		..FormatOptions::default()
	};
	let rendered = render_with(&registry, &root, &options).expect("render");
	assert_eq!(rendered, "i32[]:[\n  i32:{1},\n  nil\n]");
}

#[test]
fn malformed_documents_are_rejected() {
	assert!(parse_document("{").is_err());
	assert!(parse_document(r#"{ "root": { "i32": "not a number" } }"#).is_err());
}
