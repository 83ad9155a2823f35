use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::object::schema::{AccessModifier, FieldDecl, FieldModifiers, Registry, TypeId};
use crate::object::value::{ArrayValue, Object, ObjectRef, Value};
use crate::object::{ObjectError, Result};

/// Parsed graph document: a schema plus an object graph and a root value.
///
/// Types must be declared bases-first; objects are declared flat and wired by
/// id so documents can express reference cycles.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
	/// Type declarations in registration order.
	#[serde(default)]
	pub types: Vec<TypeDoc>,
	/// Object declarations keyed by document-local id.
	#[serde(default)]
	pub objects: BTreeMap<String, ObjectDoc>,
	/// The value handed to the renderer.
	pub root: ValueDoc,
}

/// One type declaration in a graph document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDoc {
	/// Full dotted type name.
	pub name: String,
	/// Declare an interface instead of a class.
	#[serde(default)]
	pub interface: bool,
	/// Base class name; must be declared earlier in the document.
	#[serde(default)]
	pub base: Option<String>,
	/// Implemented interface names; must be declared earlier.
	#[serde(default)]
	pub implements: Vec<String>,
	/// Fields declared directly on this type.
	#[serde(default)]
	pub fields: Vec<FieldDoc>,
	/// Values for static fields, keyed by field name.
	#[serde(default)]
	pub statics: BTreeMap<String, ValueDoc>,
}

/// One field declaration in a graph document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDoc {
	/// Field name.
	pub name: String,
	/// Declared type name.
	#[serde(rename = "type")]
	pub type_name: String,
	/// Access level; package access when omitted.
	#[serde(default)]
	pub access: AccessDoc,
	/// Applied non-access modifiers.
	#[serde(default)]
	pub modifiers: Vec<ModifierDoc>,
}

/// Access level spelling in graph documents.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessDoc {
	/// Private access.
	Private,
	/// Package access. The default when omitted.
	#[default]
	Package,
	/// Protected access.
	Protected,
	/// Public access.
	Public,
}

/// Non-access modifier spelling in graph documents.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ModifierDoc {
	/// Static field.
	Static,
	/// Final field.
	Final,
	/// Volatile field.
	Volatile,
	/// Transient field.
	Transient,
	/// Strict floating-point field.
	Strict,
}

/// One object declaration in a graph document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDoc {
	/// Class name the object is an instance of.
	pub class: String,
	/// Instance field values keyed by field name.
	#[serde(default)]
	pub fields: BTreeMap<String, ValueDoc>,
}

/// One value in a graph document, externally tagged by kind.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueDoc {
	/// Absent reference.
	Null,
	/// Boolean literal.
	Bool(bool),
	/// 8-bit integer literal.
	I8(i8),
	/// 16-bit integer literal.
	I16(i16),
	/// 32-bit integer literal.
	I32(i32),
	/// 64-bit integer literal.
	I64(i64),
	/// 32-bit float literal.
	F32(f32),
	/// 64-bit float literal.
	F64(f64),
	/// Character literal.
	Char(char),
	/// String literal.
	Str(String),
	/// Typed array of nested values.
	Array(ArrayDoc),
	/// Reference to an object declared in the document.
	Ref(String),
}

/// Array payload in a graph document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayDoc {
	/// Element type name.
	pub of: String,
	/// Elements in index order.
	#[serde(default)]
	pub items: Vec<ValueDoc>,
}

/// Parse a graph document from JSON text.
pub fn parse_document(text: &str) -> Result<Document> {
	Ok(serde_json::from_str(text)?)
}

/// Read and build a graph document from a file.
pub fn load_graph(path: &Path) -> Result<(Registry, Value)> {
	let text = std::fs::read_to_string(path)?;
	let document = parse_document(&text)?;
	build_graph(&document)
}

/// Build the registry and root value described by a parsed document.
///
/// Objects are created empty first and filled second, so `ref` values may
/// point forward, backward, or at an ancestor to form cycles.
pub fn build_graph(document: &Document) -> Result<(Registry, Value)> {
	let mut registry = Registry::new();
	let mut type_ids: HashMap<&str, TypeId> = HashMap::new();

	for type_doc in &document.types {
		let id = register_type(&mut registry, type_doc)?;
		type_ids.insert(type_doc.name.as_str(), id);
	}

	let mut objects: HashMap<&str, ObjectRef> = HashMap::new();
	for (object_id, object_doc) in &document.objects {
		let class = registry.lookup(&object_doc.class)?;
		objects.insert(object_id.as_str(), Object::new(&registry, class)?);
	}

	for (object_id, object_doc) in &document.objects {
		let object = &objects[object_id.as_str()];
		for (field, value_doc) in &object_doc.fields {
			object.set(field, build_value(value_doc, &objects)?);
		}
	}

	for type_doc in &document.types {
		let class = type_ids[type_doc.name.as_str()];
		for (field, value_doc) in &type_doc.statics {
			let value = build_value(value_doc, &objects)?;
			registry.set_static(class, field, value)?;
		}
	}

	let root = build_value(&document.root, &objects)?;
	Ok((registry, root))
}

fn register_type(registry: &mut Registry, type_doc: &TypeDoc) -> Result<TypeId> {
	if type_doc.interface {
		if type_doc.base.is_some() || !type_doc.fields.is_empty() || !type_doc.implements.is_empty() || !type_doc.statics.is_empty() {
			return Err(ObjectError::InvalidDocument {
				reason: format!("interface {} declares a base, fields, implements, or statics", type_doc.name),
			});
		}
		return registry.register_interface(&type_doc.name);
	}

	let base = type_doc.base.as_deref().map(|name| registry.lookup(name)).transpose()?;
	let mut implements = Vec::with_capacity(type_doc.implements.len());
	for name in &type_doc.implements {
		implements.push(registry.lookup(name)?);
	}

	let fields = type_doc.fields.iter().map(build_field).collect();
	registry.register_class(&type_doc.name, base, &implements, fields)
}

fn build_field(field_doc: &FieldDoc) -> FieldDecl {
	let mut modifiers = FieldModifiers::default();
	for modifier in &field_doc.modifiers {
		match modifier {
			ModifierDoc::Static => modifiers.is_static = true,
			ModifierDoc::Final => modifiers.is_final = true,
			ModifierDoc::Volatile => modifiers.is_volatile = true,
			ModifierDoc::Transient => modifiers.is_transient = true,
			ModifierDoc::Strict => modifiers.is_strict = true,
		}
	}

	let access = match field_doc.access {
		AccessDoc::Private => AccessModifier::Private,
		AccessDoc::Package => AccessModifier::Package,
		AccessDoc::Protected => AccessModifier::Protected,
		AccessDoc::Public => AccessModifier::Public,
	};

	FieldDecl {
		name: field_doc.name.as_str().into(),
		type_name: field_doc.type_name.as_str().into(),
		access,
		modifiers,
	}
}

fn build_value(value_doc: &ValueDoc, objects: &HashMap<&str, ObjectRef>) -> Result<Value> {
	Ok(match value_doc {
		ValueDoc::Null => Value::Null,
		ValueDoc::Bool(item) => Value::Bool(*item),
		ValueDoc::I8(item) => Value::I8(*item),
		ValueDoc::I16(item) => Value::I16(*item),
		ValueDoc::I32(item) => Value::I32(*item),
		ValueDoc::I64(item) => Value::I64(*item),
		ValueDoc::F32(item) => Value::F32(*item),
		ValueDoc::F64(item) => Value::F64(*item),
		ValueDoc::Char(item) => Value::Char(*item),
		ValueDoc::Str(item) => Value::Str(item.as_str().into()),
		ValueDoc::Array(array) => {
			let mut items = Vec::with_capacity(array.items.len());
			for item in &array.items {
				items.push(build_value(item, objects)?);
			}
			Value::Array(ArrayValue {
				element_type: array.of.as_str().into(),
				items,
			})
		}
		ValueDoc::Ref(object_id) => {
			let object = objects.get(object_id.as_str()).ok_or_else(|| ObjectError::UnknownObjectId { id: object_id.clone() })?;
			Value::Object(object.clone())
		}
	})
}

#[cfg(test)]
mod tests {
	use super::{build_graph, parse_document};
	use crate::object::value::Value;
	use crate::object::ObjectError;

	#[test]
	fn scalar_root_documents_parse() {
		let document = parse_document(r#"{ "root": { "i32": 5 } }"#).expect("parse");
		let (_, root) = build_graph(&document).expect("build");
		assert!(matches!(root, Value::I32(5)));
	}

	#[test]
	fn null_root_uses_the_unit_variant() {
		let document = parse_document(r#"{ "root": "null" }"#).expect("parse");
		let (_, root) = build_graph(&document).expect("build");
		assert!(matches!(root, Value::Null));
	}

	#[test]
	fn unknown_ref_id_is_rejected() {
		let document = parse_document(r#"{ "root": { "ref": "ghost" } }"#).expect("parse");
		let err = build_graph(&document).expect_err("must reject");
		assert!(matches!(err, ObjectError::UnknownObjectId { .. }));
	}

	#[test]
	fn interface_with_fields_is_rejected() {
		let text = r#"{
			"types": [
				{ "name": "demo.Marker", "interface": true, "fields": [{ "name": "x", "type": "i32" }] }
			],
			"root": "null"
		}"#;
		let document = parse_document(text).expect("parse");
		let err = build_graph(&document).expect_err("must reject");
		assert!(matches!(err, ObjectError::InvalidDocument { .. }));
	}

	#[test]
	fn objects_wire_cycles_through_refs() {
		let text = r#"{
			"types": [
				{ "name": "demo.Node", "fields": [{ "name": "next", "type": "demo.Node", "access": "private" }] }
			],
			"objects": {
				"a": { "class": "demo.Node", "fields": { "next": { "ref": "b" } } },
				"b": { "class": "demo.Node", "fields": { "next": { "ref": "a" } } }
			},
			"root": { "ref": "a" }
		}"#;
		let document = parse_document(text).expect("parse");
		let (registry, root) = build_graph(&document).expect("build");

		let rendered = crate::object::render(&registry, &root).expect("render");
		assert!(rendered.contains("<Object Processing>"));
	}
}
