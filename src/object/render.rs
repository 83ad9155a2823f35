use crate::object::cycle::CycleTracker;
use crate::object::fields::{FieldDescriptor, build_descriptors, enumerate_fields};
use crate::object::options::FormatOptions;
use crate::object::schema::{Registry, short_type_name};
use crate::object::value::{Value, identity};
use crate::object::{ObjectError, Result};

/// Marker rendered for a composite value already on the active render path.
pub const CYCLE_MARKER: &str = "<Object Processing>";

/// Classification of one runtime value ahead of rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	/// Absent reference; renders as the configured null representation.
	Null,
	/// Member of the closed value-type set; renders as a literal.
	ValueType,
	/// Typed array; renders element by element.
	Array,
	/// Composite object; renders by enumerating its fields.
	Composite,
}

/// Classify a runtime value. Total over all values; read-only.
pub fn classify(value: &Value) -> Kind {
	match value {
		Value::Null => Kind::Null,
		Value::Array(_) => Kind::Array,
		Value::Object(_) => Kind::Composite,
		_ => Kind::ValueType,
	}
}

/// Render a value with default formatting options.
pub fn render(registry: &Registry, value: &Value) -> Result<String> {
	render_with(registry, value, &FormatOptions::default())
}

/// Render a value with caller-supplied formatting options.
///
/// Each call owns one fresh [`CycleTracker`] for its whole call tree.
pub fn render_with(registry: &Registry, value: &Value, options: &FormatOptions) -> Result<String> {
	let tracker = CycleTracker::new();
	render_full(registry, value, options, &tracker)
}

/// Return the built-in default formatting options.
pub fn default_options() -> FormatOptions {
	FormatOptions::default()
}

/// Render the full representation of one value: metadata, the object
/// meta/value separator, and the value representation. Null is the deliberate
/// special case with no metadata/value split at all.
pub fn render_full(registry: &Registry, value: &Value, options: &FormatOptions, tracker: &CycleTracker) -> Result<String> {
	match classify(value) {
		Kind::Null => Ok(options.null_representation.to_string()),
		Kind::ValueType => Ok(format!(
			"{}{}{{{}}}",
			runtime_type_name(registry, value, options)?,
			options.object_meta_value_separator,
			value_literal(value)?
		)),
		Kind::Array => Ok(format!(
			"{}{}{}",
			runtime_type_name(registry, value, options)?,
			options.object_meta_value_separator,
			render_array(registry, value, options, tracker)?
		)),
		Kind::Composite => Ok(format!(
			"{}{}{}",
			runtime_type_name(registry, value, options)?,
			options.object_meta_value_separator,
			render_composite(registry, value, options, tracker)?
		)),
	}
}

/// Render the value representation of an array: one full element rendering
/// per line at depth+1, comma separated, closed at the array's own depth.
///
/// Arrays carry no identity and are never tracked; composite elements inside
/// them consult the tracker exactly like composite field values.
pub fn render_array(registry: &Registry, value: &Value, options: &FormatOptions, tracker: &CycleTracker) -> Result<String> {
	let Value::Array(array) = value else {
		return Err(ObjectError::ArrayExpected { got: value.kind_label() });
	};

	let mut out = String::from("[");
	out.push_str(&options.new_line);
	if array.items.is_empty() {
		out.push_str(&options.indents());
		out.push(']');
		return Ok(out);
	}

	let element_options = options.indented();
	let prefix = element_options.indents();
	let mut lines = Vec::with_capacity(array.items.len());
	for item in &array.items {
		if let Value::Object(element) = item {
			let id = identity(element);
			if tracker.contains(id) {
				lines.push(format!("{prefix}{CYCLE_MARKER}"));
				continue;
			}
			let _guard = tracker.enter(id);
			lines.push(format!("{prefix}{}", render_full(registry, item, &element_options, tracker)?));
			continue;
		}
		lines.push(format!("{prefix}{}", render_full(registry, item, &element_options, tracker)?));
	}

	out.push_str(&lines.join(&format!(",{}", options.new_line)));
	out.push_str(&options.new_line);
	out.push_str(&options.indents());
	out.push(']');
	Ok(out)
}

/// Render the value representation of a composite object by enumerating the
/// fields visible on its concrete runtime type.
pub fn render_composite(registry: &Registry, value: &Value, options: &FormatOptions, tracker: &CycleTracker) -> Result<String> {
	let Value::Object(object) = value else {
		return Err(ObjectError::CompositeExpected { got: value.kind_label() });
	};

	let pairs = enumerate_fields(registry, object.type_id())?;
	let descriptors = build_descriptors(registry, &pairs, Some(object), &options.indented())?;
	if descriptors.is_empty() {
		return Ok("{}".to_owned());
	}

	let mut lines = Vec::with_capacity(descriptors.len());
	for descriptor in descriptors.values() {
		lines.push(render_field(registry, descriptor, tracker)?);
	}

	let mut out = String::from("{");
	out.push_str(&options.new_line);
	out.push_str(&lines.join(&format!(",{}", options.new_line)));
	out.push_str(&options.new_line);
	out.push_str(&options.indents());
	out.push('}');
	Ok(out)
}

/// Render one field line: indentation, metadata, the field meta/value
/// separator, and the value representation for the cached field value.
fn render_field(registry: &Registry, descriptor: &FieldDescriptor, tracker: &CycleTracker) -> Result<String> {
	let options = &descriptor.options;
	let value_text = match &descriptor.value {
		Value::Null => options.null_representation.to_string(),
		Value::Object(object) => {
			let id = identity(object);
			if tracker.contains(id) {
				CYCLE_MARKER.to_owned()
			} else {
				let _guard = tracker.enter(id);
				render_full(registry, &descriptor.value, options, tracker)?
			}
		}
		Value::Array(_) => render_full(registry, &descriptor.value, options, tracker)?,
		_ => value_literal(&descriptor.value)?,
	};

	Ok(format!(
		"{}{}{}{}",
		options.indents(),
		descriptor.meta(registry),
		options.field_meta_value_separator,
		value_text
	))
}

/// Literal text of a value-type value: strings double-quoted, characters
/// single-quoted, numbers and booleans in their plain text form.
fn value_literal(value: &Value) -> Result<String> {
	match value {
		Value::Bool(item) => Ok(item.to_string()),
		Value::I8(item) => Ok(item.to_string()),
		Value::I16(item) => Ok(item.to_string()),
		Value::I32(item) => Ok(item.to_string()),
		Value::I64(item) => Ok(item.to_string()),
		Value::F32(item) => Ok(item.to_string()),
		Value::F64(item) => Ok(item.to_string()),
		Value::Char(item) => Ok(format!("'{item}'")),
		Value::Str(item) => Ok(format!("\"{item}\"")),
		_ => Err(ObjectError::ValueTypeExpected { got: value.kind_label() }),
	}
}

/// Runtime type name of a non-null value, shortened unless the options ask
/// for fully-qualified names. Arrays render as `<element>[]`.
fn runtime_type_name(registry: &Registry, value: &Value, options: &FormatOptions) -> Result<String> {
	let full = match value {
		Value::Null => {
			return Err(ObjectError::ValueTypeExpected { got: value.kind_label() });
		}
		Value::Array(array) => format!("{}[]", array.element_type),
		Value::Object(object) => registry.type_name(object.type_id()).to_owned(),
		other => other.kind_label().to_owned(),
	};
	if options.full_type_name {
		Ok(full)
	} else {
		Ok(short_type_name(&full).to_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::{CYCLE_MARKER, Kind, classify, render, value_literal};
	use crate::object::schema::Registry;
	use crate::object::value::{ArrayValue, Object, Value};
	use crate::object::ObjectError;

	#[test]
	fn classification_covers_all_kinds() {
		let mut registry = Registry::new();
		let node = registry.register_class("demo.Node", None, &[], Vec::new()).expect("register");
		let object = Object::new(&registry, node).expect("instantiate");

		assert_eq!(classify(&Value::Null), Kind::Null);
		assert_eq!(classify(&Value::Bool(true)), Kind::ValueType);
		assert_eq!(classify(&Value::I16(2)), Kind::ValueType);
		assert_eq!(classify(&Value::Str("a".into())), Kind::ValueType);
		assert_eq!(
			classify(&Value::Array(ArrayValue {
				element_type: "i32".into(),
				items: Vec::new(),
			})),
			Kind::Array
		);
		assert_eq!(classify(&Value::Object(object)), Kind::Composite);
	}

	#[test]
	fn literals_quote_strings_and_characters() {
		assert_eq!(value_literal(&Value::Str("ab".into())).expect("literal"), "\"ab\"");
		assert_eq!(value_literal(&Value::Char('x')).expect("literal"), "'x'");
		assert_eq!(value_literal(&Value::I32(-7)).expect("literal"), "-7");
		assert_eq!(value_literal(&Value::Bool(false)).expect("literal"), "false");
	}

	#[test]
	fn literal_rejects_non_value_types() {
		let err = value_literal(&Value::Null).expect_err("must reject");
		assert!(matches!(err, ObjectError::ValueTypeExpected { got: "null" }));
	}

	#[test]
	fn cycle_marker_is_distinct_from_legitimate_renderings() {
		let mut registry = Registry::new();
		let node = registry.register_class("demo.Node", None, &[], Vec::new()).expect("register");
		let object = Object::new(&registry, node).expect("instantiate");
		let rendered = render(&registry, &Value::Object(object)).expect("render");
		assert_ne!(rendered, CYCLE_MARKER);
	}
}
