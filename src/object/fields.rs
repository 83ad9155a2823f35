use std::collections::BTreeMap;

use crate::object::options::FormatOptions;
use crate::object::schema::{AccessModifier, FieldDecl, FieldModifiers, Registry, TypeId, short_type_name};
use crate::object::value::{ObjectRef, Value};
use crate::object::{ObjectError, Result};

/// One field resolved for rendering.
///
/// The value is read exactly once, when the descriptor is built; later
/// mutation of the live field is not reflected in the rendering.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	/// Field name. Deduplication key for shadowing resolution.
	pub name: Box<str>,
	/// The type in the ancestry chain whose declaration is in effect.
	pub declaring_type: TypeId,
	/// Declared type name, full dotted form.
	pub declared_type: Box<str>,
	/// Declared access level.
	pub access: AccessModifier,
	/// Non-access modifier flags.
	pub modifiers: FieldModifiers,
	/// Cached value, captured at descriptor construction.
	pub value: Value,
	/// Depth-scoped options in effect for this field's line.
	pub options: FormatOptions,
}

impl FieldDescriptor {
	/// Build a descriptor for one declared field, reading its value now.
	///
	/// Static fields read the registry's static slot and need no instance.
	/// Non-static fields require the owning instance; a declared field the
	/// instance never stored is the tolerated field-read failure: it is
	/// logged and degraded to the declared type's default value rather than
	/// aborting the traversal.
	pub fn read(registry: &Registry, declaring_type: TypeId, decl: &FieldDecl, instance: Option<&ObjectRef>, options: &FormatOptions) -> Result<Self> {
		let value = if decl.modifiers.is_static {
			match registry.get(declaring_type).statics.get(&decl.name) {
				Some(value) => value.clone(),
				None => {
					tracing::warn!(
						type_name = registry.type_name(declaring_type),
						field = decl.name.as_ref(),
						"static field has no assigned value, rendering declared-type default"
					);
					default_value(&decl.type_name)
				}
			}
		} else {
			let Some(instance) = instance else {
				return Err(ObjectError::MissingInstance {
					type_name: registry.type_name(declaring_type).to_owned(),
					field: decl.name.to_string(),
				});
			};
			match instance.get(&decl.name) {
				Some(value) => value,
				None => {
					tracing::warn!(
						type_name = registry.type_name(declaring_type),
						field = decl.name.as_ref(),
						"field value could not be read, rendering declared-type default"
					);
					default_value(&decl.type_name)
				}
			}
		};

		Ok(Self {
			name: decl.name.clone(),
			declaring_type,
			declared_type: decl.type_name.clone(),
			access: decl.access,
			modifiers: decl.modifiers,
			value,
			options: options.clone(),
		})
	}

	/// Compact modifier code: one mandatory access character, then one
	/// character per applied modifier in fixed static/final/volatile/
	/// transient/strict order, each omitted entirely when absent.
	pub fn modifiers_code(&self) -> String {
		let mut code = String::new();
		code.push(self.access.code());
		if self.modifiers.is_static {
			code.push('t');
		}
		if self.modifiers.is_final {
			code.push('i');
		}
		if self.modifiers.is_volatile {
			code.push('o');
		}
		if self.modifiers.is_transient {
			code.push('r');
		}
		if self.modifiers.is_strict {
			code.push('f');
		}
		code
	}

	/// Metadata part of the field's rendered line:
	/// declaring type, modifier code, declared type, and the quoted name,
	/// joined by the field metadata separator.
	pub fn meta(&self, registry: &Registry) -> String {
		let separator = self.options.field_meta_separator.as_ref();
		let declaring = display_name(registry.type_name(self.declaring_type), &self.options);
		let declared = display_name(&self.declared_type, &self.options);
		format!("{declaring}{separator}{}{separator}{declared}{separator}\"{}\"", self.modifiers_code(), self.name)
	}
}

/// Enumerate the declaring-type/field pairs of a class, walking its ancestry
/// from the most-base class down to the class itself.
///
/// Interfaces contribute nothing: they never appear in the ancestry chain,
/// and enumerating an interface directly is rejected.
pub fn enumerate_fields(registry: &Registry, type_id: TypeId) -> Result<Vec<(TypeId, FieldDecl)>> {
	let chain = registry.ancestry(type_id)?;
	let mut pairs = Vec::new();
	for ancestor in chain {
		for field in &registry.get(ancestor).fields {
			pairs.push((ancestor, field.clone()));
		}
	}
	Ok(pairs)
}

/// Build the final name-keyed descriptor map for one composite object.
///
/// Pairs must arrive in base-to-derived order: a later insertion for an
/// already present name overwrites the earlier one, which is exactly the
/// shadowing rule — the most-derived declaration is the one in effect for a
/// concrete instance. The map is ordered lexicographically by field name.
pub fn build_descriptors(
	registry: &Registry,
	pairs: &[(TypeId, FieldDecl)],
	instance: Option<&ObjectRef>,
	options: &FormatOptions,
) -> Result<BTreeMap<Box<str>, FieldDescriptor>> {
	let mut descriptors = BTreeMap::new();
	for (declaring_type, decl) in pairs {
		let descriptor = FieldDescriptor::read(registry, *declaring_type, decl, instance, options)?;
		descriptors.insert(descriptor.name.clone(), descriptor);
	}
	Ok(descriptors)
}

/// Default value of a declared type for the tolerated field-read failure
/// path: zero/false/NUL for value types, null for everything reference-like.
pub(crate) fn default_value(type_name: &str) -> Value {
	match type_name {
		"bool" => Value::Bool(false),
		"i8" => Value::I8(0),
		"i16" => Value::I16(0),
		"i32" => Value::I32(0),
		"i64" => Value::I64(0),
		"f32" => Value::F32(0.0),
		"f64" => Value::F64(0.0),
		"char" => Value::Char('\0'),
		_ => Value::Null,
	}
}

fn display_name<'a>(full: &'a str, options: &FormatOptions) -> &'a str {
	if options.full_type_name { full } else { short_type_name(full) }
}
