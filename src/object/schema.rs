use std::collections::HashMap;

use crate::object::value::Value;
use crate::object::{ObjectError, Result};

/// Opaque handle to one registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

/// Declared access level of a field.
///
/// Package access is an explicit variant rather than an inferred absence, so
/// unusual modifier combinations cannot misclassify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
	/// Visible to the declaring type only.
	Private,
	/// Visible within the declaring package.
	Package,
	/// Visible to the declaring type and its descendants.
	Protected,
	/// Visible everywhere.
	Public,
}

impl AccessModifier {
	/// Single-character code used in rendered field metadata.
	pub fn code(self) -> char {
		match self {
			AccessModifier::Private => 'i',
			AccessModifier::Package => 'c',
			AccessModifier::Protected => 'o',
			AccessModifier::Public => 'b',
		}
	}
}

/// Non-access modifier flags of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldModifiers {
	/// Field belongs to the type, not to instances.
	pub is_static: bool,
	/// Field is write-once.
	pub is_final: bool,
	/// Field is volatile.
	pub is_volatile: bool,
	/// Field is excluded from persistence.
	pub is_transient: bool,
	/// Field uses strict floating-point evaluation.
	pub is_strict: bool,
}

/// One field declaration on a registered type.
#[derive(Debug, Clone)]
pub struct FieldDecl {
	/// Field name, unique within its declaring type.
	pub name: Box<str>,
	/// Declared type name, full dotted form.
	pub type_name: Box<str>,
	/// Declared access level.
	pub access: AccessModifier,
	/// Non-access modifier flags.
	pub modifiers: FieldModifiers,
}

/// Whether a registered type carries instance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
	/// Concrete type with declared fields and an optional base class.
	Class,
	/// Stateless contract; contributes no fields to any instance.
	Interface,
}

/// One registered type declaration.
#[derive(Debug)]
pub struct TypeDecl {
	/// Full dotted type name.
	pub name: Box<str>,
	/// Class or interface.
	pub kind: TypeKind,
	/// Base class, if any. Always `None` for interfaces.
	pub base: Option<TypeId>,
	/// Implemented interfaces. Display-only; they contribute no fields.
	pub implements: Vec<TypeId>,
	/// Fields declared directly on this type, in declaration order.
	pub fields: Vec<FieldDecl>,
	/// Values of static fields, keyed by field name.
	pub statics: HashMap<Box<str>, Value>,
}

/// Registered schema tables: every type the renderer can introspect.
#[derive(Debug, Default)]
pub struct Registry {
	types: Vec<TypeDecl>,
	by_name: HashMap<Box<str>, TypeId>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an interface type. Interfaces have no base and no fields.
	pub fn register_interface(&mut self, name: &str) -> Result<TypeId> {
		self.insert(TypeDecl {
			name: name.into(),
			kind: TypeKind::Interface,
			base: None,
			implements: Vec::new(),
			fields: Vec::new(),
			statics: HashMap::new(),
		})
	}

	/// Register a class type.
	///
	/// The base, when given, must already be registered as a class; requiring
	/// registration order to follow ancestry order makes inheritance cycles
	/// unrepresentable.
	pub fn register_class(&mut self, name: &str, base: Option<TypeId>, implements: &[TypeId], fields: Vec<FieldDecl>) -> Result<TypeId> {
		if let Some(base_id) = base {
			let base_decl = self.get(base_id);
			if base_decl.kind != TypeKind::Class {
				return Err(ObjectError::BaseNotAClass {
					name: name.to_owned(),
					base: base_decl.name.to_string(),
				});
			}
		}
		for implemented in implements {
			let decl = self.get(*implemented);
			if decl.kind != TypeKind::Interface {
				return Err(ObjectError::ImplementsNonInterface {
					name: name.to_owned(),
					implemented: decl.name.to_string(),
				});
			}
		}
		for (idx, field) in fields.iter().enumerate() {
			if fields[..idx].iter().any(|other| other.name == field.name) {
				return Err(ObjectError::DuplicateField {
					type_name: name.to_owned(),
					field: field.name.to_string(),
				});
			}
		}

		self.insert(TypeDecl {
			name: name.into(),
			kind: TypeKind::Class,
			base,
			implements: implements.to_vec(),
			fields,
			statics: HashMap::new(),
		})
	}

	/// Assign the value of a static field declared on `class`.
	pub fn set_static(&mut self, class: TypeId, field: &str, value: Value) -> Result<()> {
		let decl = self.get(class);
		let Some(field_decl) = decl.fields.iter().find(|item| item.name.as_ref() == field) else {
			return Err(ObjectError::UnknownField {
				type_name: decl.name.to_string(),
				field: field.to_owned(),
			});
		};
		if !field_decl.modifiers.is_static {
			return Err(ObjectError::NotStaticField {
				type_name: decl.name.to_string(),
				field: field.to_owned(),
			});
		}

		self.types[class.0 as usize].statics.insert(field.into(), value);
		Ok(())
	}

	/// Look up a type handle by full name.
	pub fn lookup(&self, name: &str) -> Result<TypeId> {
		self.by_name.get(name).copied().ok_or_else(|| ObjectError::UnknownType { name: name.to_owned() })
	}

	/// Return the declaration behind a type handle.
	pub fn get(&self, id: TypeId) -> &TypeDecl {
		&self.types[id.0 as usize]
	}

	/// Return the full name behind a type handle.
	pub fn type_name(&self, id: TypeId) -> &str {
		&self.get(id).name
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether the registry has no types.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Iterate over registered types in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDecl)> {
		self.types.iter().enumerate().map(|(idx, decl)| (TypeId(idx as u32), decl))
	}

	/// Return the class ancestry chain ordered from the most-base class down
	/// to `id` itself. Interfaces never appear in the chain, and requesting
	/// the ancestry of an interface is rejected.
	pub fn ancestry(&self, id: TypeId) -> Result<Vec<TypeId>> {
		let decl = self.get(id);
		if decl.kind == TypeKind::Interface {
			return Err(ObjectError::InterfaceNotRenderable { name: decl.name.to_string() });
		}

		let mut chain = vec![id];
		let mut current = decl.base;
		while let Some(base_id) = current {
			chain.push(base_id);
			current = self.get(base_id).base;
		}
		chain.reverse();
		Ok(chain)
	}

	fn insert(&mut self, decl: TypeDecl) -> Result<TypeId> {
		if self.by_name.contains_key(&decl.name) {
			return Err(ObjectError::DuplicateType { name: decl.name.to_string() });
		}
		let id = TypeId(self.types.len() as u32);
		self.by_name.insert(decl.name.clone(), id);
		self.types.push(decl);
		Ok(id)
	}
}

/// Return the final dotted segment of a full type name.
///
/// Array suffixes survive because `[]` never contains a dot:
/// `geom.Point[]` shortens to `Point[]`.
pub fn short_type_name(full: &str) -> &str {
	full.rsplit('.').next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
	use super::{AccessModifier, FieldDecl, FieldModifiers, Registry, short_type_name};
	use crate::object::{ObjectError, Value};

	fn field(name: &str, type_name: &str) -> FieldDecl {
		FieldDecl {
			name: name.into(),
			type_name: type_name.into(),
			access: AccessModifier::Private,
			modifiers: FieldModifiers::default(),
		}
	}

	#[test]
	fn ancestry_is_ordered_base_first() {
		let mut registry = Registry::new();
		let animal = registry.register_class("zoo.Animal", None, &[], vec![field("age", "i32")]).expect("register");
		let mammal = registry.register_class("zoo.Mammal", Some(animal), &[], Vec::new()).expect("register");
		let cat = registry.register_class("zoo.Cat", Some(mammal), &[], vec![field("name", "str")]).expect("register");

		let chain = registry.ancestry(cat).expect("ancestry");
		assert_eq!(chain, vec![animal, mammal, cat]);
	}

	#[test]
	fn interface_ancestry_is_rejected() {
		let mut registry = Registry::new();
		let marker = registry.register_interface("zoo.Marker").expect("register");
		let err = registry.ancestry(marker).expect_err("must reject");
		assert!(matches!(err, ObjectError::InterfaceNotRenderable { .. }));
	}

	#[test]
	fn duplicate_type_name_is_rejected() {
		let mut registry = Registry::new();
		registry.register_class("zoo.Animal", None, &[], Vec::new()).expect("register");
		let err = registry.register_class("zoo.Animal", None, &[], Vec::new()).expect_err("must reject");
		assert!(matches!(err, ObjectError::DuplicateType { .. }));
	}

	#[test]
	fn interface_base_is_rejected() {
		let mut registry = Registry::new();
		let marker = registry.register_interface("zoo.Marker").expect("register");
		let err = registry.register_class("zoo.Animal", Some(marker), &[], Vec::new()).expect_err("must reject");
		assert!(matches!(err, ObjectError::BaseNotAClass { .. }));
	}

	#[test]
	fn implements_must_name_interfaces() {
		let mut registry = Registry::new();
		let animal = registry.register_class("zoo.Animal", None, &[], Vec::new()).expect("register");
		let err = registry.register_class("zoo.Cat", None, &[animal], Vec::new()).expect_err("must reject");
		assert!(matches!(err, ObjectError::ImplementsNonInterface { .. }));
	}

	#[test]
	fn duplicate_field_name_is_rejected() {
		let mut registry = Registry::new();
		let err = registry
			.register_class("zoo.Animal", None, &[], vec![field("age", "i32"), field("age", "i64")])
			.expect_err("must reject");
		assert!(matches!(err, ObjectError::DuplicateField { .. }));
	}

	#[test]
	fn static_assignment_requires_static_field() {
		let mut registry = Registry::new();
		let animal = registry.register_class("zoo.Animal", None, &[], vec![field("age", "i32")]).expect("register");
		let err = registry.set_static(animal, "age", Value::I32(1)).expect_err("must reject");
		assert!(matches!(err, ObjectError::NotStaticField { .. }));

		let err = registry.set_static(animal, "missing", Value::I32(1)).expect_err("must reject");
		assert!(matches!(err, ObjectError::UnknownField { .. }));
	}

	#[test]
	fn short_name_keeps_array_suffix() {
		assert_eq!(short_type_name("geom.shapes.Point"), "Point");
		assert_eq!(short_type_name("geom.Point[]"), "Point[]");
		assert_eq!(short_type_name("i32"), "i32");
	}
}
