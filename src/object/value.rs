use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::object::schema::{Registry, TypeId, TypeKind};
use crate::object::{ObjectError, Result};

/// One runtime value in an object graph.
#[derive(Debug, Clone)]
pub enum Value {
	/// Absent reference.
	Null,
	/// Boolean value type.
	Bool(bool),
	/// 8-bit signed integer value type.
	I8(i8),
	/// 16-bit signed integer value type.
	I16(i16),
	/// 32-bit signed integer value type.
	I32(i32),
	/// 64-bit signed integer value type.
	I64(i64),
	/// 32-bit float value type.
	F32(f32),
	/// 64-bit float value type.
	F64(f64),
	/// Single character value type.
	Char(char),
	/// String value type.
	Str(Box<str>),
	/// Typed array of values.
	Array(ArrayValue),
	/// Composite object reference.
	Object(ObjectRef),
}

/// Array payload: element type name plus elements in index order.
///
/// The element type cannot be recovered from a possibly empty or mixed
/// element list, so arrays carry it explicitly; the rendered array type is
/// `<element>[]`.
#[derive(Debug, Clone)]
pub struct ArrayValue {
	/// Full dotted element type name.
	pub element_type: Box<str>,
	/// Elements in index order.
	pub items: Vec<Value>,
}

/// Shared handle to a composite object.
///
/// `Rc` sharing is what lets one object appear at several places in a graph
/// and refer back to an ancestor on the current render path.
pub type ObjectRef = Rc<Object>;

/// Reference identity of a composite object.
///
/// Identity is the allocation address, so two objects that are equal field
/// by field still compare as distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// One composite instance: its class plus per-instance field storage.
///
/// Field storage is interior-mutable so graphs can be wired into cycles after
/// the participating objects exist.
#[derive(Debug)]
pub struct Object {
	type_id: TypeId,
	fields: RefCell<BTreeMap<Box<str>, Value>>,
}

impl Object {
	/// Instantiate a registered class with no fields set.
	///
	/// Interfaces have no instance state and cannot be instantiated.
	pub fn new(registry: &Registry, type_id: TypeId) -> Result<ObjectRef> {
		let decl = registry.get(type_id);
		if decl.kind == TypeKind::Interface {
			return Err(ObjectError::InterfaceNotRenderable { name: decl.name.to_string() });
		}
		Ok(Rc::new(Self {
			type_id,
			fields: RefCell::new(BTreeMap::new()),
		}))
	}

	/// The class this object was instantiated from.
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Set or replace one instance field value.
	pub fn set(&self, name: &str, value: Value) {
		self.fields.borrow_mut().insert(name.into(), value);
	}

	/// Read one instance field value, if it was ever set.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.fields.borrow().get(name).cloned()
	}
}

/// Return the reference identity of a composite object.
pub fn identity(object: &ObjectRef) -> ObjectId {
	ObjectId(Rc::as_ptr(object) as usize)
}

impl Value {
	/// Short label for the value's kind, used in error messages.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::I8(_) => "i8",
			Value::I16(_) => "i16",
			Value::I32(_) => "i32",
			Value::I64(_) => "i64",
			Value::F32(_) => "f32",
			Value::F64(_) => "f64",
			Value::Char(_) => "char",
			Value::Str(_) => "str",
			Value::Array(_) => "array",
			Value::Object(_) => "object",
		}
	}

	/// Whether the value belongs to the closed value-type set.
	pub fn is_value_type(&self) -> bool {
		matches!(
			self,
			Value::Bool(_)
				| Value::I8(_) | Value::I16(_)
				| Value::I32(_) | Value::I64(_)
				| Value::F32(_) | Value::F64(_)
				| Value::Char(_) | Value::Str(_)
		)
	}
}
