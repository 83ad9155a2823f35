use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ObjectError>;

/// Errors produced while registering schemas, building graphs, and rendering.
#[derive(Debug, Error)]
pub enum ObjectError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Graph document was not valid JSON for the expected shape.
	#[error("document parse: {0}")]
	DocumentParse(#[from] serde_json::Error),
	/// Requested type name was never registered.
	#[error("unknown type: {name}")]
	UnknownType {
		/// Requested type name.
		name: String,
	},
	/// Type name was registered twice.
	#[error("duplicate type registration: {name}")]
	DuplicateType {
		/// Offending type name.
		name: String,
	},
	/// Class declaration named a base that is not a class.
	#[error("base of {name} is not a class: {base}")]
	BaseNotAClass {
		/// Class being registered.
		name: String,
		/// Offending base type name.
		base: String,
	},
	/// Class declaration listed an implemented type that is not an interface.
	#[error("{name} implements non-interface type {implemented}")]
	ImplementsNonInterface {
		/// Class being registered.
		name: String,
		/// Offending implemented type name.
		implemented: String,
	},
	/// One type declaration repeated a field name.
	#[error("duplicate field {field} on {type_name}")]
	DuplicateField {
		/// Type being registered.
		type_name: String,
		/// Repeated field name.
		field: String,
	},
	/// Requested field does not exist on the type.
	#[error("unknown field {field} on {type_name}")]
	UnknownField {
		/// Type that was queried.
		type_name: String,
		/// Missing field name.
		field: String,
	},
	/// Static value assignment targeted a non-static field.
	#[error("field {field} on {type_name} is not static")]
	NotStaticField {
		/// Declaring type name.
		type_name: String,
		/// Offending field name.
		field: String,
	},
	/// Interface types have no instance state to enumerate or instantiate.
	#[error("type {name} is an interface and has no instance state")]
	InterfaceNotRenderable {
		/// Offending interface name.
		name: String,
	},
	/// Non-static field descriptor was built without an owning instance.
	#[error("non-static field {field} on {type_name} requires an owning instance")]
	MissingInstance {
		/// Declaring type name.
		type_name: String,
		/// Offending field name.
		field: String,
	},
	/// Value-type renderer received a value outside the value-type set.
	#[error("value-type renderer requires a value-type input, got {got}")]
	ValueTypeExpected {
		/// Label of the actual value kind.
		got: &'static str,
	},
	/// Array renderer received a non-array value.
	#[error("array renderer requires an array input, got {got}")]
	ArrayExpected {
		/// Label of the actual value kind.
		got: &'static str,
	},
	/// Composite renderer received a non-composite value.
	#[error("composite renderer requires a composite input, got {got}")]
	CompositeExpected {
		/// Label of the actual value kind.
		got: &'static str,
	},
	/// Graph document referenced an object id that was never declared.
	#[error("unknown object id: {id}")]
	UnknownObjectId {
		/// Offending object id.
		id: String,
	},
	/// Graph document declaration was structurally invalid.
	#[error("invalid document: {reason}")]
	InvalidDocument {
		/// Human-readable rejection reason.
		reason: String,
	},
}
