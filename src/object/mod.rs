mod cycle;
mod document;
mod error;
mod fields;
mod options;
mod render;
mod schema;
mod value;

/// Cycle tracking for one top-level render call.
pub use cycle::CycleTracker;
/// Graph document parsing and construction.
pub use document::{AccessDoc, ArrayDoc, Document, FieldDoc, ModifierDoc, ObjectDoc, TypeDoc, ValueDoc, build_graph, load_graph, parse_document};
/// Error and result aliases.
pub use error::{ObjectError, Result};
/// Field enumeration and descriptor construction.
pub use fields::{FieldDescriptor, build_descriptors, enumerate_fields};
/// Formatting configuration.
pub use options::FormatOptions;
/// Value classification and rendering entry points.
pub use render::{CYCLE_MARKER, Kind, classify, default_options, render, render_array, render_composite, render_full, render_with};
/// Schema registry types.
pub use schema::{AccessModifier, FieldDecl, FieldModifiers, Registry, TypeDecl, TypeId, TypeKind, short_type_name};
/// Runtime value types and reference identity.
pub use value::{ArrayValue, Object, ObjectId, ObjectRef, Value, identity};
