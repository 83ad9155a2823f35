//! Public library API for rendering in-memory object graphs as diagnostic text.

/// Type registry, runtime values, field enumeration, and the recursive renderer.
pub mod object;
