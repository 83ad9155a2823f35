/// Graph document rendering command.
pub mod render;
/// Schema summary command.
pub mod types;
