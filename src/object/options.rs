use std::sync::Arc;

/// Formatting configuration for one render call tree.
///
/// Options are immutable: each descent into a nested value derives a new
/// instance with `indent_count + 1` via [`FormatOptions::indented`], sharing
/// every other field.
#[derive(Debug, Clone)]
pub struct FormatOptions {
	/// Show fully-qualified type names instead of final-segment names.
	pub full_type_name: bool,
	/// Separator between a field's metadata and its value.
	pub field_meta_value_separator: Arc<str>,
	/// Separator between an object's type-name metadata and its value.
	pub object_meta_value_separator: Arc<str>,
	/// One indent unit.
	pub indent: Arc<str>,
	/// Separator between components inside a field's metadata.
	pub field_meta_separator: Arc<str>,
	/// Line break string.
	pub new_line: Arc<str>,
	/// Current indent depth.
	pub indent_count: u32,
	/// Text rendered for null values.
	pub null_representation: Arc<str>,
}

impl Default for FormatOptions {
	fn default() -> Self {
		Self {
			full_type_name: false,
			field_meta_value_separator: Arc::from("="),
			object_meta_value_separator: Arc::from(":"),
			indent: Arc::from("\t"),
			field_meta_separator: Arc::from("|"),
			new_line: Arc::from("\n"),
			indent_count: 0,
			null_representation: Arc::from("<null>"),
		}
	}
}

impl FormatOptions {
	/// Derive the options for one level deeper, leaving `self` untouched.
	pub fn indented(&self) -> Self {
		Self {
			indent_count: self.indent_count + 1,
			..self.clone()
		}
	}

	/// Current indentation prefix: the indent unit repeated `indent_count` times.
	pub fn indents(&self) -> String {
		self.indent.repeat(self.indent_count as usize)
	}
}

#[cfg(test)]
mod tests {
	use super::FormatOptions;

	#[test]
	fn defaults_match_documented_values() {
		let options = FormatOptions::default();
		assert!(!options.full_type_name);
		assert_eq!(options.field_meta_value_separator.as_ref(), "=");
		assert_eq!(options.object_meta_value_separator.as_ref(), ":");
		assert_eq!(options.indent.as_ref(), "\t");
		assert_eq!(options.field_meta_separator.as_ref(), "|");
		assert_eq!(options.new_line.as_ref(), "\n");
		assert_eq!(options.indent_count, 0);
		assert_eq!(options.null_representation.as_ref(), "<null>");
	}

	#[test]
	fn indented_derives_without_mutating_parent() {
		let parent = FormatOptions::default();
		let child = parent.indented();
		assert_eq!(parent.indent_count, 0);
		assert_eq!(child.indent_count, 1);
		assert_eq!(child.indent.as_ref(), parent.indent.as_ref());
	}

	#[test]
	fn indents_repeats_the_unit() {
		let mut options = FormatOptions::default();
		assert_eq!(options.indents(), "");
		options.indent_count = 3;
		assert_eq!(options.indents(), "\t\t\t");
	}
}
