use std::path::PathBuf;
use std::sync::Arc;

use objview::object::{FormatOptions, Result, load_graph, render_with};

/// Load a graph document and print its rendering.
pub fn run(path: PathBuf, full_names: bool, indent: Option<String>, null_text: Option<String>) -> Result<()> {
	let (registry, root) = load_graph(&path)?;

	let mut options = FormatOptions {
		full_type_name: full_names,
		..FormatOptions::default()
	};
	if let Some(indent) = indent {
		options.indent = Arc::from(indent.as_str());
	}
	if let Some(null_text) = null_text {
		options.null_representation = Arc::from(null_text.as_str());
	}

	println!("{}", render_with(&registry, &root, &options)?);
	Ok(())
}
