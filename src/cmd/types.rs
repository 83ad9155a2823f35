use std::path::PathBuf;

use objview::object::{Registry, Result, TypeDecl, TypeId, TypeKind, load_graph};

/// Summarize the schema registered by a graph document.
pub fn run(path: PathBuf, type_name: Option<String>) -> Result<()> {
	let (registry, _) = load_graph(&path)?;

	println!("path: {}", path.display());
	println!("type_count: {}", registry.len());

	if let Some(name) = type_name {
		let id = registry.lookup(&name)?;
		print_type(&registry, id, registry.get(id));
		return Ok(());
	}

	for (id, decl) in registry.iter() {
		print_type(&registry, id, decl);
	}
	Ok(())
}

fn print_type(registry: &Registry, id: TypeId, decl: &TypeDecl) {
	println!("type: {}", decl.name);
	println!("  kind: {}", kind_label(decl.kind));
	if let Some(base) = decl.base {
		println!("  base: {}", registry.type_name(base));
	}
	for implemented in &decl.implements {
		println!("  implements: {}", registry.type_name(*implemented));
	}
	println!("  field_count: {}", decl.fields.len());
	for field in &decl.fields {
		println!("  {} {}", field.type_name, field.name);
	}
	let chain = registry.ancestry(id);
	if let Ok(chain) = chain {
		if chain.len() > 1 {
			let names: Vec<&str> = chain.iter().map(|ancestor| registry.type_name(*ancestor)).collect();
			println!("  ancestry: {}", names.join(" -> "));
		}
	}
}

fn kind_label(kind: TypeKind) -> &'static str {
	match kind {
		TypeKind::Class => "class",
		TypeKind::Interface => "interface",
	}
}
