#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "objview", about = "Schema-driven object graph rendering tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Render {
		path: PathBuf,
		#[arg(long)]
		full_names: bool,
		#[arg(long)]
		indent: Option<String>,
		#[arg(long)]
		null_text: Option<String>,
	},
	Types {
		path: PathBuf,
		#[arg(long = "type")]
		type_name: Option<String>,
	},
}

fn main() {
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> objview::object::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Render {
			path,
			full_names,
			indent,
			null_text,
		} => cmd::render::run(path, full_names, indent, null_text),
		Commands::Types { path, type_name } => cmd::types::run(path, type_name),
	}
}
