use std::path::PathBuf;

use serde_json::json;
use structpack::layout::StructInstance;

use crate::cmd::convert::value_to_json;
use crate::cmd::def::StructDef;
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	/// JSON structure definition.
	pub file: PathBuf,
	/// Packed bytes as hex.
	#[arg(long, conflicts_with = "input", required_unless_present = "input")]
	pub hex: Option<String>,
	/// File holding the packed bytes.
	#[arg(long)]
	pub input: Option<PathBuf>,
	/// Emit JSON instead of the C-like rendering.
	#[arg(long)]
	pub json: bool,
}

/// Unpack bytes and print the resulting instance.
pub fn run(args: Args) -> Result<()> {
	let ty = StructDef::load(&args.file)?.compile()?;
	let bytes = match (&args.hex, &args.input) {
		(Some(text), _) => {
			let compact: String = text.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
			hex::decode(compact)?
		}
		(None, Some(path)) => std::fs::read(path).map_err(|source| CliError::Io { path: path.clone(), source })?,
		(None, None) => Vec::new(),
	};

	let instance = StructInstance::unpack(&ty, &bytes)?;

	if args.json {
		let values: serde_json::Map<String, serde_json::Value> = instance
			.values()
			.map(|(name, value)| (name.to_owned(), value.map_or(serde_json::Value::Null, value_to_json)))
			.collect();
		let out = json!({
			"name": ty.name(),
			"width": ty.width(),
			"values": values,
		});
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	println!("{instance}");
	Ok(())
}
