use std::path::PathBuf;

use structpack::layout::{Field, LayoutError, StructInstance, StructType};

use crate::cmd::convert::{json_to_value, parse_text_value};
use crate::cmd::def::StructDef;
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	/// JSON structure definition.
	pub file: PathBuf,
	/// Field assignment, repeatable.
	#[arg(long = "set", value_name = "NAME=VALUE")]
	pub assignments: Vec<String>,
	/// JSON object of field values; `--set` entries are applied after it.
	#[arg(long)]
	pub values: Option<PathBuf>,
}

/// Pack values and print the bytes as lowercase hex.
pub fn run(args: Args) -> Result<()> {
	let ty = StructDef::load(&args.file)?.compile()?;
	let mut instance = StructInstance::new(&ty);

	if let Some(path) = &args.values {
		let raw = std::fs::read(path).map_err(|source| CliError::Io { path: path.clone(), source })?;
		let json: serde_json::Value = serde_json::from_slice(&raw)?;
		let object = json.as_object().ok_or(CliError::ValuesNotObject)?;
		for (name, item) in object {
			let field = significant_field(&ty, name)?;
			instance.set(name, json_to_value(field, item)?)?;
		}
	}

	for arg in &args.assignments {
		let (name, raw) = arg.split_once('=').ok_or_else(|| CliError::InvalidAssignment { arg: arg.clone() })?;
		let name = name.trim();
		let field = significant_field(&ty, name)?;
		instance.set(name, parse_text_value(field, raw)?)?;
	}

	let bytes = instance.pack()?;
	log::debug!("packed {} bytes for {}", bytes.len(), ty.name());
	println!("{}", hex::encode(bytes));
	Ok(())
}

fn significant_field<'a>(ty: &'a StructType, name: &str) -> Result<&'a Field> {
	// Padding is listed in the field table but has no value slot.
	match ty.field(name).filter(|field| field.is_significant()) {
		Some(field) => Ok(field),
		None => Err(LayoutError::UnknownField {
			struct_name: ty.name().to_owned(),
			field: name.to_owned(),
		}
		.into()),
	}
}
