use std::path::PathBuf;

use serde_json::json;

use crate::cmd::Result;
use crate::cmd::def::StructDef;

#[derive(clap::Args)]
pub struct Args {
	/// JSON structure definition.
	pub file: PathBuf,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Print the declaration, compiled layout, and width of a definition.
pub fn run(args: Args) -> Result<()> {
	let ty = StructDef::load(&args.file)?.compile()?;
	let layout = ty.layout();

	if args.json {
		let fields: Vec<_> = ty
			.fields()
			.iter()
			.zip(layout.offsets())
			.map(|(field, offset)| {
				json!({
					"name": field.name(),
					"format": field.format().to_string(),
					"offset": offset,
					"width": field.width(),
					"significant": field.is_significant(),
					"decl": field.to_string(),
				})
			})
			.collect();
		let out = json!({
			"name": ty.name(),
			"byte_order": layout.byte_order().as_str(),
			"layout": layout.descriptor(),
			"width": layout.width(),
			"fields": fields,
		});
		println!("{}", serde_json::to_string_pretty(&out)?);
		return Ok(());
	}

	println!("path: {}", args.file.display());
	println!("byte_order: {}", layout.byte_order().as_str());
	println!("layout: {}", layout.descriptor());
	println!("width: {}", layout.width());
	println!("{ty}");
	Ok(())
}
