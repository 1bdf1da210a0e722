use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use structpack::layout::{ByteOrder, LayoutOptions, StructBuilder, StructType};

use crate::cmd::{CliError, Result};

/// JSON description of one structure type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructDef {
	/// Structure type name.
	pub name: String,
	/// `little` (default), `big`/`network`, or `native`.
	#[serde(default)]
	pub byte_order: Option<String>,
	/// Fields in declaration order.
	pub fields: Vec<FieldDef>,
}

/// JSON description of one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDef {
	/// Field given by a format token (`I`, `12s`, `4x`).
	Format {
		/// Field name.
		name: String,
		/// Format token.
		format: String,
	},
	/// Text field.
	String {
		/// Field name.
		name: String,
		/// Width in bytes.
		length: usize,
		/// Codec name.
		#[serde(default = "default_encoding")]
		encoding: String,
		/// Trim trailing NULs when unpacking.
		#[serde(default)]
		strip_null: bool,
	},
	/// Padding; unnamed padding gets a positional name.
	Padding {
		/// Optional field name.
		#[serde(default)]
		name: Option<String>,
		/// Width in bytes.
		length: usize,
	},
}

fn default_encoding() -> String {
	"ascii".to_owned()
}

impl StructDef {
	/// Read a definition from a JSON file.
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read(path).map_err(|source| CliError::Io {
			path: path.to_owned(),
			source,
		})?;
		Ok(serde_json::from_slice(&raw)?)
	}

	/// Compile into a structure type.
	pub fn compile(&self) -> Result<Arc<StructType>> {
		let byte_order = match self.byte_order.as_deref() {
			None => ByteOrder::default(),
			Some(label) => ByteOrder::parse(label).ok_or_else(|| CliError::InvalidByteOrder { value: label.to_owned() })?,
		};

		let mut builder = StructBuilder::new(&self.name).options(LayoutOptions { byte_order });
		for (idx, field) in self.fields.iter().enumerate() {
			builder = match field {
				FieldDef::Format { name, format } => builder.format(name, format),
				FieldDef::String {
					name,
					length,
					encoding,
					strip_null,
				} => builder.string(name, *length, encoding, *strip_null),
				FieldDef::Padding { name, length } => {
					let name = name.clone().unwrap_or_else(|| format!("_pad{idx}"));
					builder.padding(name, *length)
				}
			};
		}
		Ok(builder.build()?)
	}
}
