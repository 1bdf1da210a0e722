use std::path::PathBuf;

use structpack::layout::LayoutError;
use thiserror::Error;

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Engine failure, prefixed with its kind.
	#[error("{kind} error: {0}", kind = .0.kind().as_str())]
	Layout(#[from] LayoutError),
	/// File could not be read.
	#[error("io: {path}: {source}")]
	Io {
		/// File being read.
		path: PathBuf,
		/// Underlying failure.
		source: std::io::Error,
	},
	/// Definition or values file is not valid JSON for its schema.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Hex input is malformed.
	#[error("hex: {0}")]
	Hex(#[from] hex::FromHexError),
	/// Byte order label is not recognised.
	#[error("invalid byte order {value:?} (expected little, big, network, or native)")]
	InvalidByteOrder {
		/// Rejected label.
		value: String,
	},
	/// `--set` argument is not `NAME=VALUE`.
	#[error("invalid assignment {arg:?} (expected NAME=VALUE)")]
	InvalidAssignment {
		/// Rejected argument.
		arg: String,
	},
	/// Value text or JSON cannot be read as the field's type.
	#[error("cannot read {value} as a value for field {field}")]
	InvalidValue {
		/// Target field.
		field: String,
		/// Rejected input.
		value: String,
	},
	/// Values file is not a JSON object.
	#[error("values must be a JSON object of field names to values")]
	ValuesNotObject,
}
