use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Coarse classification of [`LayoutError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Bad structure definition; raised while building a structure type.
	Configuration,
	/// Length queried on a field that has none.
	Type,
	/// Rejected field value or unknown field name.
	Value,
	/// Packing with significant fields left unset.
	Completeness,
	/// Buffer size does not match the compiled layout.
	LengthMismatch,
}

impl ErrorKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Configuration => "configuration",
			Self::Type => "type",
			Self::Value => "value",
			Self::Completeness => "completeness",
			Self::LengthMismatch => "length_mismatch",
		}
	}
}

/// Errors produced while defining, filling, packing, and unpacking structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
	/// Format token is empty, unknown, or carries a byte-order prefix.
	#[error("unsupported format code {token:?}")]
	UnsupportedFormat {
		/// Offending token as written.
		token: String,
	},
	/// Byte-run or padding count is zero or negative.
	#[error("format {token:?} has a non-positive length")]
	NonPositiveLength {
		/// Offending token as written.
		token: String,
	},
	/// A repeat count was given on a scalar code.
	#[error("format {token:?} repeats a scalar; only byte runs and padding take a count")]
	RepeatedScalar {
		/// Offending token as written.
		token: String,
	},
	/// Text codec name is not recognised.
	#[error("unknown text encoding {encoding:?}")]
	UnknownEncoding {
		/// Requested codec name.
		encoding: String,
	},
	/// Two fields of one structure share a name.
	#[error("duplicate field {field} in struct {struct_name}")]
	DuplicateField {
		/// Structure being defined.
		struct_name: String,
		/// Repeated field name.
		field: String,
	},
	/// Summed field widths do not fit in `usize`.
	#[error("struct {struct_name} is too large to lay out")]
	LayoutTooLarge {
		/// Structure being defined.
		struct_name: String,
	},
	/// Field or structure name is empty or not an identifier.
	#[error("invalid name {name:?} in struct {struct_name}")]
	InvalidName {
		/// Structure being defined.
		struct_name: String,
		/// Rejected name.
		name: String,
	},
	/// Length was requested from a scalar field.
	#[error("field with format {token:?} is scalar and has no length")]
	ScalarHasNoLength {
		/// Scalar format token.
		token: String,
	},
	/// Name does not match any significant field of the structure.
	#[error("struct {struct_name} has no field {field}")]
	UnknownField {
		/// Structure type name.
		struct_name: String,
		/// Requested field name.
		field: String,
	},
	/// Value kind does not fit the field type.
	#[error("field {field} expects {expected}, got {got}")]
	TypeMismatch {
		/// Field name.
		field: String,
		/// Accepted value kinds.
		expected: &'static str,
		/// Supplied value kind.
		got: &'static str,
	},
	/// Numeric value does not fit the field width or signedness.
	#[error("value {value} out of range for {c_type} field {field}")]
	OutOfRange {
		/// Field name.
		field: String,
		/// C type of the field.
		c_type: &'static str,
		/// Rendered offending value.
		value: String,
	},
	/// Encoded value is longer than the fixed field width.
	#[error("value for field {field} is {len} bytes, field holds {max}")]
	ValueTooLong {
		/// Field name.
		field: String,
		/// Encoded value length.
		len: usize,
		/// Fixed field width.
		max: usize,
	},
	/// Text cannot be represented in the field encoding.
	#[error("field {field}: text is not representable as {encoding}")]
	Unencodable {
		/// Field name.
		field: String,
		/// Field encoding label.
		encoding: &'static str,
	},
	/// Bytes are not valid in the field encoding.
	#[error("field {field}: bytes are not valid {encoding}")]
	Undecodable {
		/// Field name.
		field: String,
		/// Field encoding label.
		encoding: &'static str,
	},
	/// Significant field has no value at pack time.
	#[error("cannot pack {struct_name}: field {field} is unset")]
	UnsetField {
		/// Structure type name.
		struct_name: String,
		/// First unset field in declaration order.
		field: String,
	},
	/// Buffer length differs from the layout width.
	#[error("cannot unpack {struct_name}: expected {expected} bytes, got {got}")]
	LengthMismatch {
		/// Structure type name.
		struct_name: String,
		/// Layout width in bytes.
		expected: usize,
		/// Supplied buffer length.
		got: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
}

impl LayoutError {
	/// Classify this error for callers that branch on the failure kind.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::UnsupportedFormat { .. }
			| Self::NonPositiveLength { .. }
			| Self::RepeatedScalar { .. }
			| Self::UnknownEncoding { .. }
			| Self::DuplicateField { .. }
			| Self::LayoutTooLarge { .. }
			| Self::InvalidName { .. } => ErrorKind::Configuration,
			Self::ScalarHasNoLength { .. } => ErrorKind::Type,
			Self::UnknownField { .. }
			| Self::TypeMismatch { .. }
			| Self::OutOfRange { .. }
			| Self::ValueTooLong { .. }
			| Self::Unencodable { .. }
			| Self::Undecodable { .. } => ErrorKind::Value,
			Self::UnsetField { .. } => ErrorKind::Completeness,
			Self::LengthMismatch { .. } | Self::UnexpectedEof { .. } => ErrorKind::LengthMismatch,
		}
	}
}
