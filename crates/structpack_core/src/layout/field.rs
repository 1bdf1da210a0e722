use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::layout::bytes::{Cursor, Writer};
use crate::layout::{ByteOrder, FormatCode, LayoutError, Result, Scalar, TextEncoding, Value};

/// Process-wide creation counter shared by field declaration orders and structure type ids.
static NEXT_ORDINAL: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_ordinal() -> u64 {
	NEXT_ORDINAL.fetch_add(1, Ordering::Relaxed)
}

/// How a field interprets its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	/// Scalar or raw byte run, stored as-is.
	Plain,
	/// Byte run exposed as text.
	Text {
		/// Codec used on set, pack, and unpack.
		encoding: TextEncoding,
		/// Trim trailing NUL bytes when unpacking.
		strip_null: bool,
	},
	/// Reserved bytes with no value.
	Padding,
}

/// Structure type that bound a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner {
	/// Unique id of the owning structure type.
	pub type_id: u64,
	/// Owning structure type name.
	pub type_name: Box<str>,
}

/// One slot of a binary layout.
#[derive(Debug, Clone)]
pub struct Field {
	format: FormatCode,
	kind: FieldKind,
	declaration_order: u64,
	name: Option<Box<str>>,
	owner: Option<Owner>,
}

impl Field {
	/// Create a field from a struct-style format token (`"H"`, `"12s"`, `"4x"`).
	pub fn new(token: &str) -> Result<Self> {
		let format = FormatCode::parse(token)?;
		let kind = if format.is_padding() { FieldKind::Padding } else { FieldKind::Plain };
		Ok(Self::with_kind(format, kind))
	}

	/// Create a scalar field.
	pub fn scalar(scalar: Scalar) -> Self {
		Self::with_kind(FormatCode::Scalar(scalar), FieldKind::Plain)
	}

	/// Create a raw byte-run field of `len` bytes.
	pub fn bytes(len: usize) -> Result<Self> {
		Ok(Self::with_kind(run_format(len, 's')?, FieldKind::Plain))
	}

	/// Create a text field stored in `len` bytes.
	///
	/// With `strip_null`, trailing NUL bytes are dropped when unpacking only.
	/// A value set with trailing NULs therefore unpacks without them and does
	/// not compare equal to the instance it was packed from.
	pub fn string(len: usize, encoding: &str, strip_null: bool) -> Result<Self> {
		let encoding = TextEncoding::parse(encoding)?;
		Ok(Self::with_kind(run_format(len, 's')?, FieldKind::Text { encoding, strip_null }))
	}

	/// Create a padding field reserving `n_bytes` zero bytes.
	pub fn padding(n_bytes: usize) -> Result<Self> {
		Ok(Self::with_kind(run_format(n_bytes, 'x')?, FieldKind::Padding))
	}

	fn with_kind(format: FormatCode, kind: FieldKind) -> Self {
		Self {
			format,
			kind,
			declaration_order: next_ordinal(),
			name: None,
			owner: None,
		}
	}

	/// Wire format code.
	pub fn format(&self) -> FormatCode {
		self.format
	}

	/// Value interpretation of this field.
	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	/// Creation ordinal; strictly increasing across all fields ever created.
	pub fn declaration_order(&self) -> u64 {
		self.declaration_order
	}

	/// Bound field name, `None` until a structure type binds it.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Binding structure type, `None` until bound.
	pub fn owner(&self) -> Option<&Owner> {
		self.owner.as_ref()
	}

	/// Whether the field carries a value (everything except padding).
	pub fn is_significant(&self) -> bool {
		self.kind != FieldKind::Padding
	}

	/// Encoded width in bytes.
	pub fn width(&self) -> usize {
		self.format.width()
	}

	/// Run length of byte-run and padding fields; scalar fields fail with a type error.
	pub fn length(&self) -> Result<usize> {
		self.format.length()
	}

	pub(crate) fn bind(&mut self, name: &str, owner: Owner) {
		self.name = Some(name.into());
		self.owner = Some(owner);
	}

	fn label(&self) -> String {
		self.name().unwrap_or("<unbound>").to_owned()
	}

	/// Validate and normalize a value for storage in this field.
	pub(crate) fn coerce(&self, value: Value) -> Result<Value> {
		match (self.format, self.kind) {
			(FormatCode::Scalar(scalar), _) => self.coerce_scalar(scalar, value),
			(FormatCode::Bytes(len), FieldKind::Text { encoding, .. }) => self.coerce_text(len, encoding, value),
			(FormatCode::Bytes(len), _) => self.coerce_bytes(len, value),
			(FormatCode::Pad(_), _) => Err(self.mismatch("no value (padding)", &value)),
		}
	}

	fn coerce_scalar(&self, scalar: Scalar, value: Value) -> Result<Value> {
		if let Some((min, max)) = scalar.int_bounds() {
			let wide = match value {
				Value::I64(item) => i128::from(item),
				Value::U64(item) => i128::from(item),
				other => return Err(self.mismatch("integer", &other)),
			};
			if wide < min || wide > max {
				return Err(LayoutError::OutOfRange {
					field: self.label(),
					c_type: scalar.c_type(),
					value: wide.to_string(),
				});
			}
			// In range, so the casts are exact.
			return Ok(if scalar.is_signed_int() { Value::I64(wide as i64) } else { Value::U64(wide as u64) });
		}

		match (scalar, value) {
			(Scalar::Bool, Value::Bool(item)) => Ok(Value::Bool(item)),
			(Scalar::F32, Value::F32(item)) => Ok(Value::F32(item)),
			(Scalar::F32, Value::F64(item)) => {
				let narrow = item as f32;
				if item.is_finite() && !narrow.is_finite() {
					return Err(LayoutError::OutOfRange {
						field: self.label(),
						c_type: scalar.c_type(),
						value: item.to_string(),
					});
				}
				Ok(Value::F32(narrow))
			}
			(Scalar::F32, Value::I64(item)) => Ok(Value::F32(item as f32)),
			(Scalar::F32, Value::U64(item)) => Ok(Value::F32(item as f32)),
			(Scalar::F64, Value::F64(item)) => Ok(Value::F64(item)),
			(Scalar::F64, Value::F32(item)) => Ok(Value::F64(f64::from(item))),
			(Scalar::F64, Value::I64(item)) => Ok(Value::F64(item as f64)),
			(Scalar::F64, Value::U64(item)) => Ok(Value::F64(item as f64)),
			(Scalar::Char, Value::Char(item)) => Ok(Value::Char(item)),
			(Scalar::Char, Value::Bytes(item)) if item.len() == 1 => Ok(Value::Char(item[0])),
			(Scalar::Pointer, Value::Ptr(item) | Value::U64(item)) => Ok(Value::Ptr(item)),
			(Scalar::Bool, other) => Err(self.mismatch("bool", &other)),
			(Scalar::F32 | Scalar::F64, other) => Err(self.mismatch("float or integer", &other)),
			(Scalar::Char, other) => Err(self.mismatch("char or one-byte bytes", &other)),
			(_, other) => Err(self.mismatch("ptr or u64", &other)),
		}
	}

	fn coerce_bytes(&self, len: usize, value: Value) -> Result<Value> {
		let mut raw = match value {
			Value::Bytes(item) => item,
			Value::String(item) => item.into_bytes(),
			other => return Err(self.mismatch("bytes", &other)),
		};
		self.check_len(raw.len(), len)?;
		raw.resize(len, 0);
		Ok(Value::Bytes(raw))
	}

	fn coerce_text(&self, len: usize, encoding: TextEncoding, value: Value) -> Result<Value> {
		let text = match value {
			Value::String(item) => item,
			Value::Bytes(item) => encoding.decode(&item).ok_or_else(|| self.undecodable(encoding))?,
			other => return Err(self.mismatch("string or bytes", &other)),
		};
		let encoded = encoding.encode(&text).ok_or_else(|| LayoutError::Unencodable {
			field: self.label(),
			encoding: encoding.as_str(),
		})?;
		self.check_len(encoded.len(), len)?;
		Ok(Value::String(text))
	}

	fn check_len(&self, len: usize, max: usize) -> Result<()> {
		if len > max {
			return Err(LayoutError::ValueTooLong { field: self.label(), len, max });
		}
		Ok(())
	}

	fn mismatch(&self, expected: &'static str, got: &Value) -> LayoutError {
		LayoutError::TypeMismatch {
			field: self.label(),
			expected,
			got: got.kind_name(),
		}
	}

	fn undecodable(&self, encoding: TextEncoding) -> LayoutError {
		LayoutError::Undecodable {
			field: self.label(),
			encoding: encoding.as_str(),
		}
	}

	/// Append this field's bytes; padding ignores `value` and writes zeros.
	pub(crate) fn encode(&self, value: Option<&Value>, out: &mut Writer) -> Result<()> {
		let Some(value) = value.filter(|_| self.is_significant()) else {
			out.put_zeros(self.width());
			return Ok(());
		};

		match (self.format, value) {
			(FormatCode::Scalar(scalar), value) => self.encode_scalar(scalar, value, out),
			(FormatCode::Bytes(len), Value::String(text)) => {
				let encoding = match self.kind {
					FieldKind::Text { encoding, .. } => encoding,
					_ => TextEncoding::Utf8,
				};
				let raw = encoding.encode(text).ok_or_else(|| LayoutError::Unencodable {
					field: self.label(),
					encoding: encoding.as_str(),
				})?;
				self.check_len(raw.len(), len)?;
				out.put_padded(&raw, len);
				Ok(())
			}
			(FormatCode::Bytes(len), Value::Bytes(raw)) => {
				self.check_len(raw.len(), len)?;
				out.put_padded(raw, len);
				Ok(())
			}
			(_, other) => Err(self.mismatch("bytes or string", other)),
		}
	}

	fn encode_scalar(&self, scalar: Scalar, value: &Value, out: &mut Writer) -> Result<()> {
		match (scalar, value) {
			(Scalar::Bool, Value::Bool(item)) => out.put_u8(u8::from(*item)),
			(Scalar::Char, Value::Char(item)) => out.put_u8(*item),
			(Scalar::I8, Value::I64(item)) => out.put_u8(*item as u8),
			(Scalar::U8, Value::U64(item)) => out.put_u8(*item as u8),
			(Scalar::I16, Value::I64(item)) => out.put_u16(*item as u16),
			(Scalar::U16, Value::U64(item)) => out.put_u16(*item as u16),
			(Scalar::I32 | Scalar::Long, Value::I64(item)) => out.put_u32(*item as u32),
			(Scalar::U32 | Scalar::ULong, Value::U64(item)) => out.put_u32(*item as u32),
			(Scalar::I64, Value::I64(item)) => out.put_u64(*item as u64),
			(Scalar::U64, Value::U64(item)) => out.put_u64(*item),
			(Scalar::F32, Value::F32(item)) => out.put_u32(item.to_bits()),
			(Scalar::F64, Value::F64(item)) => out.put_u64(item.to_bits()),
			(Scalar::Pointer, Value::Ptr(item)) => out.put_u64(*item),
			(_, other) => return Err(self.mismatch(scalar.c_type(), other)),
		}
		Ok(())
	}

	/// Consume this field's bytes; padding yields `None`.
	pub(crate) fn decode(&self, cursor: &mut Cursor<'_>, order: ByteOrder) -> Result<Option<Value>> {
		let value = match (self.format, self.kind) {
			(FormatCode::Pad(len), _) => {
				cursor.read_exact(len)?;
				return Ok(None);
			}
			(FormatCode::Scalar(scalar), _) => decode_scalar(scalar, cursor, order)?,
			(FormatCode::Bytes(len), FieldKind::Text { encoding, strip_null }) => {
				let mut raw = cursor.read_exact(len)?;
				if strip_null {
					let end = raw.iter().rposition(|byte| *byte != 0).map_or(0, |idx| idx + 1);
					raw = &raw[..end];
				}
				Value::String(encoding.decode(raw).ok_or_else(|| self.undecodable(encoding))?)
			}
			(FormatCode::Bytes(len), _) => Value::Bytes(cursor.read_exact(len)?.to_vec()),
		};
		Ok(Some(value))
	}
}

fn run_format(len: usize, code: char) -> Result<FormatCode> {
	if len == 0 {
		return Err(LayoutError::NonPositiveLength { token: format!("{len}{code}") });
	}
	Ok(if code == 'x' { FormatCode::Pad(len) } else { FormatCode::Bytes(len) })
}

fn decode_scalar(scalar: Scalar, cursor: &mut Cursor<'_>, order: ByteOrder) -> Result<Value> {
	Ok(match scalar {
		Scalar::Bool => Value::Bool(cursor.read_u8()? != 0),
		Scalar::Char => Value::Char(cursor.read_u8()?),
		Scalar::I8 => Value::I64(i64::from(cursor.read_u8()? as i8)),
		Scalar::U8 => Value::U64(u64::from(cursor.read_u8()?)),
		Scalar::I16 => Value::I64(i64::from(cursor.read_u16(order)? as i16)),
		Scalar::U16 => Value::U64(u64::from(cursor.read_u16(order)?)),
		Scalar::I32 | Scalar::Long => Value::I64(i64::from(cursor.read_u32(order)? as i32)),
		Scalar::U32 | Scalar::ULong => Value::U64(u64::from(cursor.read_u32(order)?)),
		Scalar::I64 => Value::I64(cursor.read_u64(order)? as i64),
		Scalar::U64 => Value::U64(cursor.read_u64(order)?),
		Scalar::F32 => Value::F32(f32::from_bits(cursor.read_u32(order)?)),
		Scalar::F64 => Value::F64(f64::from_bits(cursor.read_u64(order)?)),
		Scalar::Pointer => Value::Ptr(cursor.read_u64(order)?),
	})
}

impl fmt::Display for Field {
	/// C-like declaration: `unsigned int a`, `char name[12]`, or bare `char[12]` for padding.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = self.name().unwrap_or("_");
		match self.format {
			FormatCode::Pad(len) => write!(f, "char[{len}]"),
			FormatCode::Bytes(len) => write!(f, "char {name}[{len}]"),
			FormatCode::Scalar(scalar) => write!(f, "{} {name}", scalar.c_type()),
		}
	}
}
