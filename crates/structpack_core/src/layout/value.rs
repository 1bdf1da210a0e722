use std::fmt;

/// Runtime value held by one significant field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// Single raw byte.
	Char(u8),
	/// Fixed-length byte run.
	Bytes(Vec<u8>),
	/// Decoded text of a string field.
	String(String),
	/// Pointer-width placeholder value.
	Ptr(u64),
}

impl Value {
	/// Stable lowercase kind label used in error messages.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::Char(_) => "char",
			Self::Bytes(_) => "bytes",
			Self::String(_) => "string",
			Self::Ptr(_) => "ptr",
		}
	}

	/// Boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Integer payload that fits `u64`.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::U64(value) | Self::Ptr(value) => Some(*value),
			Self::I64(value) => u64::try_from(*value).ok(),
			Self::Char(value) => Some(u64::from(*value)),
			_ => None,
		}
	}

	/// Integer payload that fits `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(value) => Some(*value),
			Self::U64(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// Floating-point payload, widened to `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::F32(value) => Some(f64::from(*value)),
			Self::F64(value) => Some(*value),
			_ => None,
		}
	}

	/// Text payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Byte-run payload.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::Bytes(value) => Some(value),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(value) => write!(f, "{value}"),
			Self::I64(value) => write!(f, "{value}"),
			Self::U64(value) => write!(f, "{value}"),
			Self::F32(value) => write!(f, "{value}"),
			Self::F64(value) => write!(f, "{value}"),
			Self::Char(value) => write!(f, "'{}'", std::ascii::escape_default(*value)),
			Self::Bytes(value) => write!(f, "b\"{}\"", value.escape_ascii()),
			Self::String(value) => write!(f, "{value:?}"),
			Self::Ptr(value) => write!(f, "0x{value:016x}"),
		}
	}
}

macro_rules! impl_from_int {
	($variant:ident: $($ty:ty),+) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(value.into())
				}
			}
		)+
	};
}

impl_from_int!(U64: u8, u16, u32, u64);
impl_from_int!(I64: i8, i16, i32, i64);

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::F32(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Self::Bytes(value)
	}
}

impl From<&[u8]> for Value {
	fn from(value: &[u8]) -> Self {
		Self::Bytes(value.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Value {
	fn from(value: &[u8; N]) -> Self {
		Self::Bytes(value.to_vec())
	}
}
