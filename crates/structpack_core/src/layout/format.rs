use std::fmt;

use crate::layout::{LayoutError, Result};

/// Width in bytes of the pointer placeholder code `P`, independent of the host.
pub const POINTER_SIZE: usize = 8;

/// Fixed-width scalar codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
	/// `?`
	Bool,
	/// `b`
	I8,
	/// `B`
	U8,
	/// `h`
	I16,
	/// `H`
	U16,
	/// `i`
	I32,
	/// `I`
	U32,
	/// `l`, four bytes like `i` but rendered as `long`.
	Long,
	/// `L`, four bytes like `I` but rendered as `unsigned long`.
	ULong,
	/// `q`
	I64,
	/// `Q`
	U64,
	/// `f`
	F32,
	/// `d`
	F64,
	/// `c`, one raw byte.
	Char,
	/// `P`, pointer-width placeholder.
	Pointer,
}

impl Scalar {
	fn from_code(code: char) -> Option<Self> {
		Some(match code {
			'?' => Self::Bool,
			'b' => Self::I8,
			'B' => Self::U8,
			'h' => Self::I16,
			'H' => Self::U16,
			'i' => Self::I32,
			'I' => Self::U32,
			'l' => Self::Long,
			'L' => Self::ULong,
			'q' => Self::I64,
			'Q' => Self::U64,
			'f' => Self::F32,
			'd' => Self::F64,
			'c' => Self::Char,
			'P' => Self::Pointer,
			_ => return None,
		})
	}

	/// Single-character wire code.
	pub fn code(self) -> char {
		match self {
			Self::Bool => '?',
			Self::I8 => 'b',
			Self::U8 => 'B',
			Self::I16 => 'h',
			Self::U16 => 'H',
			Self::I32 => 'i',
			Self::U32 => 'I',
			Self::Long => 'l',
			Self::ULong => 'L',
			Self::I64 => 'q',
			Self::U64 => 'Q',
			Self::F32 => 'f',
			Self::F64 => 'd',
			Self::Char => 'c',
			Self::Pointer => 'P',
		}
	}

	/// Encoded width in bytes.
	pub fn width(self) -> usize {
		match self {
			Self::Bool | Self::I8 | Self::U8 | Self::Char => 1,
			Self::I16 | Self::U16 => 2,
			Self::I32 | Self::U32 | Self::Long | Self::ULong | Self::F32 => 4,
			Self::I64 | Self::U64 | Self::F64 => 8,
			Self::Pointer => POINTER_SIZE,
		}
	}

	/// Equivalent C type name.
	pub fn c_type(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::I8 => "signed char",
			Self::U8 => "unsigned char",
			Self::I16 => "short",
			Self::U16 => "unsigned short",
			Self::I32 => "int",
			Self::U32 => "unsigned int",
			Self::Long => "long",
			Self::ULong => "unsigned long",
			Self::I64 => "long long",
			Self::U64 => "unsigned long long",
			Self::F32 => "float",
			Self::F64 => "double",
			Self::Char => "char",
			Self::Pointer => "void *",
		}
	}

	/// Inclusive integer range, or `None` for non-integer codes.
	pub fn int_bounds(self) -> Option<(i128, i128)> {
		let bits = (self.width() * 8) as u32;
		match self {
			Self::I8 | Self::I16 | Self::I32 | Self::Long | Self::I64 => Some((-(1_i128 << (bits - 1)), (1_i128 << (bits - 1)) - 1)),
			Self::U8 | Self::U16 | Self::U32 | Self::ULong | Self::U64 => Some((0, (1_i128 << bits) - 1)),
			_ => None,
		}
	}

	/// Whether decoded values are signed integers.
	pub fn is_signed_int(self) -> bool {
		matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::Long | Self::I64)
	}
}

/// Wire encoding token of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCode {
	/// Fixed-width scalar.
	Scalar(Scalar),
	/// Fixed-length byte run (`Ns`).
	Bytes(usize),
	/// Fixed-length padding (`Nx`).
	Pad(usize),
}

impl FormatCode {
	/// Parse a struct-style token such as `I`, `12s`, or `4x`.
	pub fn parse(token: &str) -> Result<Self> {
		let trimmed = token.trim();
		let unsupported = || LayoutError::UnsupportedFormat { token: token.to_owned() };

		let code = trimmed.chars().next_back().ok_or_else(unsupported)?;
		let prefix = &trimmed[..trimmed.len() - code.len_utf8()];

		let count = if prefix.is_empty() {
			None
		} else {
			if !prefix.trim_start_matches(['-', '+']).bytes().all(|byte| byte.is_ascii_digit()) {
				return Err(unsupported());
			}
			let count = prefix.parse::<i64>().map_err(|_| unsupported())?;
			if count <= 0 {
				return Err(LayoutError::NonPositiveLength { token: token.to_owned() });
			}
			Some(usize::try_from(count).map_err(|_| unsupported())?)
		};

		match code {
			's' => Ok(Self::Bytes(count.unwrap_or(1))),
			'x' => Ok(Self::Pad(count.unwrap_or(1))),
			other => {
				let scalar = Scalar::from_code(other).ok_or_else(unsupported)?;
				if count.is_some() {
					return Err(LayoutError::RepeatedScalar { token: token.to_owned() });
				}
				Ok(Self::Scalar(scalar))
			}
		}
	}

	/// Encoded width in bytes.
	pub fn width(self) -> usize {
		match self {
			Self::Scalar(scalar) => scalar.width(),
			Self::Bytes(len) | Self::Pad(len) => len,
		}
	}

	/// Run length of byte-run and padding codes; scalars have none.
	pub fn length(self) -> Result<usize> {
		match self {
			Self::Bytes(len) | Self::Pad(len) => Ok(len),
			Self::Scalar(_) => Err(LayoutError::ScalarHasNoLength { token: self.to_string() }),
		}
	}

	/// Equivalent C element type name.
	pub fn c_type(self) -> &'static str {
		match self {
			Self::Scalar(scalar) => scalar.c_type(),
			Self::Bytes(_) | Self::Pad(_) => "char",
		}
	}

	/// Whether this code reserves bytes without carrying a value.
	pub fn is_padding(self) -> bool {
		matches!(self, Self::Pad(_))
	}
}

impl fmt::Display for FormatCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Scalar(scalar) => write!(f, "{}", scalar.code()),
			Self::Bytes(len) => write!(f, "{len}s"),
			Self::Pad(len) => write!(f, "{len}x"),
		}
	}
}

#[cfg(test)]
mod tests;
