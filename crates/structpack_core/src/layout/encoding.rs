use crate::layout::{LayoutError, Result};

/// Text codec used by string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
	/// 7-bit ASCII.
	#[default]
	Ascii,
	/// UTF-8.
	Utf8,
	/// ISO-8859-1, one byte per code point up to U+00FF.
	Latin1,
}

impl TextEncoding {
	/// Resolve a codec name; matching ignores case, `-` and `_`.
	pub fn parse(name: &str) -> Result<Self> {
		let normalized: String = name.chars().filter(|ch| !matches!(ch, '-' | '_' | ' ')).flat_map(char::to_lowercase).collect();
		match normalized.as_str() {
			"ascii" | "usascii" => Ok(Self::Ascii),
			"utf8" => Ok(Self::Utf8),
			"latin1" | "iso88591" | "l1" => Ok(Self::Latin1),
			_ => Err(LayoutError::UnknownEncoding { encoding: name.to_owned() }),
		}
	}

	/// Canonical codec label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Ascii => "ascii",
			Self::Utf8 => "utf-8",
			Self::Latin1 => "latin-1",
		}
	}

	/// Encode text, or `None` when a character has no representation.
	pub fn encode(self, text: &str) -> Option<Vec<u8>> {
		match self {
			Self::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
			Self::Utf8 => Some(text.as_bytes().to_vec()),
			Self::Latin1 => text.chars().map(|ch| u8::try_from(u32::from(ch)).ok()).collect(),
		}
	}

	/// Decode bytes, or `None` when they are invalid for this codec.
	pub fn decode(self, bytes: &[u8]) -> Option<String> {
		match self {
			Self::Ascii => bytes.is_ascii().then(|| bytes.iter().copied().map(char::from).collect()),
			Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
			Self::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::TextEncoding;
	use crate::layout::LayoutError;

	#[test]
	fn names_resolve_loosely() {
		assert_eq!(TextEncoding::parse("ASCII").expect("ascii"), TextEncoding::Ascii);
		assert_eq!(TextEncoding::parse("utf_8").expect("utf8"), TextEncoding::Utf8);
		assert_eq!(TextEncoding::parse("ISO-8859-1").expect("latin1"), TextEncoding::Latin1);
		assert!(matches!(TextEncoding::parse("ebcdic"), Err(LayoutError::UnknownEncoding { .. })));
	}

	#[test]
	fn ascii_rejects_high_characters() {
		assert_eq!(TextEncoding::Ascii.encode("caf\u{e9}"), None);
		assert_eq!(TextEncoding::Ascii.decode(&[0x63, 0xe9]), None);
	}

	#[test]
	fn latin1_maps_bytes_to_code_points() {
		let bytes = TextEncoding::Latin1.encode("caf\u{e9}").expect("latin1 encodes");
		assert_eq!(bytes, b"caf\xe9");
		assert_eq!(TextEncoding::Latin1.decode(&bytes).as_deref(), Some("caf\u{e9}"));
		assert_eq!(TextEncoding::Latin1.encode("\u{20ac}"), None);
	}

	#[test]
	fn utf8_length_counts_bytes() {
		let bytes = TextEncoding::Utf8.encode("caf\u{e9}").expect("utf8 encodes");
		assert_eq!(bytes.len(), 5);
		assert_eq!(TextEncoding::Utf8.decode(&[0xff]), None);
	}
}
