/// Byte order applied to every multi-byte scalar of one structure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
	/// Least significant byte first.
	#[default]
	Little,
	/// Most significant byte first (network order).
	Big,
	/// Host byte order, resolved at pack/unpack time.
	Native,
}

impl ByteOrder {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
			Self::Native => "native",
		}
	}

	/// Layout descriptor prefix character.
	pub fn prefix(self) -> char {
		match self {
			Self::Little => '<',
			Self::Big => '>',
			Self::Native => '=',
		}
	}

	/// Replace `Native` with the concrete host order.
	pub fn resolve(self) -> Self {
		match self {
			Self::Native if cfg!(target_endian = "big") => Self::Big,
			Self::Native => Self::Little,
			other => other,
		}
	}

	/// Parse a byte order label (`little`, `big`, `network`, `native`).
	pub fn parse(label: &str) -> Option<Self> {
		match label.trim().to_ascii_lowercase().as_str() {
			"little" | "le" | "<" => Some(Self::Little),
			"big" | "be" | "network" | ">" | "!" => Some(Self::Big),
			"native" | "=" => Some(Self::Native),
			_ => None,
		}
	}
}

/// Options fixed once per structure type when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
	/// Byte order of multi-byte scalars.
	pub byte_order: ByteOrder,
}

impl LayoutOptions {
	/// Preset using the host byte order.
	pub fn native() -> Self {
		Self {
			byte_order: ByteOrder::Native,
		}
	}

	/// Preset using big-endian network order.
	pub fn network() -> Self {
		Self { byte_order: ByteOrder::Big }
	}
}
