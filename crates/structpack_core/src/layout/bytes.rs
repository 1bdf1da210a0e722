use crate::layout::{ByteOrder, LayoutError, Result};

/// Bounded cursor over an immutable byte slice.
pub(crate) struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	pub(crate) fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	pub(crate) fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance.
	pub(crate) fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(LayoutError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	pub(crate) fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	pub(crate) fn read_u16(&mut self, order: ByteOrder) -> Result<u16> {
		let buf = self.read_array()?;
		Ok(match order.resolve() {
			ByteOrder::Big => u16::from_be_bytes(buf),
			_ => u16::from_le_bytes(buf),
		})
	}

	pub(crate) fn read_u32(&mut self, order: ByteOrder) -> Result<u32> {
		let buf = self.read_array()?;
		Ok(match order.resolve() {
			ByteOrder::Big => u32::from_be_bytes(buf),
			_ => u32::from_le_bytes(buf),
		})
	}

	pub(crate) fn read_u64(&mut self, order: ByteOrder) -> Result<u64> {
		let buf = self.read_array()?;
		Ok(match order.resolve() {
			ByteOrder::Big => u64::from_be_bytes(buf),
			_ => u64::from_le_bytes(buf),
		})
	}
}

/// Append-only byte sink mirroring [`Cursor`].
pub(crate) struct Writer {
	bytes: Vec<u8>,
	order: ByteOrder,
}

impl Writer {
	pub(crate) fn with_capacity(capacity: usize, order: ByteOrder) -> Self {
		Self {
			bytes: Vec::with_capacity(capacity),
			order: order.resolve(),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.bytes.len()
	}

	pub(crate) fn put_u8(&mut self, value: u8) {
		self.bytes.push(value);
	}

	pub(crate) fn put_u16(&mut self, value: u16) {
		match self.order {
			ByteOrder::Big => self.bytes.extend_from_slice(&value.to_be_bytes()),
			_ => self.bytes.extend_from_slice(&value.to_le_bytes()),
		}
	}

	pub(crate) fn put_u32(&mut self, value: u32) {
		match self.order {
			ByteOrder::Big => self.bytes.extend_from_slice(&value.to_be_bytes()),
			_ => self.bytes.extend_from_slice(&value.to_le_bytes()),
		}
	}

	pub(crate) fn put_u64(&mut self, value: u64) {
		match self.order {
			ByteOrder::Big => self.bytes.extend_from_slice(&value.to_be_bytes()),
			_ => self.bytes.extend_from_slice(&value.to_le_bytes()),
		}
	}

	/// Write `raw` then zero-fill up to `width` bytes.
	pub(crate) fn put_padded(&mut self, raw: &[u8], width: usize) {
		self.bytes.extend_from_slice(raw);
		self.put_zeros(width.saturating_sub(raw.len()));
	}

	pub(crate) fn put_zeros(&mut self, n: usize) {
		self.bytes.resize(self.bytes.len() + n, 0);
	}

	pub(crate) fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}
}

#[cfg(test)]
mod tests {
	use super::{Cursor, Writer};
	use crate::layout::{ByteOrder, LayoutError};

	#[test]
	fn cursor_reads_in_requested_order() {
		let mut cursor = Cursor::new(&[0x12, 0x34, 0x12, 0x34]);
		assert_eq!(cursor.read_u16(ByteOrder::Big).expect("read be"), 0x1234);
		assert_eq!(cursor.read_u16(ByteOrder::Little).expect("read le"), 0x3412);
		assert_eq!(cursor.remaining(), 0);
	}

	#[test]
	fn cursor_reports_eof() {
		let mut cursor = Cursor::new(&[1, 2, 3]);
		let err = cursor.read_u32(ByteOrder::Little).expect_err("short read");
		assert_eq!(err, LayoutError::UnexpectedEof { at: 0, need: 4, rem: 3 });
	}

	#[test]
	fn writer_pads_byte_runs_with_zeros() {
		let mut writer = Writer::with_capacity(8, ByteOrder::Big);
		writer.put_u16(0xABCD);
		writer.put_padded(b"hi", 4);
		writer.put_zeros(2);
		assert_eq!(writer.len(), 8);
		assert_eq!(writer.into_bytes(), vec![0xAB, 0xCD, b'h', b'i', 0, 0, 0, 0]);
	}

	#[test]
	fn native_order_matches_host() {
		let mut writer = Writer::with_capacity(4, ByteOrder::Native);
		writer.put_u32(0x0102_0304);
		assert_eq!(writer.into_bytes(), 0x0102_0304_u32.to_ne_bytes().to_vec());
	}
}
