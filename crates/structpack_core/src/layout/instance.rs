use std::fmt;
use std::sync::Arc;

use crate::layout::bytes::{Cursor, Writer};
use crate::layout::{LayoutError, Result, StructType, Value};

/// One value of a [`StructType`]: the current value of every significant field.
///
/// Unassigned fields stay unset rather than defaulting to zero, so packing an
/// incomplete instance fails instead of emitting zero bytes.
#[derive(Debug, Clone)]
pub struct StructInstance {
	ty: Arc<StructType>,
	values: Vec<Option<Value>>,
}

impl StructInstance {
	/// Create an instance with every field unset.
	pub fn new(ty: &Arc<StructType>) -> Self {
		Self {
			ty: Arc::clone(ty),
			values: vec![None; ty.significant_len()],
		}
	}

	/// Create an instance from named values; unnamed fields stay unset.
	pub fn construct<I, K, V>(ty: &Arc<StructType>, values: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<Value>,
	{
		let mut out = Self::new(ty);
		for (name, value) in values {
			out.set(name.as_ref(), value)?;
		}
		Ok(out)
	}

	/// Structure type of this instance.
	pub fn struct_type(&self) -> &Arc<StructType> {
		&self.ty
	}

	/// Assign a field, validating and normalizing the value for its type.
	pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
		let slot = self.slot(name)?;
		let value = self.ty.significant_field(slot).coerce(value.into())?;
		self.values[slot] = Some(value);
		Ok(())
	}

	/// Current value of a field, `None` while unset.
	pub fn get(&self, name: &str) -> Result<Option<&Value>> {
		let slot = self.slot(name)?;
		Ok(self.values[slot].as_ref())
	}

	/// Reset a field to unset, returning its previous value.
	pub fn clear(&mut self, name: &str) -> Result<Option<Value>> {
		let slot = self.slot(name)?;
		Ok(self.values[slot].take())
	}

	/// Whether every significant field has a value.
	pub fn is_complete(&self) -> bool {
		self.values.iter().all(Option::is_some)
	}

	/// Significant field names and values in declaration order.
	pub fn values(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
		self.ty.significant_fields().zip(&self.values).map(|(field, value)| (field.name().unwrap_or_default(), value.as_ref()))
	}

	/// Pack into exactly [`StructType::width`] bytes; padding is written as zeros.
	pub fn pack(&self) -> Result<Vec<u8>> {
		if let Some(slot) = self.values.iter().position(Option::is_none) {
			return Err(LayoutError::UnsetField {
				struct_name: self.ty.name().to_owned(),
				field: self.ty.significant_field(slot).name().unwrap_or_default().to_owned(),
			});
		}

		let layout = self.ty.layout();
		let mut out = Writer::with_capacity(layout.width(), layout.byte_order());
		let mut values = self.values.iter();
		for field in self.ty.fields() {
			let value = if field.is_significant() { values.next().and_then(Option::as_ref) } else { None };
			field.encode(value, &mut out)?;
		}
		debug_assert_eq!(out.len(), layout.width());

		log::trace!("packed {} into {} bytes", self.ty.name(), out.len());
		Ok(out.into_bytes())
	}

	/// Decode `buffer` into a new instance; its length must equal the layout width.
	pub fn unpack(ty: &Arc<StructType>, buffer: &[u8]) -> Result<Self> {
		let layout = ty.layout();
		if buffer.len() != layout.width() {
			return Err(LayoutError::LengthMismatch {
				struct_name: ty.name().to_owned(),
				expected: layout.width(),
				got: buffer.len(),
			});
		}

		let mut cursor = Cursor::new(buffer);
		let mut decoded = Vec::with_capacity(ty.significant_len());
		for field in ty.fields() {
			if let Some(value) = field.decode(&mut cursor, layout.byte_order())? {
				decoded.push(value);
			}
		}

		log::trace!("unpacked {} from {} bytes", ty.name(), buffer.len());
		let names = ty.significant_fields().map(|field| field.name().unwrap_or_default());
		Self::construct(ty, names.zip(decoded))
	}

	fn slot(&self, name: &str) -> Result<usize> {
		self.ty.slot(name).ok_or_else(|| self.ty.unknown_field(name))
	}
}

impl PartialEq for StructInstance {
	fn eq(&self, other: &Self) -> bool {
		self.ty.type_id() == other.ty.type_id() && self.values == other.values
	}
}

impl fmt::Display for StructInstance {
	/// C-like rendering listing every field, padding included, with current values.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{} {{", self.ty.name())?;
		let mut values = self.values.iter();
		for field in self.ty.fields() {
			if !field.is_significant() {
				writeln!(f, "    {field};")?;
				continue;
			}
			match values.next().and_then(Option::as_ref) {
				Some(value) => writeln!(f, "    {field} = {value};")?,
				None => writeln!(f, "    {field} = <unset>;")?,
			}
		}
		write!(f, "}}")
	}
}

#[cfg(test)]
mod tests;
