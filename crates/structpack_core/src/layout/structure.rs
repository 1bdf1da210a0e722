use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::layout::field::next_ordinal;
use crate::layout::{ByteOrder, Field, FormatCode, LayoutError, LayoutOptions, Owner, Result};

/// Compiled byte layout of one structure type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
	byte_order: ByteOrder,
	formats: Vec<FormatCode>,
	offsets: Vec<usize>,
	width: usize,
}

impl Layout {
	fn compile(struct_name: &str, fields: &[Field], byte_order: ByteOrder) -> Result<Self> {
		let mut offsets = Vec::with_capacity(fields.len());
		let mut width = 0_usize;
		for field in fields {
			offsets.push(width);
			width = width.checked_add(field.width()).ok_or_else(|| LayoutError::LayoutTooLarge {
				struct_name: struct_name.to_owned(),
			})?;
		}

		Ok(Self {
			byte_order,
			formats: fields.iter().map(Field::format).collect(),
			offsets,
			width,
		})
	}

	/// Byte order applied to multi-byte scalars.
	pub fn byte_order(&self) -> ByteOrder {
		self.byte_order
	}

	/// Format codes in declaration order, padding included.
	pub fn formats(&self) -> &[FormatCode] {
		&self.formats
	}

	/// Byte offset of each field, parallel to [`Layout::formats`].
	pub fn offsets(&self) -> &[usize] {
		&self.offsets
	}

	/// Total packed width in bytes.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Struct-module style descriptor, e.g. `<I 12x B`.
	pub fn descriptor(&self) -> String {
		let tokens: Vec<String> = self.formats.iter().map(ToString::to_string).collect();
		format!("{}{}", self.byte_order.prefix(), tokens.join(" "))
	}
}

/// Compiled, immutable description of one binary record shape.
#[derive(Debug)]
pub struct StructType {
	type_id: u64,
	name: Box<str>,
	options: LayoutOptions,
	fields: Vec<Field>,
	by_name: HashMap<Box<str>, usize>,
	significant: Vec<usize>,
	slots: HashMap<Box<str>, usize>,
	layout: Layout,
}

impl StructType {
	/// Compile a structure type from fields in any order.
	///
	/// Fields are ordered by their declaration order, not by the order the
	/// collection yields them, so a `HashMap` of members compiles the same as
	/// the fields written out in sequence.
	pub fn from_members<I, S>(name: &str, members: I, options: LayoutOptions) -> Result<Arc<Self>>
	where
		I: IntoIterator<Item = (S, Field)>,
		S: Into<String>,
	{
		let mut members: Vec<(String, Field)> = members.into_iter().map(|(field_name, field)| (field_name.into(), field)).collect();
		members.sort_by_key(|(_, field)| field.declaration_order());
		Self::compile(name, members, options)
	}

	/// Compile fields already in declaration order.
	fn compile(name: &str, members: Vec<(String, Field)>, options: LayoutOptions) -> Result<Arc<Self>> {
		check_ident(name, name)?;

		let owner = Owner {
			type_id: next_ordinal(),
			type_name: name.into(),
		};

		let mut by_name = HashMap::with_capacity(members.len());
		let mut fields = Vec::with_capacity(members.len());
		for (idx, (field_name, mut field)) in members.into_iter().enumerate() {
			check_ident(name, &field_name)?;
			if by_name.insert(field_name.clone().into_boxed_str(), idx).is_some() {
				return Err(LayoutError::DuplicateField {
					struct_name: name.to_owned(),
					field: field_name,
				});
			}
			field.bind(&field_name, owner.clone());
			fields.push(field);
		}

		let significant: Vec<usize> = (0..fields.len()).filter(|idx| fields[*idx].is_significant()).collect();
		let slots = significant
			.iter()
			.enumerate()
			.filter_map(|(slot, idx)| fields[*idx].name().map(|field_name| (Box::from(field_name), slot)))
			.collect();
		let layout = Layout::compile(name, &fields, options.byte_order)?;

		log::debug!(
			"compiled struct {name}: {} fields ({} significant), {} bytes, {} endian, layout {:?}",
			fields.len(),
			significant.len(),
			layout.width(),
			layout.byte_order().as_str(),
			layout.descriptor()
		);

		Ok(Arc::new(Self {
			type_id: owner.type_id,
			name: owner.type_name,
			options,
			fields,
			by_name,
			significant,
			slots,
			layout,
		}))
	}

	/// Unique id; instances of different types never compare equal.
	pub fn type_id(&self) -> u64 {
		self.type_id
	}

	/// Structure type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Options fixed at build time.
	pub fn options(&self) -> LayoutOptions {
		self.options
	}

	/// All fields in declaration order, padding included.
	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	/// Look up any field, padding included, by name.
	pub fn field(&self, name: &str) -> Option<&Field> {
		self.by_name.get(name).map(|idx| &self.fields[*idx])
	}

	/// Fields that carry values, in declaration order.
	pub fn significant_fields(&self) -> impl ExactSizeIterator<Item = &Field> + '_ {
		self.significant.iter().map(|idx| &self.fields[*idx])
	}

	/// Number of significant fields.
	pub fn significant_len(&self) -> usize {
		self.significant.len()
	}

	/// Compiled byte layout.
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	/// Total packed width in bytes.
	pub fn width(&self) -> usize {
		self.layout.width()
	}

	/// Position of a significant field in the value sequence.
	pub(crate) fn slot(&self, name: &str) -> Option<usize> {
		self.slots.get(name).copied()
	}

	pub(crate) fn significant_field(&self, slot: usize) -> &Field {
		&self.fields[self.significant[slot]]
	}

	pub(crate) fn unknown_field(&self, name: &str) -> LayoutError {
		LayoutError::UnknownField {
			struct_name: self.name.to_string(),
			field: name.to_owned(),
		}
	}
}

impl fmt::Display for StructType {
	/// C-like declaration without values.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "struct {} {{", self.name)?;
		for field in &self.fields {
			writeln!(f, "    {field};")?;
		}
		write!(f, "}};")
	}
}

/// Ordered builder for [`StructType`]; fields keep the order they are declared in.
#[derive(Debug)]
pub struct StructBuilder {
	name: String,
	options: LayoutOptions,
	members: Vec<(String, Field)>,
	error: Option<LayoutError>,
}

impl StructBuilder {
	/// Start a structure definition.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			options: LayoutOptions::default(),
			members: Vec::new(),
			error: None,
		}
	}

	/// Replace the layout options.
	pub fn options(mut self, options: LayoutOptions) -> Self {
		self.options = options;
		self
	}

	/// Set only the byte order.
	pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
		self.options.byte_order = byte_order;
		self
	}

	/// Declare a field.
	pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
		self.members.push((name.into(), field));
		self
	}

	/// Declare a field from a format token; parse errors surface from [`StructBuilder::build`].
	pub fn format(self, name: impl Into<String>, token: &str) -> Self {
		match Field::new(token) {
			Ok(field) => self.field(name, field),
			Err(err) => self.fail(err),
		}
	}

	/// Declare a text field; errors surface from [`StructBuilder::build`].
	pub fn string(self, name: impl Into<String>, len: usize, encoding: &str, strip_null: bool) -> Self {
		match Field::string(len, encoding, strip_null) {
			Ok(field) => self.field(name, field),
			Err(err) => self.fail(err),
		}
	}

	/// Declare padding; errors surface from [`StructBuilder::build`].
	pub fn padding(self, name: impl Into<String>, n_bytes: usize) -> Self {
		match Field::padding(n_bytes) {
			Ok(field) => self.field(name, field),
			Err(err) => self.fail(err),
		}
	}

	fn fail(mut self, err: LayoutError) -> Self {
		self.error.get_or_insert(err);
		self
	}

	/// Compile the declared fields.
	pub fn build(self) -> Result<Arc<StructType>> {
		if let Some(err) = self.error {
			return Err(err);
		}
		StructType::compile(&self.name, self.members, self.options)
	}
}

fn check_ident(struct_name: &str, name: &str) -> Result<()> {
	let mut chars = name.chars();
	let valid = chars.next().is_some_and(|ch| ch == '_' || ch.is_alphabetic()) && chars.all(|ch| ch == '_' || ch.is_alphanumeric());
	if !valid {
		return Err(LayoutError::InvalidName {
			struct_name: struct_name.to_owned(),
			name: name.to_owned(),
		});
	}
	Ok(())
}
