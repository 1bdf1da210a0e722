use structpack::layout::{Field, FieldKind, FormatCode, Scalar, Value};

use crate::cmd::{CliError, Result};

/// Read a `--set` right-hand side according to the field's format.
pub fn parse_text_value(field: &Field, raw: &str) -> Result<Value> {
	let invalid = || CliError::InvalidValue {
		field: field.name().unwrap_or_default().to_owned(),
		value: format!("{raw:?}"),
	};

	match field.format() {
		FormatCode::Scalar(Scalar::Bool) => match raw.trim().to_ascii_lowercase().as_str() {
			"true" | "1" | "yes" => Ok(Value::Bool(true)),
			"false" | "0" | "no" => Ok(Value::Bool(false)),
			_ => Err(invalid()),
		},
		FormatCode::Scalar(Scalar::F32 | Scalar::F64) => raw.trim().parse::<f64>().map(Value::F64).map_err(|_| invalid()),
		// One char in U+0000..=U+00FF, the inverse of `value_to_json`.
		FormatCode::Scalar(Scalar::Char) => {
			let mut chars = raw.chars();
			match (chars.next(), chars.next()) {
				(Some(ch), None) => u8::try_from(ch).map(Value::Char).map_err(|_| invalid()),
				_ => Err(invalid()),
			}
		}
		FormatCode::Scalar(Scalar::Pointer) => parse_int(raw).and_then(|value| value.as_u64()).map(Value::Ptr).ok_or_else(invalid),
		FormatCode::Scalar(_) => parse_int(raw).ok_or_else(invalid),
		FormatCode::Bytes(_) if field.kind() == FieldKind::Plain => match raw.strip_prefix("hex:") {
			Some(digits) => Ok(Value::Bytes(hex::decode(digits)?)),
			None => Ok(Value::Bytes(raw.as_bytes().to_vec())),
		},
		FormatCode::Bytes(_) | FormatCode::Pad(_) => Ok(Value::String(raw.to_owned())),
	}
}

/// Parse decimal or `0x`-prefixed hex integer literal, optionally negative.
fn parse_int(raw: &str) -> Option<Value> {
	let trimmed = raw.trim();
	let (negative, digits) = match trimmed.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, trimmed),
	};
	let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
		Some(hex_digits) => u64::from_str_radix(hex_digits, 16).ok()?,
		None => digits.parse::<u64>().ok()?,
	};
	if !negative {
		return Some(Value::U64(magnitude));
	}
	let wide = -i128::from(magnitude);
	i64::try_from(wide).ok().map(Value::I64)
}

/// Convert a JSON value from a values file into an engine value.
pub fn json_to_value(field: &Field, json: &serde_json::Value) -> Result<Value> {
	let invalid = || CliError::InvalidValue {
		field: field.name().unwrap_or_default().to_owned(),
		value: json.to_string(),
	};

	match json {
		serde_json::Value::Bool(item) => Ok(Value::Bool(*item)),
		serde_json::Value::Number(item) => {
			if let Some(value) = item.as_u64() {
				Ok(Value::U64(value))
			} else if let Some(value) = item.as_i64() {
				Ok(Value::I64(value))
			} else {
				item.as_f64().map(Value::F64).ok_or_else(invalid)
			}
		}
		serde_json::Value::String(item) => parse_text_value(field, item),
		serde_json::Value::Array(items) => items
			.iter()
			.map(|item| item.as_u64().and_then(|byte| u8::try_from(byte).ok()))
			.collect::<Option<Vec<u8>>>()
			.map(Value::Bytes)
			.ok_or_else(invalid),
		serde_json::Value::Null | serde_json::Value::Object(_) => Err(invalid()),
	}
}

/// Render an engine value as JSON; byte runs become arrays of numbers.
pub fn value_to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Bool(item) => serde_json::Value::Bool(*item),
		Value::I64(item) => serde_json::Value::from(*item),
		Value::U64(item) => serde_json::Value::from(*item),
		Value::F32(item) => serde_json::Value::from(f64::from(*item)),
		Value::F64(item) => serde_json::Value::from(*item),
		Value::Char(item) => serde_json::Value::String(char::from(*item).to_string()),
		Value::Bytes(item) => serde_json::Value::from(item.clone()),
		Value::String(item) => serde_json::Value::String(item.clone()),
		Value::Ptr(item) => serde_json::Value::String(format!("0x{item:016x}")),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use structpack::layout::{Field, Scalar, Value};

	use super::{json_to_value, parse_text_value, value_to_json};

	#[test]
	fn integers_accept_hex_and_negative_literals() {
		let field = Field::scalar(Scalar::I32);
		assert_eq!(parse_text_value(&field, "0x1234").expect("hex"), Value::U64(0x1234));
		assert_eq!(parse_text_value(&field, "-7").expect("negative"), Value::I64(-7));
		assert!(parse_text_value(&field, "seven").is_err());
	}

	#[test]
	fn byte_runs_accept_hex_prefix() {
		let field = Field::bytes(4).expect("run builds");
		assert_eq!(parse_text_value(&field, "hex:00ff").expect("hex bytes"), Value::Bytes(vec![0, 0xFF]));
		assert_eq!(parse_text_value(&field, "ab").expect("text bytes"), Value::Bytes(b"ab".to_vec()));
	}

	#[test]
	fn json_arrays_become_bytes() {
		let field = Field::bytes(3).expect("run builds");
		assert_eq!(json_to_value(&field, &json!([1, 2, 3])).expect("bytes"), Value::Bytes(vec![1, 2, 3]));
		assert!(json_to_value(&field, &json!([256])).is_err());
		assert!(json_to_value(&field, &json!(null)).is_err());
	}

	#[test]
	fn pointers_render_as_hex_strings() {
		assert_eq!(value_to_json(&Value::Ptr(0x10)), json!("0x0000000000000010"));
		let field = Field::scalar(Scalar::Pointer);
		assert_eq!(json_to_value(&field, &json!("0x10")).expect("pointer"), Value::Ptr(0x10));
	}

	#[test]
	fn chars_read_back_what_json_output_writes() {
		let field = Field::scalar(Scalar::Char);
		for byte in [b'A', 0xE9, 0xFF] {
			let json = value_to_json(&Value::Char(byte));
			assert_eq!(json_to_value(&field, &json).expect("char round trips"), Value::Char(byte));
		}
		assert!(parse_text_value(&field, "\u{100}").is_err());
		assert!(parse_text_value(&field, "ab").is_err());
	}
}
