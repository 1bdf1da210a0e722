use crate::layout::{ErrorKind, FormatCode, LayoutError, POINTER_SIZE, Scalar};

#[test]
fn parses_scalar_codes_with_standard_widths() {
	let cases = [
		("?", 1),
		("b", 1),
		("B", 1),
		("h", 2),
		("H", 2),
		("i", 4),
		("I", 4),
		("l", 4),
		("L", 4),
		("q", 8),
		("Q", 8),
		("f", 4),
		("d", 8),
		("c", 1),
		("P", POINTER_SIZE),
	];
	for (token, width) in cases {
		let code = FormatCode::parse(token).expect("scalar parses");
		assert_eq!(code.width(), width, "width of {token}");
		assert_eq!(code.to_string(), token);
	}
}

#[test]
fn parses_byte_runs_and_padding() {
	assert_eq!(FormatCode::parse("12s").expect("run parses"), FormatCode::Bytes(12));
	assert_eq!(FormatCode::parse(" 4x ").expect("padding parses"), FormatCode::Pad(4));
	assert_eq!(FormatCode::parse("s").expect("bare run parses"), FormatCode::Bytes(1));
	assert_eq!(FormatCode::parse("x").expect("bare padding parses"), FormatCode::Pad(1));
}

#[test]
fn rejects_non_positive_lengths() {
	for token in ["0s", "-1s", "0x", "-12x"] {
		let err = FormatCode::parse(token).expect_err("non-positive length should fail");
		assert!(matches!(err, LayoutError::NonPositiveLength { .. }), "{token}: {err:?}");
		assert_eq!(err.kind(), ErrorKind::Configuration);
	}
}

#[test]
fn rejects_unknown_and_prefixed_tokens() {
	for token in ["", "   ", "z", "<I", "!H", "3p", "1.5s", "ab"] {
		let err = FormatCode::parse(token).expect_err("token should be rejected");
		assert!(matches!(err, LayoutError::UnsupportedFormat { .. }), "{token:?}: {err:?}");
	}
}

#[test]
fn rejects_counted_scalars() {
	let err = FormatCode::parse("3I").expect_err("scalar arrays are unsupported");
	assert_eq!(err, LayoutError::RepeatedScalar { token: "3I".to_owned() });
}

#[test]
fn scalars_have_no_length() {
	let err = FormatCode::Scalar(Scalar::U32).length().expect_err("scalar has no length");
	assert_eq!(err.kind(), ErrorKind::Type);
	assert_eq!(FormatCode::Bytes(9).length().expect("run has length"), 9);
	assert_eq!(FormatCode::Pad(3).length().expect("padding has length"), 3);
}

#[test]
fn integer_bounds_follow_width_and_sign() {
	assert_eq!(Scalar::U8.int_bounds(), Some((0, 255)));
	assert_eq!(Scalar::I16.int_bounds(), Some((-32768, 32767)));
	assert_eq!(Scalar::U64.int_bounds(), Some((0, u64::MAX as i128)));
	assert_eq!(Scalar::I64.int_bounds(), Some((i64::MIN as i128, i64::MAX as i128)));
	assert_eq!(Scalar::F32.int_bounds(), None);
}
