use std::sync::Arc;

use crate::layout::{ErrorKind, LayoutError, LayoutOptions, StructBuilder, StructInstance, StructType, Value};

fn foo() -> Arc<StructType> {
	StructBuilder::new("Foo")
		.format("a", "I")
		.padding("pad", 12)
		.format("b", "B")
		.build()
		.expect("struct builds")
}

#[test]
fn new_instances_start_unset() {
	let ty = foo();
	let foo = StructInstance::new(&ty);
	assert_eq!(foo.get("a").expect("known field"), None);
	assert!(!foo.is_complete());
}

#[test]
fn construct_rejects_unknown_and_padding_names() {
	let ty = foo();
	let err = StructInstance::construct(&ty, [("zzz", 1_u32)]).expect_err("unknown field");
	assert_eq!(
		err,
		LayoutError::UnknownField {
			struct_name: "Foo".to_owned(),
			field: "zzz".to_owned()
		}
	);
	assert_eq!(err.kind(), ErrorKind::Value);

	let err = StructInstance::construct(&ty, [("pad", 0_u32)]).expect_err("padding is not addressable");
	assert!(matches!(err, LayoutError::UnknownField { .. }));
}

#[test]
fn packing_with_unset_fields_fails() {
	let ty = foo();
	let foo = StructInstance::construct(&ty, [("a", 1_u32)]).expect("construct");
	let err = foo.pack().expect_err("b is unset");
	assert_eq!(
		err,
		LayoutError::UnsetField {
			struct_name: "Foo".to_owned(),
			field: "b".to_owned()
		}
	);
	assert_eq!(err.kind(), ErrorKind::Completeness);
}

#[test]
fn packs_foo_scenario() {
	let ty = foo();
	let foo = StructInstance::construct(&ty, [("a", 0x1234_u32), ("b", 0xAB)]).expect("construct");
	let bytes = foo.pack().expect("pack");

	assert_eq!(bytes.len(), 17);
	assert_eq!(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 0x1234);
	assert!(bytes[4..16].iter().all(|byte| *byte == 0));
	assert_eq!(bytes[16], 0xAB);

	let back = StructInstance::unpack(&ty, &bytes).expect("unpack");
	assert_eq!(back, foo);
}

#[test]
fn unpack_ignores_padding_contents() {
	let ty = foo();
	let mut bytes = vec![0xFF; 17];
	bytes[..4].copy_from_slice(&7_u32.to_le_bytes());
	bytes[16] = 1;
	let foo = StructInstance::unpack(&ty, &bytes).expect("unpack");
	assert_eq!(foo.get("a").expect("known"), Some(&Value::U64(7)));
	assert_eq!(foo.get("b").expect("known"), Some(&Value::U64(1)));
}

#[test]
fn unpack_enforces_exact_length() {
	let ty = foo();
	for len in [0, 1, 16, 18, 64] {
		let err = StructInstance::unpack(&ty, &vec![0; len]).expect_err("wrong length");
		assert_eq!(
			err,
			LayoutError::LengthMismatch {
				struct_name: "Foo".to_owned(),
				expected: 17,
				got: len
			}
		);
		assert_eq!(err.kind(), ErrorKind::LengthMismatch);
	}
}

#[test]
fn big_endian_layouts_pack_most_significant_first() {
	let ty = StructBuilder::new("Net")
		.options(LayoutOptions::network())
		.format("port", "H")
		.format("addr", "I")
		.build()
		.expect("struct builds");
	let net = StructInstance::construct(&ty, [("port", 0x1F90_u32), ("addr", 0x7F00_0001)]).expect("construct");
	assert_eq!(net.pack().expect("pack"), vec![0x1F, 0x90, 0x7F, 0x00, 0x00, 0x01]);
}

#[test]
fn string_fields_round_trip() {
	let ty = StructBuilder::new("Strs")
		.string("a", 8, "ascii", false)
		.string("b", 9, "ascii", true)
		.build()
		.expect("struct builds");
	let strs = StructInstance::construct(&ty, [("a", "0123456\0"), ("b", "abc")]).expect("construct");
	let bytes = strs.pack().expect("pack");
	assert_eq!(&bytes[8..], b"abc\0\0\0\0\0\0");
	assert_eq!(StructInstance::unpack(&ty, &bytes).expect("unpack"), strs);
}

#[test]
fn strip_null_drops_trailing_nulls_only_on_unpack() {
	let ty = StructBuilder::new("Label").string("text", 6, "ascii", true).build().expect("struct builds");
	let label = StructInstance::construct(&ty, [("text", "hi\0")]).expect("construct");
	assert_eq!(label.get("text").expect("known field"), Some(&Value::from("hi\0")));

	let bytes = label.pack().expect("pack");
	assert_eq!(bytes, b"hi\0\0\0\0");
	let back = StructInstance::unpack(&ty, &bytes).expect("unpack");
	assert_eq!(back.get("text").expect("known field"), Some(&Value::from("hi")));
	assert_ne!(back, label);
}

#[test]
fn set_rejects_overlong_strings_without_truncating() {
	let ty = StructBuilder::new("Tag").string("tag", 4, "ascii", true).build().expect("struct builds");
	let mut tag = StructInstance::construct(&ty, [("tag", "abcd")]).expect("construct");
	let err = tag.set("tag", "abcde").expect_err("too long");
	assert!(matches!(err, LayoutError::ValueTooLong { len: 5, max: 4, .. }));
	assert_eq!(tag.get("tag").expect("known"), Some(&Value::from("abcd")));
}

#[test]
fn equality_requires_same_type_and_values() {
	let ty = foo();
	let left = StructInstance::construct(&ty, [("a", 1_u32), ("b", 2)]).expect("construct");
	let mut right = left.clone();
	assert_eq!(left, right);

	right.set("b", 3_u8).expect("set");
	assert_ne!(left, right);

	let twin = foo();
	let other = StructInstance::construct(&twin, [("a", 1_u32), ("b", 2)]).expect("construct");
	assert_ne!(left, other, "instances of different types never compare equal");
}

#[test]
fn clear_returns_field_to_unset() {
	let ty = foo();
	let mut foo = StructInstance::construct(&ty, [("a", 5_u32), ("b", 6)]).expect("construct");
	assert_eq!(foo.clear("a").expect("known"), Some(Value::U64(5)));
	assert!(matches!(foo.pack(), Err(LayoutError::UnsetField { .. })));
}

#[test]
fn values_iterate_in_declaration_order() {
	let ty = foo();
	let foo = StructInstance::construct(&ty, [("b", 9_u32)]).expect("construct");
	let values: Vec<_> = foo.values().collect();
	assert_eq!(values, [("a", None), ("b", Some(&Value::U64(9)))]);
}

#[test]
fn renders_like_a_c_struct() {
	let ty = StructBuilder::new("Foo")
		.format("a", "I")
		.padding("pad", 12)
		.string("name", 8, "ascii", true)
		.format("b", "B")
		.build()
		.expect("struct builds");
	let foo = StructInstance::construct(&ty, [(String::from("a"), Value::from(0x1234_u32)), ("name".into(), "hi".into())]).expect("construct");
	assert_eq!(
		foo.to_string(),
		"Foo {\n    unsigned int a = 4660;\n    char[12];\n    char name[8] = \"hi\";\n    unsigned char b = <unset>;\n}"
	);
}
