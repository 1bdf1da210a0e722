//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read and parse a JSON fixture.
pub fn fixture_json(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let raw = std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} is readable: {err}", path.display()));
	serde_json::from_slice(&raw).unwrap_or_else(|err| panic!("fixture {} is valid json: {err}", path.display()))
}

/// Decode a hex literal, ignoring ASCII whitespace.
pub fn hex_bytes(text: &str) -> Vec<u8> {
	let compact: String = text.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
	hex::decode(&compact).unwrap_or_else(|err| panic!("hex literal {text:?} is valid: {err}"))
}
