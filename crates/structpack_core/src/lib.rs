//! Declarative fixed-layout binary structures: field descriptors, compiled layouts, and pack/unpack.

/// Field descriptors, compiled structure types, and structure instances.
pub mod layout;
