mod bytes;
mod encoding;
mod error;
mod field;
mod format;
mod instance;
mod options;
mod structure;
mod value;

/// Text codecs usable by string fields.
pub use encoding::TextEncoding;
/// Error, error classification, and result aliases.
pub use error::{ErrorKind, LayoutError, Result};
/// Field descriptors and their binding metadata.
pub use field::{Field, FieldKind, Owner};
/// Wire format codes.
pub use format::{FormatCode, POINTER_SIZE, Scalar};
/// Structure instances holding field values.
pub use instance::StructInstance;
/// Byte order and per-definition layout options.
pub use options::{ByteOrder, LayoutOptions};
/// Compiled structure types and their builder.
pub use structure::{Layout, StructBuilder, StructType};
/// Runtime field values.
pub use value::Value;
