/// JSON and command-line value conversion.
pub mod convert;
/// JSON structure definitions.
pub mod def;
/// Definition inspection command.
pub mod describe;
/// CLI error type.
pub mod error;
/// Value packing command.
pub mod pack;
/// Byte unpacking command.
pub mod unpack;

pub use error::{CliError, Result};
