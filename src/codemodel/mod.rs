//! Codemodel reader.
//!
//! Flattens a file-API codemodel into an ordered list of [`Target`] records.
//! The root document names one detail document per target; those are fetched
//! through a caller-supplied [`ResolveSecondary`] capability so the reader
//! never touches the filesystem itself.

mod error;
mod reader;
mod target;

pub use error::{BoxError, ReadError};
pub use reader::{read, selected_configuration_name, ResolveSecondary};
pub use target::Target;
