//! State access for terrain: the reader interface, typed output values, and
//! value formatting.
//!
//! The CLI only needs one thing from the state subsystem: given an optional
//! path override, the mapping of output names to [`OutputValue`]s. That need is
//! the [`StateReader`] trait. [`LocalStateReader`] implements it over a JSON
//! state document on disk.

#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod reader;
pub mod value;

pub use error::{RawValueError, StateError, TypeParseError};
pub use format::{format_value, raw_string};
pub use reader::{LocalStateReader, StateReader, MAX_STATE_VERSION};
pub use value::{OutputValue, Outputs, ValueType};
