//! Facilities for converting a JSON document into an equivalent YAML
//! document.
//!
//! Conversion is a two step pipeline:
//!
//! 1. An input [`Source`] is read fully into memory (either a file or the
//!    standard input stream).
//! 2. The bytes are decoded into a [`Document`], which is then encoded as
//!    YAML text.
//!
//! ```
//! let yaml = json2yaml_convert::convert(br#"{"key": "value"}"#).unwrap();
//! assert_eq!(yaml, "key: value\n");
//! ```

use thiserror::Error;

pub mod document;
pub mod input;

pub use document::Document;
pub use document::convert;
pub use input::Source;

/// An error encountered while converting an input source.
#[derive(Error, Debug)]
pub enum Error {
    /// The input could not be read.
    #[error(transparent)]
    Read(#[from] input::Error),

    /// The input could not be converted.
    #[error(transparent)]
    Convert(#[from] document::Error),
}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Reads the given source and converts its contents to YAML text.
///
/// A read failure short-circuits before any decoding is attempted.
pub fn convert_source(source: &Source) -> Result<String> {
    let bytes = source.read()?;
    Ok(convert(&bytes)?)
}
