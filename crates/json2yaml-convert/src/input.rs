//! Input sources read in from the command line.

use std::fmt;
use std::io;
use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

/// An error related to reading an input source.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file could not be opened or read.
    #[error("failed to read file `{}`", .path.display())]
    File {
        /// The path of the file.
        path: PathBuf,

        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The standard input stream could not be read.
    #[error("failed to read from standard input")]
    Stdin(#[source] io::Error),
}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The source of a document to convert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// A file on the local filesystem.
    File(PathBuf),

    /// The standard input stream of the process.
    Stdin,
}

impl Source {
    /// Creates a source from an optional path argument.
    ///
    /// The absence of a path selects standard input.
    pub fn new(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(path),
            None => Self::Stdin,
        }
    }

    /// Reads the complete contents of the source.
    ///
    /// Standard input is read until end-of-stream.
    pub fn read(&self) -> Result<Vec<u8>> {
        self.read_from(io::stdin().lock())
    }

    /// Reads the complete contents of the source, using `stdin` in place of
    /// the process's standard input stream.
    ///
    /// The reader is not touched when the source is a file.
    pub fn read_from<R: Read>(&self, mut stdin: R) -> Result<Vec<u8>> {
        let bytes = match self {
            Self::File(path) => std::fs::read(path).map_err(|source| Error::File {
                path: path.clone(),
                source,
            })?,
            Self::Stdin => {
                let mut bytes = Vec::new();
                stdin.read_to_end(&mut bytes).map_err(Error::Stdin)?;
                bytes
            }
        };

        debug!("read {len} byte(s) from {source}", len = bytes.len(), source = self);
        Ok(bytes)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file `{}`", path.display()),
            Self::Stdin => write!(f, "standard input"),
        }
    }
}
