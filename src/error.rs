use std::io;
use thiserror::Error;

/// Errors raised by the containers and analyses in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Insert into a heap or queue that already holds `capacity` entries.
    #[error("capacity exceeded: at most {capacity} entries fit")]
    CapacityExceeded { capacity: usize },

    /// Extract, peek or dequeue on an empty collection.
    #[error("collection is empty")]
    EmptyCollection,

    /// A vertex or slot index outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `decrease_key` called with a key larger than the current one.
    #[error("cannot raise key from {current} to {requested}")]
    InvalidKeyUpdate { current: u64, requested: u64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed adjacency-matrix input. `line` is 1-based.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Returns `IndexOutOfRange` unless `index < len`.
    pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, len })
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(Error::check_index(2, 3).is_ok());
        assert!(matches!(
            Error::check_index(3, 3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_messages() {
        let err = Error::InvalidKeyUpdate {
            current: 4,
            requested: 9,
        };
        assert_eq!(err.to_string(), "cannot raise key from 4 to 9");
        assert_eq!(
            Error::parse(2, "bad weight").to_string(),
            "parse error on line 2: bad weight"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
