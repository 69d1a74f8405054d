use thiserror::Error;

use crate::Symbol;

/// Errors produced by the codec and the container layer.
#[derive(Debug, Error)]
pub enum HuffError {
    /// Reading or writing the underlying file or stream failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The container header or the serialized frequency table is
    /// inconsistent with the rest of the file.
    #[error("corrupt container: {0}")]
    CorruptContainer(String),

    /// A symbol was encoded against a code table built from different data.
    #[error("symbol {:?} has no entry in the code table", .0)]
    MissingCode(Symbol),

    /// The container header stores the symbol count as a 32-bit integer.
    #[error("input holds {0} symbols, more than a container can describe")]
    InputTooLarge(u64),
}
