//! Error types for the codec.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Frequency table is empty or holds a zero count.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Nothing to encode.
    #[error("input text is empty")]
    EmptyInput,

    /// A character has no code in the table.
    #[error("symbol {0:?} has no code in the table")]
    UnknownSymbol(char),

    /// Delimiter missing, or the frequency table segment does not parse.
    #[error("malformed header: {message}")]
    MalformedHeader {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Packed body does not describe a walk through the tree.
    #[error("corrupt stream at bit {bit_offset}: {message}")]
    CorruptStream { message: String, bit_offset: usize },
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedHeader {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn corrupt(message: impl Into<String>, bit_offset: usize) -> Self {
        Error::CorruptStream {
            message: message.into(),
            bit_offset,
        }
    }
}
