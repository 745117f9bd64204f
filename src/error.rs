//! Error types for tree serialization and deserialization.

use thiserror::Error;

/// Error variants for NTS encoding and decoding.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream does not begin with a complete `ntsf` header.
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    /// The stream ended in the middle of a block.
    #[error("truncated stream: {0}")]
    TruncatedStream(&'static str),

    /// No root node could be parsed from the given data.
    #[error("could not parse any nodes from the given data")]
    EmptyStream,

    /// Data continued after the root's last descendant was attached.
    #[error("trailing data after the tree was completed")]
    TrailingData,

    /// A word contains a byte inside the codec's reserved tag range.
    #[error("illegal byte {byte:#04x} in word {word:?}")]
    IllegalByte { byte: u8, word: String },

    /// A word contains a reserved textual framing character.
    #[error("illegal character {ch:?} in word {word:?}")]
    IllegalChar { ch: char, word: String },

    /// Words must be non-empty.
    #[error("empty word")]
    EmptyWord,

    /// A back-reference index points outside the dictionary or at an
    /// empty slot.
    #[error("back-reference index {index} out of range (dictionary size {size})")]
    IndexOutOfRange { index: usize, size: usize },

    /// A child-count field is wider than this codec can represent.
    #[error("child count field of {0} bytes is outside the supported range")]
    CountOverflow(usize),

    /// A textual count or index field was not a decimal number.
    #[error("expected decimal digits, found {0:?}")]
    BadNumber(String),

    /// Codec parameters outside the representable range.
    #[error("invalid codec parameters: {0}")]
    InvalidCodec(&'static str),

    /// An I/O error occurred during encoding or decoding.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for NTS operations.
pub type Result<T> = std::result::Result<T, Error>;
