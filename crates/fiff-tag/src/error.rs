//! Tag-layer error types.

/// Errors that can occur while reading or writing FIFF tags.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// Underlying stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tag's data type is not the one the caller asked for.
    #[error("tag {kind}: expected {expected} data, found {found}")]
    UnexpectedType {
        kind: i32,
        expected: &'static str,
        found: &'static str,
    },

    /// The payload bytes do not decode as their declared type.
    #[error("tag {kind}: malformed payload: {detail}")]
    MalformedPayload { kind: i32, detail: String },

    #[error("tag {kind}: string payload is not valid UTF-8")]
    InvalidUtf8 { kind: i32 },

    /// `end_block` was called for a block other than the innermost open one.
    #[error("block mismatch: innermost open block is {expected}, tried to close {found}")]
    BlockMismatch { expected: i32, found: i32 },

    #[error("cannot close block {kind}: no block is open")]
    NoOpenBlock { kind: i32 },

    /// The writer was finished with blocks still open.
    #[error("{depth} block(s) left open")]
    UnclosedBlock { depth: usize },

    /// The payload does not fit in the 32-bit size field.
    #[error("tag {kind}: payload of {size} bytes exceeds the tag size limit")]
    PayloadTooLarge { kind: i32, size: usize },
}

/// Result type alias for tag operations.
pub type Result<T> = std::result::Result<T, TagError>;
