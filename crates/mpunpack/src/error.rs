use thiserror::Error;

/// Errors raised while unpacking.
///
/// Every condition is reported to the immediate caller of the operation that
/// detected it; nothing is retried internally.
#[derive(Error, Debug)]
pub enum UnpackError {
    /// The decode engine rejected the byte sequence.
    ///
    /// `offset` is absolute: the stream position for buffered sessions, or
    /// the index into the caller's buffer for the execute and one-shot paths.
    #[error("parse error at offset {offset}: {source}")]
    Malformed {
        offset: usize,
        source: SyntaxError,
    },

    /// The input ended in the middle of a value.
    #[error("insufficient bytes")]
    TruncatedInput,

    /// A one-shot decode completed a value but left bytes behind it.
    #[error("extra bytes: {extra} left after a {consumed}-byte value")]
    ExtraBytes { consumed: usize, extra: usize },

    /// The caller-supplied offset does not lie below the limit.
    #[error("offset {offset} is not below the limit {limit}")]
    InvalidOffset { offset: usize, limit: usize },

    /// The caller-supplied limit runs past the end of the buffer.
    #[error("limit {limit} exceeds the buffer length {len}")]
    LimitOutOfBounds { limit: usize, len: usize },

    /// The byte source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Grammar-level causes of [`UnpackError::Malformed`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unknown type tag {0:#04x}")]
    UnknownTag(u8),
    #[error("containers nested deeper than {0}")]
    DepthExceeded(usize),
}

impl UnpackError {
    /// Returns the grammar-level cause when this is a parse error.
    #[must_use]
    pub fn syntax(&self) -> Option<SyntaxError> {
        match self {
            Self::Malformed { source, .. } => Some(*source),
            _ => None,
        }
    }
}
