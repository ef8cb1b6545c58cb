//! Codec error types.

use thiserror::Error;

use crate::tag::ApplicationTag;

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while encoding or decoding application data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The destination buffer cannot hold the encoded value.
    #[error("buffer too small: need {needed} octets, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// The input ended before the tag or its content was complete.
    #[error("truncated data: need {needed} octets, have {available}")]
    Truncated { needed: usize, available: usize },

    /// A context-specific tag was found where application data was expected.
    #[error("context tag {0} where an application tag was expected")]
    ContextTag(u8),

    /// Tag numbers 13-15 are reserved for application tags.
    #[error("reserved application tag {0}")]
    ReservedTag(u8),

    /// The tag is valid but this codec does not handle it.
    #[error("unsupported application tag {0}")]
    UnsupportedTag(ApplicationTag),

    /// The content length is not valid for the tag.
    #[error("invalid length {length} for {tag}")]
    InvalidLength { tag: ApplicationTag, length: usize },

    /// Only UTF-8 character strings are supported.
    #[error("unsupported character set {0}")]
    UnsupportedCharacterSet(u8),

    #[error("character string is not valid UTF-8")]
    InvalidUtf8,

    /// The unused-bits octet of a bit string is out of range.
    #[error("invalid bit string unused-bits count {0}")]
    InvalidBitString(u8),
}
