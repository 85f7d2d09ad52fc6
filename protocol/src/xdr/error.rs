//! Failures for the XDR codec.
//!
//! Encoding is total: bounded fields are checked when their holders are
//! built, so every in-memory value that type-checks can be written and read
//! back. Decoding is where hostile or corrupted bytes show up, so decode
//! failures name the offset they happened at.

use thiserror::Error;

/// Errors produced while decoding XDR bytes or building bounded fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    /// Fewer bytes remain than a fixed-width field requires.
    #[error("truncated input at offset {offset}: need {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A declared length exceeds either the remaining input or the bound
    /// allowed for the field.
    #[error("length mismatch at offset {offset}: declared {declared}, allowed {allowed}")]
    LengthMismatch {
        offset: usize,
        declared: usize,
        allowed: usize,
    },

    /// Padding after an opaque block or string contained a nonzero byte.
    #[error("nonzero padding at offset {offset}")]
    InvalidPadding { offset: usize },

    /// An optional-value presence flag other than 0 or 1.
    #[error("invalid presence flag {flag} at offset {offset}")]
    InvalidDiscriminant { offset: usize, flag: u32 },

    /// A union discriminant that names no known arm.
    #[error("unknown {union} discriminant {discriminant} at offset {offset}")]
    UnknownVariant {
        union: &'static str,
        discriminant: i32,
        offset: usize,
    },

    /// String bytes were not UTF-8, or a base64 wrapper was malformed.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A complete value was decoded but input bytes were left over.
    #[error("{remaining} trailing bytes after decoded value")]
    TrailingBytes { remaining: usize },

    /// A bounded field was given more than its maximum length.
    #[error("length {len} exceeds maximum {max}")]
    TooLong { len: usize, max: usize },
}
