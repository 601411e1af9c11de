//! Decoding exactly one value from a complete buffer.
//!
//! These functions keep no state. The input must hold one value and nothing
//! else: a short input is [`UnpackError::TruncatedInput`] and trailing bytes
//! are [`UnpackError::ExtraBytes`]. An [`Unpacker`](crate::Unpacker) instead
//! treats trailing bytes as the start of the next value.

use bytes::Bytes;

use crate::{
    UnpackError, UnpackerOptions,
    engine::{Engine, Progress},
    slice::Slicer,
    value::Value,
    window::{Backing, NoHooks, Window, WindowHooks},
};

/// Decodes the single value in `buf`.
///
/// Byte payloads longer than
/// [`zero_copy_threshold`](UnpackerOptions::zero_copy_threshold) are views
/// into `buf`.
///
/// # Errors
///
/// [`UnpackError::TruncatedInput`], [`UnpackError::ExtraBytes`] or
/// [`UnpackError::Malformed`].
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use mpunpack::{UnpackError, decode};
///
/// let hello = Bytes::from_static(b"\xa5hello");
/// assert_eq!(decode(&hello).unwrap().as_str(), Some("hello"));
///
/// let trailing = Bytes::from_static(b"\xa5hello\x00");
/// assert!(matches!(decode(&trailing), Err(UnpackError::ExtraBytes { consumed: 6, extra: 1 })));
/// ```
pub fn decode(buf: &Bytes) -> Result<Value, UnpackError> {
    decode_limit(buf, buf.len())
}

/// Decodes the single value in `buf[..limit]`.
///
/// # Errors
///
/// As [`decode`], plus [`UnpackError::LimitOutOfBounds`] if
/// `limit > buf.len()`.
pub fn decode_limit(buf: &Bytes, limit: usize) -> Result<Value, UnpackError> {
    decode_with(buf, limit, &UnpackerOptions::default(), &mut NoHooks)
}

/// Decodes the single value in `buf`, copying every payload.
///
/// # Errors
///
/// As [`decode`].
pub fn decode_slice(buf: &[u8]) -> Result<Value, UnpackError> {
    exactly_one(
        buf,
        &Slicer::copying(),
        UnpackerOptions::DEFAULT_MAX_DEPTH,
        &mut NoHooks,
    )
}

/// Decodes the single value in `buf[..limit]` with explicit options and host
/// hooks.
///
/// Only `zero_copy_threshold` and `max_depth` apply; there is no buffer.
///
/// # Errors
///
/// As [`decode_limit`].
pub fn decode_with(
    buf: &Bytes,
    limit: usize,
    options: &UnpackerOptions,
    hooks: &mut dyn WindowHooks,
) -> Result<Value, UnpackError> {
    if limit > buf.len() {
        return Err(UnpackError::LimitOutOfBounds {
            limit,
            len: buf.len(),
        });
    }
    let slicer = Slicer::shared(buf, 0, options.zero_copy_threshold);
    exactly_one(&buf[..limit], &slicer, options.max_depth, hooks)
}

fn exactly_one(
    input: &[u8],
    slicer: &Slicer<'_>,
    max_depth: usize,
    hooks: &mut dyn WindowHooks,
) -> Result<Value, UnpackError> {
    let mut engine = Engine::new(max_depth);
    let progress = {
        let _window = Window::open(hooks, Backing::Caller);
        engine.execute(input, slicer)
    };
    match progress.map_err(|fault| fault.at(0))? {
        Progress::Complete { value, consumed } if consumed == input.len() => Ok(value),
        Progress::Complete { consumed, .. } => Err(UnpackError::ExtraBytes {
            consumed,
            extra: input.len() - consumed,
        }),
        Progress::Incomplete => Err(UnpackError::TruncatedInput),
    }
}
