/// Configuration options for the unpacker.
///
/// These options size the internal buffer, the chunk requested from a byte
/// source, the zero-copy cutoff and the nesting limit of the decode engine.
///
/// # Examples
///
/// ```rust
/// use mpunpack::{Unpacker, UnpackerOptions};
///
/// let unpacker = Unpacker::with_options(UnpackerOptions {
///     reserve_size: 64 * 1024,
///     ..Default::default()
/// });
/// # drop(unpacker);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackerOptions {
    /// Capacity of the internal buffer when it is first allocated.
    ///
    /// The buffer doubles from this size until it covers the first request.
    /// Values above [`MAX_BUFFER_REQUEST`](Self::MAX_BUFFER_REQUEST) are
    /// clamped to it.
    ///
    /// # Default
    ///
    /// `32 KiB`
    pub initial_buffer_size: usize,

    /// Number of bytes requested from the byte source per pull.
    ///
    /// Clamped to `1..=`[`MAX_BUFFER_REQUEST`](Self::MAX_BUFFER_REQUEST).
    ///
    /// # Default
    ///
    /// `8 KiB`
    pub reserve_size: usize,

    /// Byte and string payloads longer than this many bytes are returned as
    /// views into a caller-supplied [`bytes::Bytes`] instead of copies.
    ///
    /// Payloads decoded out of the unpacker's own buffer are always copied.
    ///
    /// # Default
    ///
    /// `23`
    pub zero_copy_threshold: usize,

    /// Maximum number of containers open at once while decoding one value.
    ///
    /// # Default
    ///
    /// `32`
    pub max_depth: usize,
}

impl UnpackerOptions {
    pub const DEFAULT_INITIAL_BUFFER_SIZE: usize = 32 * 1024;
    pub const DEFAULT_RESERVE_SIZE: usize = 8 * 1024;
    pub const DEFAULT_ZERO_COPY_THRESHOLD: usize = 23;
    pub const DEFAULT_MAX_DEPTH: usize = 32;
    /// Upper bound applied to `initial_buffer_size` and `reserve_size`.
    pub const MAX_BUFFER_REQUEST: usize = 64 * 1024 * 1024;
}

impl Default for UnpackerOptions {
    fn default() -> Self {
        Self {
            initial_buffer_size: Self::DEFAULT_INITIAL_BUFFER_SIZE,
            reserve_size: Self::DEFAULT_RESERVE_SIZE,
            zero_copy_threshold: Self::DEFAULT_ZERO_COPY_THRESHOLD,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
