use core::fmt;

use bytes::Bytes;

use crate::{
    UnpackError, UnpackerOptions,
    session::{DecodeSession, Status},
    source::ByteSource,
    value::Value,
    window::WindowHooks,
};

/// Incremental MessagePack unpacker.
///
/// Bytes reach the unpacker either through [`feed`](Self::feed) or by pulling
/// from a configured [`ByteSource`]. Each complete top-level value is yielded
/// once; bytes that belong to the following value stay buffered.
///
/// # Examples
///
/// ```
/// use mpunpack::{Unpacker, Value};
///
/// let mut unpacker = Unpacker::new();
/// // [1, 2, 3] followed by the first half of [4, 5, 6]
/// unpacker.feed(&[0x93, 0x01, 0x02, 0x03, 0x93, 0x04]);
///
/// let values: Vec<Value> = unpacker.iter().collect::<Result<_, _>>().unwrap();
/// assert_eq!(values, vec![Value::from(vec![Value::from(1u64), 2u64.into(), 3u64.into()])]);
///
/// unpacker.feed(&[0x05, 0x06]);
/// assert_eq!(unpacker.iter().next().unwrap().unwrap().to_string(), "[4, 5, 6]");
/// ```
///
/// Reading from any [`std::io::Read`]:
///
/// ```
/// use mpunpack::Unpacker;
///
/// let input: &[u8] = &[0xc3, 0xc0];
/// let mut unpacker = Unpacker::with_stream(input);
/// let mut seen = Vec::new();
/// unpacker.each(|v| seen.push(v.to_string())).unwrap();
/// assert_eq!(seen, ["true", "nil"]);
/// ```
pub struct Unpacker<'s> {
    session: DecodeSession<'s>,
    stream: Option<Box<dyn ByteSource + 's>>,
}

impl fmt::Debug for Unpacker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unpacker")
            .field("session", &self.session)
            .field("has_stream", &self.stream.is_some())
            .finish()
    }
}

impl Default for Unpacker<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> Unpacker<'s> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(UnpackerOptions::default())
    }

    #[must_use]
    pub fn with_options(options: UnpackerOptions) -> Self {
        Self {
            session: DecodeSession::new(options),
            stream: None,
        }
    }

    #[must_use]
    pub fn with_stream<S: ByteSource + 's>(stream: S) -> Self {
        Self::with_stream_and_options(stream, UnpackerOptions::default())
    }

    #[must_use]
    pub fn with_stream_and_options<S: ByteSource + 's>(
        stream: S,
        options: UnpackerOptions,
    ) -> Self {
        let mut unpacker = Self::with_options(options);
        unpacker.set_stream(stream);
        unpacker
    }

    #[must_use]
    pub fn options(&self) -> &UnpackerOptions {
        self.session.options()
    }

    #[must_use]
    pub fn stream(&self) -> Option<&(dyn ByteSource + 's)> {
        self.stream.as_deref()
    }

    pub fn stream_mut(&mut self) -> Option<&mut (dyn ByteSource + 's)> {
        self.stream.as_deref_mut()
    }

    /// Replaces the byte source. Buffered bytes are kept and are decoded
    /// before anything pulled from the new source.
    pub fn set_stream<S: ByteSource + 's>(&mut self, stream: S) {
        self.stream = Some(Box::new(stream));
    }

    /// Removes and returns the byte source. Buffered bytes are kept.
    pub fn take_stream(&mut self) -> Option<Box<dyn ByteSource + 's>> {
        self.stream.take()
    }

    /// Installs host callbacks run around every decode call.
    pub fn set_hooks<H: WindowHooks + 's>(&mut self, hooks: H) {
        self.session.set_hooks(Box::new(hooks));
    }

    /// Appends raw bytes to the internal buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.session.feed(bytes);
    }

    /// Pulls one chunk from the byte source into the internal buffer.
    ///
    /// Returns `Ok(None)` if no source is configured and `Ok(Some(0))` once
    /// the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`UnpackError::Io`] if the source fails.
    pub fn fill(&mut self) -> Result<Option<usize>, UnpackError> {
        let Some(stream) = self.stream.as_deref_mut() else {
            return Ok(None);
        };
        Ok(Some(self.session.fill_from(stream)?))
    }

    /// Returns an iterator over the values that can be completed from the
    /// buffered bytes and the byte source.
    ///
    /// The iterator ends when the buffer holds no complete value and the
    /// source (if any) is exhausted; a partial value stays buffered for a
    /// later call. After an error it yields nothing more.
    pub fn iter(&mut self) -> Iter<'_, 's> {
        Iter {
            unpacker: self,
            done: false,
        }
    }

    /// Calls `on_value` for every value [`iter`](Self::iter) would yield.
    ///
    /// # Errors
    ///
    /// Stops at the first parse or I/O error and returns it. The buffer is
    /// left as it was at the failure point.
    pub fn each<F: FnMut(Value)>(&mut self, mut on_value: F) -> Result<(), UnpackError> {
        for value in self.iter() {
            on_value(value?);
        }
        Ok(())
    }

    fn next_value(&mut self) -> Result<Option<Value>, UnpackError> {
        loop {
            if self.session.buffered_len() > 0
                && self.session.execute_once()? == Status::Complete
            {
                let value = self.session.take_data();
                self.session.reset();
                return Ok(value);
            }
            let Some(stream) = self.stream.as_deref_mut() else {
                return Ok(None);
            };
            if self.session.fill_from(stream)? == 0 {
                return Ok(None);
            }
        }
    }

    /// Runs the engine once over the buffered bytes.
    ///
    /// On [`Status::Complete`] the value is available from
    /// [`data`](Self::data); call [`reset`](Self::reset) before decoding the
    /// next one.
    ///
    /// # Errors
    ///
    /// Returns [`UnpackError::Malformed`] with the stream offset of the bad
    /// byte. The buffer is not modified.
    pub fn execute_once(&mut self) -> Result<Status, UnpackError> {
        self.session.execute_once()
    }

    /// Decodes from `buf[offset..]` without using the internal buffer.
    ///
    /// # Errors
    ///
    /// See [`execute_limit`](Self::execute_limit).
    pub fn execute(&mut self, buf: &Bytes, offset: usize) -> Result<usize, UnpackError> {
        self.execute_limit(buf, offset, buf.len())
    }

    /// Decodes from `buf[offset..limit]` without using the internal buffer.
    ///
    /// If a value completes, [`finished`](Self::finished) becomes `true` and
    /// the offset just past the value is returned. Otherwise `offset` is
    /// returned unchanged: call again with the same `offset` over a buffer
    /// holding more bytes. Long payloads may be views into `buf`.
    ///
    /// # Errors
    ///
    /// - [`UnpackError::InvalidOffset`] if `offset >= limit`; nothing changes.
    /// - [`UnpackError::LimitOutOfBounds`] if `limit > buf.len()`.
    /// - [`UnpackError::Malformed`] with the index into `buf` of the bad byte.
    pub fn execute_limit(
        &mut self,
        buf: &Bytes,
        offset: usize,
        limit: usize,
    ) -> Result<usize, UnpackError> {
        self.session.execute_at(buf, offset, limit)
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.session.finished()
    }

    /// The last completed value, until [`reset`](Self::reset).
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.session.data()
    }

    pub fn take_data(&mut self) -> Option<Value> {
        self.session.take_data()
    }

    /// Forgets any partially decoded value and the last completed one.
    /// Buffered bytes are kept.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Number of buffered bytes not yet consumed by a completed value.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.session.buffered_len()
    }

    /// Checks that the input ended on a value boundary.
    ///
    /// # Errors
    ///
    /// Returns [`UnpackError::TruncatedInput`] if buffered bytes or a
    /// partially decoded value remain.
    pub fn finish(&self) -> Result<(), UnpackError> {
        if self.session.has_pending() {
            return Err(UnpackError::TruncatedInput);
        }
        Ok(())
    }
}

/// Iterator returned by [`Unpacker::iter`].
#[derive(Debug)]
pub struct Iter<'u, 's> {
    unpacker: &'u mut Unpacker<'s>,
    done: bool,
}

impl Iterator for Iter<'_, '_> {
    type Item = Result<Value, UnpackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.unpacker.next_value() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl core::iter::FusedIterator for Iter<'_, '_> {}
