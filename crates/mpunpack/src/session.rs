use core::fmt;
use std::io;

use bytes::Bytes;

use crate::{
    UnpackError, UnpackerOptions,
    buffer::GrowableBuffer,
    engine::{Engine, Progress},
    slice::Slicer,
    source::ByteSource,
    value::Value,
    window::{Backing, NoHooks, Window, WindowHooks},
};

/// Outcome of a single buffered decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A value completed; it is available from `data()` until `reset()`.
    Complete,
    /// The buffered bytes end inside a value. Nothing was consumed.
    Incomplete,
}

/// One buffer plus one engine, producing a sequence of values.
///
/// The buffer survives `reset`, so bytes of the next value that arrived with
/// the previous one are not lost.
pub(crate) struct DecodeSession<'h> {
    buffer: GrowableBuffer,
    engine: Engine,
    finished: bool,
    data: Option<Value>,
    hooks: Box<dyn WindowHooks + 'h>,
    options: UnpackerOptions,
    /// Bytes consumed over the whole session; the stream offset of the next
    /// value.
    position: usize,
}

impl fmt::Debug for DecodeSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeSession")
            .field("buffer", &self.buffer)
            .field("engine", &self.engine)
            .field("finished", &self.finished)
            .field("data", &self.data)
            .field("options", &self.options)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<'h> DecodeSession<'h> {
    pub(crate) fn new(options: UnpackerOptions) -> Self {
        Self {
            buffer: GrowableBuffer::new(options.initial_buffer_size),
            engine: Engine::new(options.max_depth),
            finished: false,
            data: None,
            hooks: Box::new(NoHooks),
            options,
            position: 0,
        }
    }

    pub(crate) fn options(&self) -> &UnpackerOptions {
        &self.options
    }

    pub(crate) fn set_hooks(&mut self, hooks: Box<dyn WindowHooks + 'h>) {
        self.hooks = hooks;
    }

    pub(crate) fn feed(&mut self, bytes: &[u8]) {
        self.buffer.append(bytes);
    }

    /// Pulls one chunk of at most `reserve_size` bytes from `source` straight
    /// into the buffer. Returns the number of bytes added; `0` means the
    /// source is exhausted.
    pub(crate) fn fill_from(&mut self, source: &mut dyn ByteSource) -> io::Result<usize> {
        let want = self
            .options
            .reserve_size
            .clamp(1, UnpackerOptions::MAX_BUFFER_REQUEST);
        let spare = self.buffer.reserve(want);
        let n = source.pull(&mut spare[..want])?;
        self.buffer.commit(n);
        tracing::trace!(requested = want, received = n, "pulled from byte source");
        Ok(n)
    }

    /// Decodes from the unconsumed buffered bytes.
    pub(crate) fn execute_once(&mut self) -> Result<Status, UnpackError> {
        let progress = {
            let _window = Window::open(self.hooks.as_mut(), Backing::Session);
            self.engine
                .execute(self.buffer.unconsumed(), &Slicer::copying())
        };
        match progress {
            Ok(Progress::Complete { value, consumed }) => {
                self.buffer.consume(consumed);
                self.position += consumed;
                self.finished = true;
                self.data = Some(value);
                Ok(Status::Complete)
            }
            Ok(Progress::Incomplete) => {
                self.finished = false;
                Ok(Status::Incomplete)
            }
            Err(fault) => Err(fault.at(self.position)),
        }
    }

    /// Decodes from `buf[offset..limit]` without touching the buffer.
    ///
    /// Returns the offset just past the value when one completes, or `offset`
    /// unchanged when more bytes are needed; in that case the next call must
    /// pass the same `offset` over a buffer that extends this one.
    pub(crate) fn execute_at(
        &mut self,
        buf: &Bytes,
        offset: usize,
        limit: usize,
    ) -> Result<usize, UnpackError> {
        if offset >= limit {
            return Err(UnpackError::InvalidOffset { offset, limit });
        }
        if limit > buf.len() {
            return Err(UnpackError::LimitOutOfBounds {
                limit,
                len: buf.len(),
            });
        }

        let slicer = Slicer::shared(buf, offset, self.options.zero_copy_threshold);
        let progress = {
            let _window = Window::open(self.hooks.as_mut(), Backing::Caller);
            self.engine.execute(&buf[offset..limit], &slicer)
        };
        match progress {
            Ok(Progress::Complete { value, consumed }) => {
                self.finished = true;
                self.data = Some(value);
                Ok(offset + consumed)
            }
            Ok(Progress::Incomplete) => {
                self.finished = false;
                Ok(offset)
            }
            Err(fault) => Err(fault.at(offset)),
        }
    }

    pub(crate) fn finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub(crate) fn take_data(&mut self) -> Option<Value> {
        self.data.take()
    }

    /// Clears the engine, `finished` and `data`. Buffered bytes stay.
    pub(crate) fn reset(&mut self) {
        self.engine.reset();
        self.finished = false;
        self.data = None;
    }

    pub(crate) fn buffered_len(&self) -> usize {
        self.buffer.unconsumed().len()
    }

    /// Returns `true` if a value has started but not completed.
    pub(crate) fn has_pending(&self) -> bool {
        self.buffer.has_unconsumed() || !self.engine.is_idle()
    }
}
