use bytes::Bytes;

/// Materializes byte payloads found by the decode engine.
///
/// A payload is returned as a view into the caller's [`Bytes`] when the
/// decode reads caller memory and the payload is longer than the threshold.
/// Everything else is copied: short payloads are cheaper to copy than to
/// reference-count, and the session buffer is compacted and overwritten by
/// later feeds, so views into it must never escape.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slicer<'a> {
    owner: Option<&'a Bytes>,
    /// Index of the engine's input slice within `owner`.
    base: usize,
    threshold: usize,
}

impl<'a> Slicer<'a> {
    /// Payloads are always copied.
    pub(crate) fn copying() -> Self {
        Self {
            owner: None,
            base: 0,
            threshold: usize::MAX,
        }
    }

    /// Payloads longer than `threshold` become views into `owner`. The engine
    /// input must be `owner[base..]` (or a prefix of it).
    pub(crate) fn shared(owner: &'a Bytes, base: usize, threshold: usize) -> Self {
        Self {
            owner: Some(owner),
            base,
            threshold,
        }
    }

    /// Returns the `len` bytes at `start` in the engine input.
    pub(crate) fn payload(&self, input: &[u8], start: usize, len: usize) -> Bytes {
        match self.owner {
            Some(owner) if len > self.threshold => {
                let from = self.base + start;
                owner.slice(from..from + len)
            }
            _ => Bytes::copy_from_slice(&input[start..start + len]),
        }
    }
}
