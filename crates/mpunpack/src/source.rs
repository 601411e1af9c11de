use std::io::{self, Read};

/// A readable byte stream an [`Unpacker`](crate::Unpacker) can pull from.
///
/// `pull` writes up to `buf.len()` bytes into `buf` and returns how many were
/// written. `Ok(0)` means the source is exhausted for now.
///
/// Every [`Read`] implementation is a byte source, with
/// [`io::ErrorKind::Interrupted`] retried transparently.
pub trait ByteSource {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<R: Read> ByteSource for R {
    fn pull(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                other => return other,
            }
        }
    }
}
