#![allow(missing_docs)]
#![allow(dead_code)]

use std::io::{self, Read};

/// `{"moderation": {"decision": "allow", "reason": nil}, "ids": [1, -2, 300],
/// "ok": true}`
pub const DOCUMENT: &[u8] = &[
    0x83, // map of 3
    0xaa, b'm', b'o', b'd', b'e', b'r', b'a', b't', b'i', b'o', b'n', //
    0x82, // map of 2
    0xa8, b'd', b'e', b'c', b'i', b's', b'i', b'o', b'n', //
    0xa5, b'a', b'l', b'l', b'o', b'w', //
    0xa6, b'r', b'e', b'a', b's', b'o', b'n', //
    0xc0, //
    0xa3, b'i', b'd', b's', //
    0x93, 0x01, 0xfe, 0xcd, 0x01, 0x2c, //
    0xa2, b'o', b'k', //
    0xc3,
];

/// Display form of [`DOCUMENT`].
pub const DOCUMENT_DISPLAY: &str =
    r#"{"moderation": {"decision": "allow", "reason": nil}, "ids": [1, -2, 300], "ok": true}"#;

/// A reader that hands out at most `step` bytes per call.
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    step: usize,
}

impl<'a> ChunkedReader<'a> {
    pub fn new(data: &'a [u8], step: usize) -> Self {
        Self { data, step }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// `count` copies of [`DOCUMENT`] back to back.
pub fn repeated(count: usize) -> Vec<u8> {
    DOCUMENT.repeat(count)
}
