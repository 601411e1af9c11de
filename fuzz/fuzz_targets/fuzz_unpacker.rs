#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use mpunpack::{UnpackError, Unpacker, UnpackerOptions, Value, decode, decode_slice};

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    /// Chunk lengths used to feed `data`; cycled.
    splits: Vec<u8>,
    initial_buffer_size: u8,
}

/// Decodes `data` one-shot, value by value, recording each value or the first
/// error.
fn reference(data: &[u8]) -> (Vec<Value>, Option<usize>) {
    let mut values = Vec::new();
    let mut rest = data;
    let mut consumed = 0;
    while !rest.is_empty() {
        match decode_slice(rest) {
            Ok(v) => {
                values.push(v);
                return (values, None);
            }
            Err(UnpackError::ExtraBytes { consumed: n, .. }) => {
                let Ok(v) = decode_slice(&rest[..n]) else {
                    panic!("prefix of {n} bytes decoded then failed");
                };
                values.push(v);
                rest = &rest[n..];
                consumed += n;
            }
            Err(UnpackError::TruncatedInput) => return (values, None),
            Err(UnpackError::Malformed { offset, .. }) => {
                return (values, Some(consumed + offset));
            }
            Err(e) => panic!("unexpected error {e}"),
        }
    }
    (values, None)
}

fuzz_target!(|input: Input| {
    let (expected, error_at) = reference(&input.data);

    let mut unpacker = Unpacker::with_options(UnpackerOptions {
        initial_buffer_size: usize::from(input.initial_buffer_size),
        ..Default::default()
    });
    let mut values = Vec::new();
    let mut error = None;
    let mut rest = input.data.as_slice();
    let mut splits = input.splits.iter().cycle();
    while !rest.is_empty() && error.is_none() {
        let step = splits.next().map_or(rest.len(), |&s| usize::from(s).max(1));
        let (chunk, tail) = rest.split_at(step.min(rest.len()));
        rest = tail;
        unpacker.feed(chunk);
        for value in unpacker.iter() {
            match value {
                Ok(v) => values.push(v),
                Err(UnpackError::Malformed { offset, .. }) => error = Some(offset),
                Err(e) => panic!("unexpected error {e}"),
            }
        }
    }

    assert_eq!(values, expected);
    assert_eq!(error, error_at);

    // Zero-copy decoding agrees with copying decoding.
    let shared = decode(&Bytes::from(input.data.clone()));
    let copied = decode_slice(&input.data);
    assert_eq!(shared.ok(), copied.ok());
});
