//! Resumable MessagePack decode engine.
//!
//! The engine decodes one top-level value from a byte slice that starts at
//! the first byte of that value. When the slice ends early it reports
//! [`Progress::Incomplete`] and remembers how far it got: the open containers
//! live in a [`FrameStack`] and `cursor` records how many bytes of the value
//! have been absorbed into them. Calling again with a longer slice starting at
//! the same value resumes at `cursor`, so no byte is decoded twice.
//!
//! An item is absorbed only once it is fully present (tag, length field and
//! payload), which keeps resumption trivial: the cursor always sits on a tag
//! byte.
//!
//! Tags handled:
//!
//! | Tag            | Item                         |
//! |----------------|------------------------------|
//! | `0x00..=0x7f`  | positive fixint              |
//! | `0x80..=0x8f`  | fixmap                       |
//! | `0x90..=0x9f`  | fixarray                     |
//! | `0xa0..=0xbf`  | fixraw                       |
//! | `0xc0`         | nil                          |
//! | `0xc2`, `0xc3` | false, true                  |
//! | `0xc4..=0xc6`  | bin 8/16/32                  |
//! | `0xca`, `0xcb` | float 32/64                  |
//! | `0xcc..=0xcf`  | uint 8/16/32/64              |
//! | `0xd0..=0xd3`  | int 8/16/32/64               |
//! | `0xd9..=0xdb`  | raw 8/16/32                  |
//! | `0xdc`, `0xdd` | array 16/32                  |
//! | `0xde`, `0xdf` | map 16/32                    |
//! | `0xe0..=0xff`  | negative fixint              |
//!
//! Anything else (`0xc1` and the ext family) is [`SyntaxError::UnknownTag`].

mod stack;

use stack::FrameStack;

use crate::{
    SyntaxError, UnpackError,
    slice::Slicer,
    value::{Map, Value},
};

/// Outcome of one [`Engine::execute`] call.
#[derive(Debug, PartialEq)]
pub(crate) enum Progress {
    /// A value finished after `consumed` bytes of the input.
    Complete { value: Value, consumed: usize },
    /// The input ended first; call again with more bytes.
    Incomplete,
}

/// A syntax error at `position` in the engine input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fault {
    pub(crate) position: usize,
    pub(crate) error: SyntaxError,
}

impl Fault {
    /// Converts into the public error, with `base` the absolute offset of the
    /// engine input.
    pub(crate) fn at(self, base: usize) -> UnpackError {
        let offset = base + self.position;
        tracing::debug!(offset, error = %self.error, "malformed input");
        UnpackError::Malformed {
            offset,
            source: self.error,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Engine {
    stack: FrameStack,
    cursor: usize,
}

/// One fully-present item.
enum Item {
    Scalar(Value),
    Raw(usize),
    Array(usize),
    Map(usize),
}

impl Engine {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            stack: FrameStack::new(max_depth),
            cursor: 0,
        }
    }

    /// Drops any partially decoded value.
    pub(crate) fn reset(&mut self) {
        self.stack.clear();
        self.cursor = 0;
    }

    /// Returns `true` if no bytes of a value have been absorbed yet.
    pub(crate) fn is_idle(&self) -> bool {
        self.cursor == 0 && self.stack.is_empty()
    }

    /// Decodes from `input`, which must start at the first byte of the current
    /// value and, on a resumed call, extend the input of the previous call.
    ///
    /// On error the engine stops in front of the faulty item, so repeating
    /// the call reports the same fault.
    pub(crate) fn execute(
        &mut self,
        input: &[u8],
        slicer: &Slicer<'_>,
    ) -> Result<Progress, Fault> {
        let mut pos = self.cursor;
        loop {
            let fault = move |error| Fault {
                position: pos,
                error,
            };
            // Absorbed items stay on the stack; a faulting call leaves the
            // cursor on the offending tag so a retry reports it again.
            self.cursor = pos;
            let Some((item, header)) = read_item(input, pos).map_err(fault)? else {
                return Ok(Progress::Incomplete);
            };

            let body = pos + header;
            let finished = match item {
                Item::Scalar(value) => {
                    pos = body;
                    self.stack.complete(value)
                }
                Item::Raw(len) => {
                    if input.len() - body < len {
                        return Ok(Progress::Incomplete);
                    }
                    let payload = slicer.payload(input, body, len);
                    pos = body + len;
                    self.stack.complete(Value::Bytes(payload))
                }
                Item::Array(0) => {
                    pos = body;
                    self.stack.complete(Value::Array(Vec::new()))
                }
                Item::Map(0) => {
                    pos = body;
                    self.stack.complete(Value::Map(Map::new()))
                }
                // Every element takes at least one byte, which bounds how much
                // a declared length may pre-allocate.
                Item::Array(len) => {
                    let capacity = len.min(input.len() - body);
                    self.stack.push_array(len, capacity).map_err(fault)?;
                    pos = body;
                    None
                }
                Item::Map(len) => {
                    let capacity = len.min((input.len() - body) / 2);
                    self.stack.push_map(len, capacity).map_err(fault)?;
                    pos = body;
                    None
                }
            };

            if let Some(value) = finished {
                self.cursor = 0;
                return Ok(Progress::Complete {
                    value,
                    consumed: pos,
                });
            }
        }
    }
}

/// Reads `N` bytes following the tag at `pos`.
#[inline]
fn field<const N: usize>(input: &[u8], pos: usize) -> Option<[u8; N]> {
    input.get(pos + 1..pos + 1 + N)?.try_into().ok()
}

/// Decodes the item header at `pos`. Returns `Ok(None)` when the header (or,
/// for scalars, the fixed-width body) is not fully present. The second tuple
/// element is the header length in bytes.
fn read_item(input: &[u8], pos: usize) -> Result<Option<(Item, usize)>, SyntaxError> {
    let Some(&tag) = input.get(pos) else {
        return Ok(None);
    };

    macro_rules! fixed {
        ($n:literal, |$b:ident| $make:expr) => {
            match field::<$n>(input, pos) {
                Some($b) => (Item::Scalar($make), 1 + $n),
                None => return Ok(None),
            }
        };
    }
    macro_rules! sized {
        ($n:literal, $ty:ty, $kind:ident) => {
            match field::<$n>(input, pos) {
                Some(b) => (Item::$kind(<$ty>::from_be_bytes(b) as usize), 1 + $n),
                None => return Ok(None),
            }
        };
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let item = match tag {
        0x00..=0x7f => (Item::Scalar(Value::UInt(u64::from(tag))), 1),
        0x80..=0x8f => (Item::Map(usize::from(tag & 0x0f)), 1),
        0x90..=0x9f => (Item::Array(usize::from(tag & 0x0f)), 1),
        0xa0..=0xbf => (Item::Raw(usize::from(tag & 0x1f)), 1),
        0xc0 => (Item::Scalar(Value::Nil), 1),
        0xc2 => (Item::Scalar(Value::Bool(false)), 1),
        0xc3 => (Item::Scalar(Value::Bool(true)), 1),
        0xc4 | 0xd9 => sized!(1, u8, Raw),
        0xc5 | 0xda => sized!(2, u16, Raw),
        0xc6 | 0xdb => sized!(4, u32, Raw),
        0xca => fixed!(4, |b| Value::Float(f64::from(f32::from_be_bytes(b)))),
        0xcb => fixed!(8, |b| Value::Float(f64::from_be_bytes(b))),
        0xcc => fixed!(1, |b| Value::UInt(u64::from(b[0]))),
        0xcd => fixed!(2, |b| Value::UInt(u64::from(u16::from_be_bytes(b)))),
        0xce => fixed!(4, |b| Value::UInt(u64::from(u32::from_be_bytes(b)))),
        0xcf => fixed!(8, |b| Value::UInt(u64::from_be_bytes(b))),
        0xd0 => fixed!(1, |b| Value::from(i64::from(i8::from_be_bytes(b)))),
        0xd1 => fixed!(2, |b| Value::from(i64::from(i16::from_be_bytes(b)))),
        0xd2 => fixed!(4, |b| Value::from(i64::from(i32::from_be_bytes(b)))),
        0xd3 => fixed!(8, |b| Value::from(i64::from_be_bytes(b))),
        0xdc => sized!(2, u16, Array),
        0xdd => sized!(4, u32, Array),
        0xde => sized!(2, u16, Map),
        0xdf => sized!(4, u32, Map),
        0xe0..=0xff => (Item::Scalar(Value::Int(i64::from(tag as i8))), 1),
        _ => return Err(SyntaxError::UnknownTag(tag)),
    };
    Ok(Some(item))
}
