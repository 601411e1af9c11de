//! A minimal MessagePack encoder for building test inputs.

use crate::Value;

/// Encodes `value` with the shortest form for every item.
pub(crate) fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(value, &mut out);
    out
}

/// Encodes every value back to back.
pub(crate) fn encode_all<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<u8> {
    let mut out = Vec::new();
    for value in values {
        write_value(value, &mut out);
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn write_value(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Nil => out.push(0xc0),
        Value::Bool(false) => out.push(0xc2),
        Value::Bool(true) => out.push(0xc3),
        Value::UInt(n) => match *n {
            0..=0x7f => out.push(*n as u8),
            0x80..=0xff => out.extend([0xcc, *n as u8]),
            0x100..=0xffff => {
                out.push(0xcd);
                out.extend((*n as u16).to_be_bytes());
            }
            0x1_0000..=0xffff_ffff => {
                out.push(0xce);
                out.extend((*n as u32).to_be_bytes());
            }
            _ => {
                out.push(0xcf);
                out.extend(n.to_be_bytes());
            }
        },
        Value::Int(n) => match *n {
            -32..=-1 => out.push(*n as u8),
            -128..=-33 => out.extend([0xd0, *n as u8]),
            -32_768..=-129 => {
                out.push(0xd1);
                out.extend((*n as i16).to_be_bytes());
            }
            -2_147_483_648..=-32_769 => {
                out.push(0xd2);
                out.extend((*n as i32).to_be_bytes());
            }
            _ => {
                out.push(0xd3);
                out.extend(n.to_be_bytes());
            }
        },
        Value::Float(n) => {
            out.push(0xcb);
            out.extend(n.to_be_bytes());
        }
        Value::Bytes(b) => {
            write_header(out, b.len(), 0xa0, 31, [0xda, 0xdb]);
            out.extend_from_slice(b);
        }
        Value::Array(items) => {
            write_header(out, items.len(), 0x90, 15, [0xdc, 0xdd]);
            for item in items {
                write_value(item, out);
            }
        }
        Value::Map(entries) => {
            write_header(out, entries.len(), 0x80, 15, [0xde, 0xdf]);
            for (k, v) in entries {
                write_value(k, out);
                write_value(v, out);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_header(out: &mut Vec<u8>, len: usize, fix: u8, fix_max: usize, [w16, w32]: [u8; 2]) {
    if len <= fix_max {
        out.push(fix | len as u8);
    } else if len <= 0xffff {
        out.push(w16);
        out.extend((len as u16).to_be_bytes());
    } else {
        out.push(w32);
        out.extend((len as u32).to_be_bytes());
    }
}

/// Builds an array value.
pub(crate) fn arr<const N: usize>(items: [Value; N]) -> Value {
    Value::Array(items.into())
}

/// Builds a map value from key-value pairs.
pub(crate) fn map<const N: usize>(entries: [(Value, Value); N]) -> Value {
    Value::Map(entries.into_iter().collect())
}
