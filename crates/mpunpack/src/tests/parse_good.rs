use bytes::Bytes;
use rstest::rstest;

use super::utils::{arr, encode, map};
use crate::{Unpacker, Value, decode, decode_slice};

#[rstest]
#[case::nil(&[0xc0], Value::Nil)]
#[case::fixint_max(&[0x7f], Value::UInt(127))]
#[case::negative_fixint(&[0xe0], Value::Int(-32))]
#[case::uint8(&[0xcc, 0x80], Value::UInt(128))]
#[case::uint64(&[0xcf, 0, 0, 0, 1, 0, 0, 0, 0], Value::UInt(1 << 32))]
#[case::int8_positive(&[0xd0, 0x7f], Value::UInt(127))]
#[case::int16(&[0xd1, 0x80, 0x00], Value::Int(-32768))]
#[case::int64_min(&[0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0], Value::Int(i64::MIN))]
#[case::float32(&[0xca, 0xbf, 0x80, 0x00, 0x00], Value::Float(-1.0))]
#[case::float64(&[0xcb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0], Value::Float(1.5))]
#[case::empty_raw(&[0xa0], Value::from(""))]
#[case::raw16(&[0xda, 0x00, 0x03, b'a', b'b', b'c'], Value::from("abc"))]
#[case::raw32(&[0xdb, 0, 0, 0, 1, b'z'], Value::from("z"))]
#[case::str8(&[0xd9, 0x01, b'z'], Value::from("z"))]
#[case::bin16(&[0xc5, 0x00, 0x02, 0xff, 0x00], Value::from(vec![0xffu8, 0x00]))]
#[case::bin32(&[0xc6, 0, 0, 0, 0], Value::from(Vec::<u8>::new()))]
#[case::array16(&[0xdc, 0x00, 0x02, 0xc2, 0xc3], arr([false.into(), true.into()]))]
#[case::array32(&[0xdd, 0, 0, 0, 1, 0x90], arr([arr([])]))]
#[case::map16(&[0xde, 0x00, 0x01, 0x01, 0x02], map([(1u64.into(), 2u64.into())]))]
#[case::map32(&[0xdf, 0, 0, 0, 1, 0xc0, 0x80], map([(Value::Nil, map([]))]))]
fn decodes_single_item(#[case] input: &[u8], #[case] expected: Value) {
    assert_eq!(decode_slice(input).unwrap(), expected);
}

#[test]
fn repeated_map_key_keeps_first_position_and_last_value() {
    // {"a": 1, "b": 2, "a": 3}
    let input = [0x83, 0xa1, b'a', 0x01, 0xa1, b'b', 0x02, 0xa1, b'a', 0x03];
    let value = decode_slice(&input).unwrap();
    assert_eq!(value.to_string(), r#"{"a": 3, "b": 2}"#);
}

#[test]
fn nested_document() {
    let doc = map([
        ("name".into(), "mpunpack".into()),
        ("tags".into(), arr(["io".into(), "codec".into()])),
        (
            "limits".into(),
            map([
                ("depth".into(), 32u64.into()),
                ("offset".into(), (-1i64).into()),
            ]),
        ),
        ("ratio".into(), 0.25f64.into()),
    ]);
    let bytes = Bytes::from(encode(&doc));
    assert_eq!(decode(&bytes).unwrap(), doc);
}

#[test]
fn containers_at_length_boundaries() {
    for len in [15usize, 16, 0xffff, 0x1_0000] {
        let value = Value::Array(vec![Value::Nil; len]);
        let bytes = encode(&value);
        assert_eq!(decode_slice(&bytes).unwrap(), value, "len {len}");
    }
}

#[test]
fn depth_up_to_the_limit_is_accepted() {
    let mut value = Value::Nil;
    for _ in 0..32 {
        value = Value::Array(vec![value]);
    }
    let mut unpacker = Unpacker::new();
    unpacker.feed(&encode(&value));
    assert_eq!(unpacker.iter().next().unwrap().unwrap(), value);
}
