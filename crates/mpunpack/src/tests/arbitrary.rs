use quickcheck::{Arbitrary, Gen};

use crate::{Map, Value};

fn scalar(g: &mut Gen) -> Value {
    match usize::arbitrary(g) % 7 {
        0 => Value::Nil,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => Value::UInt(u64::arbitrary(g)),
        // Small magnitudes exercise the fixint forms.
        3 => Value::from(i64::from(i8::arbitrary(g))),
        4 => Value::from(i64::arbitrary(g)),
        5 => Value::Float(f64::arbitrary(g)),
        _ => Value::from(Vec::<u8>::arbitrary(g)),
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 4 {
                0 | 1 => scalar(g),
                2 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        let key = scalar(g);
                        let val = gen_val(g, depth - 1);
                        map.insert(key, val);
                    }
                    Value::Map(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Value::Array(items) => Box::new(
                items
                    .clone()
                    .shrink()
                    .map(Value::Array)
                    .chain(items.clone()),
            ),
            Value::Map(entries) => Box::new(entries.values().cloned().collect::<Vec<_>>().into_iter()),
            _ => quickcheck::empty_shrinker(),
        }
    }
}
