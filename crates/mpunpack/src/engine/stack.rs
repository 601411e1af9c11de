use crate::{
    SyntaxError,
    value::{Array, Map, Value},
};

/// A container whose elements are still arriving.
#[derive(Debug)]
enum Frame {
    Array {
        items: Array,
        remaining: usize,
    },
    Map {
        entries: Map,
        key: Option<Value>,
        remaining: usize,
    },
}

impl Frame {
    /// Adds one decoded element; returns `true` once the container is full.
    fn accept(&mut self, value: Value) -> bool {
        match self {
            Frame::Array { items, remaining } => {
                items.push(value);
                *remaining -= 1;
                *remaining == 0
            }
            Frame::Map {
                entries,
                key,
                remaining,
            } => match key.take() {
                None => {
                    *key = Some(value);
                    false
                }
                Some(k) => {
                    entries.insert(k, value);
                    *remaining -= 1;
                    *remaining == 0
                }
            },
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array { items, .. } => Value::Array(items),
            Frame::Map { entries, .. } => Value::Map(entries),
        }
    }
}

/// In-progress containers of the value being decoded, outermost first.
///
/// The stack is owned by the engine and survives between calls, so a value
/// whose bytes arrive in several chunks keeps its partial containers here
/// until the last element lands.
#[derive(Debug)]
pub(crate) struct FrameStack {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl FrameStack {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn clear(&mut self) {
        self.frames.clear();
    }

    /// Opens an array expecting `len > 0` elements.
    pub(crate) fn push_array(&mut self, len: usize, capacity: usize) -> Result<(), SyntaxError> {
        self.check_depth()?;
        self.frames.push(Frame::Array {
            items: Array::with_capacity(capacity),
            remaining: len,
        });
        Ok(())
    }

    /// Opens a map expecting `len > 0` entries.
    pub(crate) fn push_map(&mut self, len: usize, capacity: usize) -> Result<(), SyntaxError> {
        self.check_depth()?;
        self.frames.push(Frame::Map {
            entries: Map::with_capacity(capacity),
            key: None,
            remaining: len,
        });
        Ok(())
    }

    fn check_depth(&self) -> Result<(), SyntaxError> {
        if self.frames.len() >= self.max_depth {
            return Err(SyntaxError::DepthExceeded(self.max_depth));
        }
        Ok(())
    }

    /// Hands a finished element to the innermost open container, closing
    /// every container it completes. Returns the top-level value once the
    /// outermost container (or a lone scalar) is done.
    pub(crate) fn complete(&mut self, mut value: Value) -> Option<Value> {
        loop {
            let Some(top) = self.frames.last_mut() else {
                return Some(value);
            };
            if !top.accept(value) {
                return None;
            }
            // `accept` returned true, so the frame exists.
            value = self.frames.pop()?.into_value();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_without_open_container_is_top_level() {
        let mut stack = FrameStack::new(4);
        assert_eq!(stack.complete(Value::UInt(1)), Some(Value::UInt(1)));
    }

    #[test]
    fn nested_containers_close_together() {
        let mut stack = FrameStack::new(4);
        stack.push_array(2, 2).unwrap();
        assert_eq!(stack.complete(Value::Nil), None);
        stack.push_map(1, 1).unwrap();
        assert_eq!(stack.complete("k".into()), None);
        assert_eq!(stack.depth(), 2);

        let mut inner = Map::new();
        inner.insert("k".into(), Value::Bool(true));
        assert_eq!(
            stack.complete(Value::Bool(true)),
            Some(Value::Array(vec![Value::Nil, Value::Map(inner)]))
        );
        assert!(stack.is_empty());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut stack = FrameStack::new(1);
        stack.push_array(1, 1).unwrap();
        assert_eq!(
            stack.push_map(1, 1),
            Err(SyntaxError::DepthExceeded(1))
        );
    }
}
