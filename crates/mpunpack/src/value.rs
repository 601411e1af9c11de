//! Decoded value types.
//!
//! This module defines the [`Value`] enum produced for every complete
//! top-level item, along with the [`Array`] and [`Map`] container aliases.
//!
use core::hash::{Hash, Hasher};

use bstr::BStr;
use bytes::Bytes;
use indexmap::IndexMap;

pub type Array = Vec<Value>;
pub type Map = IndexMap<Value, Value>;

/// A decoded MessagePack value.
///
/// Integers are normalized: non-negative values are always [`UInt`], negative
/// values are always [`Int`]. Both float widths decode to [`Float`]. Raw,
/// string and binary payloads all decode to [`Bytes`], which may be a view
/// into the caller's input (see [`UnpackerOptions::zero_copy_threshold`]).
///
/// Map entries keep the order of first insertion; a repeated key overwrites
/// the earlier value in place.
///
/// # Examples
///
/// ```
/// use mpunpack::Value;
///
/// let v = Value::Array(vec![1u64.into(), (-2i64).into(), "x".into()]);
/// assert_eq!(v.to_string(), r#"[1, -2, "x"]"#);
/// ```
///
/// [`UInt`]: Value::UInt
/// [`Int`]: Value::Int
/// [`Float`]: Value::Float
/// [`Bytes`]: Value::Bytes
/// [`UnpackerOptions::zero_copy_threshold`]: crate::UnpackerOptions::zero_copy_threshold
// Floats compare and hash by bit pattern so that any value can key a `Map`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    UInt(u64),
    Int(i64),
    Float(f64),
    Bytes(Bytes),
    Array(Array),
    Map(Map),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            // Entry order is part of a decoded map's identity.
            (Self::Map(a), Self::Map(b)) => a.iter().eq(b.iter()),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => {}
            Self::Bool(b) => b.hash(state),
            Self::UInt(n) => n.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => n.to_bits().hash(state),
            Self::Bytes(b) => b.hash(state),
            Self::Array(items) => items.hash(state),
            Self::Map(entries) => {
                entries.len().hash(state);
                for (k, v) in entries {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        match u64::try_from(v) {
            Ok(n) => Self::UInt(n),
            Err(_) => Self::Int(v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Bytes(Bytes::copy_from_slice(v.as_bytes()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Map(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Nil`].
    ///
    /// [`Nil`]: Value::Nil
    ///
    /// # Examples
    ///
    /// ```
    /// use mpunpack::Value;
    ///
    /// assert!(Value::Nil.is_nil());
    /// assert!(!Value::Bool(false).is_nil());
    /// ```
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns `true` if the value is [`Bool`].
    ///
    /// [`Bool`]: Value::Bool
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is an integer of either sign.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::UInt(..) | Self::Int(..))
    }

    /// Returns `true` if the value is [`Float`].
    ///
    /// [`Float`]: Value::Float
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` if the value is [`Bytes`].
    ///
    /// [`Bytes`]: Value::Bytes
    #[must_use]
    pub fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Map`].
    ///
    /// [`Map`]: Value::Map
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    ///
    /// # Examples
    ///
    /// ```
    /// use mpunpack::Value;
    ///
    /// assert_eq!(Value::UInt(7).as_i64(), Some(7));
    /// assert_eq!(Value::Int(-7).as_i64(), Some(-7));
    /// assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::UInt(n) => i64::try_from(*n).ok(),
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the payload as `&str` if it is a byte payload holding valid
    /// UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| core::str::from_utf8(b).ok())
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Bytes(b) => write!(f, "{:?}", BStr::new(b.as_ref())),
            Value::Array(items) => {
                f.write_str("[")?;
                let mut first = true;
                for v in items {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in entries {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
