//! Incremental MessagePack unpacker.
//!
//! Bytes may arrive in arbitrary chunks, pushed with [`Unpacker::feed`] or
//! pulled from any [`std::io::Read`]; every complete top-level value is
//! produced exactly once as a [`Value`]. For input that is already complete,
//! [`decode`] checks that it holds exactly one value.
//!
//! ```
//! use mpunpack::Unpacker;
//!
//! let message = [0x82, 0xa2, b'i', b'd', 0x07, 0xa2, b'o', b'k', 0xc3];
//! let mut unpacker = Unpacker::new();
//! for chunk in message.chunks(2) {
//!     unpacker.feed(chunk);
//!     for value in unpacker.iter() {
//!         println!("{}", value.unwrap());
//!     }
//! }
//! unpacker.finish().unwrap();
//! ```

#![allow(missing_docs)]

mod buffer;
mod chunk_utils;
mod engine;
mod error;
mod oneshot;
mod options;
mod session;
mod slice;
mod source;
mod unpacker;
mod value;
mod window;

#[cfg(test)]
mod tests;

pub use chunk_utils::produce_chunks;
pub use error::{SyntaxError, UnpackError};
pub use oneshot::{decode, decode_limit, decode_slice, decode_with};
pub use options::UnpackerOptions;
pub use session::Status;
pub use source::ByteSource;
pub use unpacker::{Iter, Unpacker};
pub use value::{Array, Map, Value};
pub use window::{Backing, NoHooks, WindowHooks};
