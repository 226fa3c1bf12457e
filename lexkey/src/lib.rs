//! Order-preserving binary encoding for composite keys.
//!
//! Values are encoded so that comparing the encodings bytewise (as an
//! ordered key-value store does) gives the same order as comparing the
//! values. Composite keys are the concatenation of their parts' encodings,
//! which makes them sort like tuples: by first field, then second, and so on.
//!
//! # Layers
//!
//! - [`serde`]: fixed-width and terminated primitive codecs on byte slices
//! - [`Lex`]: type-driven size/encode/decode over the primitives, covering
//!   scalars, strings, pointer-like wrappers, tuples, [`Value`] and derived
//!   records
//! - [`build_key`] and the [`key!`] macro: compose a key from a heterogeneous
//!   list of values
//!
//! # Format
//!
//! | Type | Bytes | Encoding |
//! |------|-------|----------|
//! | `bool` | 1 | `0x01` / `0x00` |
//! | `u8`..`u64` | 1..8 | big-endian |
//! | `i8`..`i64` | 1..8 | big-endian with the sign bit flipped |
//! | `usize`, `isize` | 8 | as `u64` / `i64` on every platform |
//! | `f32`, `f64` | 4, 8 | IEEE bits, sign-flipped and negated when negative |
//! | `Complex32`, `Complex64` | 8, 16 | real part then imaginary part |
//! | `char` | 4 | as `i32` |
//! | `str`, `String` | len + 1 | UTF-8 bytes then `0x00` |
//!
//! No type tags are written. Decoding must use the same types, in the same
//! order, that produced the bytes.
//!
//! ```
//! #[derive(lexkey::Lex, Debug, Default, PartialEq)]
//! struct Movie {
//!     pub year: i16,
//!     pub rating: f32,
//!     pub title: String,
//! }
//!
//! let movie = Movie { year: 1994, rating: 9.2, title: "The Shawshank Redemption".into() };
//! let key = lexkey::key!(movie).unwrap();
//! assert_eq!(key, lexkey::key!(1994i16, 9.2f32, "The Shawshank Redemption").unwrap());
//!
//! let mut decoded = Movie::default();
//! lexkey::decode(&key, &mut decoded).unwrap();
//! assert_eq!(decoded, movie);
//! ```

extern crate self as lexkey;

pub mod bytes;
mod error;
mod key;
mod lex;
pub mod record;
pub mod serde;
mod value;

pub use self::bytes::BytesRange;
pub use error::{Error, Result};
pub use key::{build_key, must_build_key};
pub use lex::{Lex, decode, encode, size};
pub use value::{Field, Value};

/// Derives [`Lex`] for a struct by encoding its fields in declaration order.
///
/// All fields are encoded. Only `pub` fields are decoded; other fields are
/// left untouched and consume no input. A struct with no fields (or whose
/// fields all encode to nothing) is unsupported.
///
/// `#[lex(transparent)]` on a single-field struct makes it encode, decode and
/// size exactly like its field.
#[cfg(feature = "derive")]
pub use lexkey_macros::Lex;
