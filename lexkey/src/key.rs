//! Key composition.
//!
//! A key is the concatenation of the encodings of an ordered list of values:
//!
//! ```text
//! key!(year, rating, title)
//! ┌──────────────┬────────────────┬───────────────────────┐
//! │ year (i16)   │ rating (f32)   │ title bytes │ 0x00    │
//! │ 2 bytes      │ 4 bytes        │ len + 1 bytes         │
//! └──────────────┴────────────────┴───────────────────────┘
//! ```
//!
//! Two keys built from values of the same types, position by position,
//! compare bytewise exactly like the tuples of values compare
//! lexicographically: first field first. A key built from a leading subset
//! of the fields is a prefix of the full key, which is what makes range
//! seeks on the leading fields work (see [`BytesRange::prefix`](crate::BytesRange::prefix)).

use bytes::{Bytes, BytesMut};

use crate::error::{Error, Result};
use crate::lex::Lex;

/// Builds a key from `values`, in order.
///
/// # Errors
///
/// - [`Error::NoValues`] if `values` is empty
/// - [`Error::Nil`] if any value is nil
/// - [`Error::Unsupported`] if any value has no encoding
///
/// ```
/// use lexkey::{Lex, build_key};
///
/// let key = build_key(&[&42i16 as &dyn Lex, &9.2f32]).unwrap();
/// assert_eq!(key.as_ref(), &[128, 42, 193, 19, 51, 51]);
/// ```
pub fn build_key(values: &[&dyn Lex]) -> Result<Bytes> {
    if values.is_empty() {
        tracing::debug!("rejected key with no values");
        return Err(Error::NoValues);
    }

    let mut total = 0;
    for (position, value) in values.iter().enumerate() {
        total += value.lex_size().inspect_err(|err| {
            tracing::debug!(position = position, error = %err, "rejected key component");
        })?;
    }

    let mut buf = BytesMut::zeroed(total);
    let mut offset = 0;
    for value in values {
        offset += value.lex_encode(&mut buf[offset..])?;
    }
    debug_assert_eq!(offset, total);

    Ok(buf.freeze())
}

/// Builds a key from `values`, panicking on any error.
///
/// For call sites where the argument list is known to be valid, so that an
/// error would be a programming mistake.
///
/// # Panics
///
/// Panics under the same conditions [`build_key`] returns an error.
pub fn must_build_key(values: &[&dyn Lex]) -> Bytes {
    match build_key(values) {
        Ok(key) => key,
        Err(err) => panic!("failed to build key: {}", err),
    }
}

/// Builds a key from a heterogeneous list of values.
///
/// Expands to [`build_key`](crate::build_key) and returns its
/// `Result<Bytes>`.
///
/// ```
/// let year: i16 = 1994;
/// let key = lexkey::key!(year, 9.2f32, "The Shawshank Redemption").unwrap();
/// assert_eq!(key.len(), 2 + 4 + 25);
/// assert!(lexkey::key!().is_err());
/// ```
#[macro_export]
macro_rules! key {
    ($($value:expr),* $(,)?) => {
        $crate::build_key(&[$(&$value as &dyn $crate::Lex),*])
    };
}

/// Builds a key from a heterogeneous list of values, panicking on error.
///
/// Expands to [`must_build_key`](crate::must_build_key).
#[macro_export]
macro_rules! must_key {
    ($($value:expr),* $(,)?) => {
        $crate::must_build_key(&[$(&$value as &dyn $crate::Lex),*])
    };
}
