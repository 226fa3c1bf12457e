//! Support for record (struct and tuple) implementations of [`Lex`](crate::Lex).
//!
//! Records encode their fields back to back in declaration order:
//!
//! ```text
//! ┌───────────┬───────────┬─────┬───────────┐
//! │  field 0  │  field 1  │ ... │  field N  │
//! └───────────┴───────────┴─────┴───────────┘
//! ```
//!
//! `#[derive(Lex)]` expands to calls into this module. Hand-written record
//! impls can use it the same way:
//!
//! ```
//! use lexkey::{Lex, Result, record};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Lex for Point {
//!     fn lex_size(&self) -> Result<usize> {
//!         record::sized(self.x.lex_size()? + self.y.lex_size()?, "Point")
//!     }
//!
//!     fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
//!         let mut offset = self.x.lex_encode(buf)?;
//!         offset += self.y.lex_encode(record::tail_mut(buf, offset)?)?;
//!         record::sized(offset, "Point")
//!     }
//!
//!     fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
//!         let mut offset = self.x.lex_decode(buf)?;
//!         offset += self.y.lex_decode(record::tail(buf, offset)?)?;
//!         record::consumed(offset, "Point")
//!     }
//! }
//!
//! assert_eq!(lexkey::size(&Point { x: 1, y: 2 }), Some(8));
//! ```

use crate::error::{Error, Result};

/// Returns the part of `buf` after the first `offset` bytes.
#[inline]
pub fn tail(buf: &[u8], offset: usize) -> Result<&[u8]> {
    let available = buf.len();
    buf.get(offset..).ok_or(Error::BufferTooShort {
        needed: offset,
        available,
    })
}

/// Returns the part of `buf` after the first `offset` bytes.
#[inline]
pub fn tail_mut(buf: &mut [u8], offset: usize) -> Result<&mut [u8]> {
    let available = buf.len();
    buf.get_mut(offset..).ok_or(Error::BufferTooShort {
        needed: offset,
        available,
    })
}

/// Validates the total size (or bytes written) of a record.
///
/// A record whose fields add up to nothing has no meaningful key encoding and
/// is reported as unsupported.
#[inline]
pub fn sized(total: usize, record: &str) -> Result<usize> {
    if total == 0 {
        return Err(Error::Unsupported(format!(
            "record `{}` has no encodable fields",
            record
        )));
    }
    Ok(total)
}

/// Validates the number of bytes a record decode consumed.
///
/// Only writable (`pub`) fields are decoded, so a record without any yields
/// zero and is an invalid destination.
#[inline]
pub fn consumed(total: usize, record: &str) -> Result<usize> {
    if total == 0 {
        return Err(Error::InvalidDestination(format!(
            "record `{}` has no writable fields",
            record
        )));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_tail_after_offset() {
        let buf = [1u8, 2, 3, 4];
        assert_eq!(tail(&buf, 1).unwrap(), &[2u8, 3, 4]);
        assert_eq!(tail(&buf, 4).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn should_fail_tail_past_end() {
        let mut buf = [0u8; 2];
        assert_eq!(
            tail(&buf, 3),
            Err(Error::BufferTooShort {
                needed: 3,
                available: 2
            })
        );
        assert!(tail_mut(&mut buf, 3).is_err());
    }

    #[test]
    fn should_reject_empty_record() {
        assert!(matches!(sized(0, "Empty"), Err(Error::Unsupported(msg)) if msg.contains("Empty")));
        assert_eq!(sized(6, "Pair"), Ok(6));
    }

    #[test]
    fn should_reject_record_without_writable_fields() {
        assert!(matches!(consumed(0, "Sealed"), Err(Error::InvalidDestination(_))));
        assert_eq!(consumed(2, "Open"), Ok(2));
    }
}
