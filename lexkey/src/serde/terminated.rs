//! Terminated encoding for strings and raw byte sequences.
//!
//! Content is written as-is and followed by a single `0x00` terminator:
//!
//! ```text
//! ┌──────────────────────┬──────┐
//! │   content (N bytes)  │ 0x00 │
//! └──────────────────────┴──────┘
//! ```
//!
//! Using the lowest byte value as the terminator means a shorter value sorts
//! before any longer value it prefixes (e.g. "/foo" < "/foo/bar"), including
//! when further encoded fields follow the string in the same key.
//!
//! Content is not escaped. A value that itself contains `0x00` still encodes,
//! but a scan will stop at the embedded byte and ordering against trailing
//! fields is no longer guaranteed.
//!
//! There are two ways back:
//! - [`decode_bytes`] / [`decode_str`] treat the whole buffer, minus its final
//!   byte, as the value. Use these when the string is the last thing in the
//!   buffer.
//! - [`scan_bytes`] / [`scan_str`] stop at the first terminator, for buffers
//!   where other values follow the string.

use crate::error::{Error, Result};

/// Terminator byte appended after string content (lowest byte value).
pub const TERMINATOR_BYTE: u8 = 0x00;

/// Returns the encoded length of `data`: its content plus the terminator.
#[inline]
pub fn terminated_len(data: &[u8]) -> usize {
    data.len() + 1
}

/// Writes `data` followed by the terminator into `buf`.
///
/// # Panics
///
/// Panics if `buf` is shorter than `data.len() + 1`.
#[inline]
pub fn encode_bytes(buf: &mut [u8], data: &[u8]) {
    buf[..data.len()].copy_from_slice(data);
    buf[data.len()] = TERMINATOR_BYTE;
}

/// Writes the UTF-8 bytes of `value` followed by the terminator into `buf`.
///
/// # Panics
///
/// Panics if `buf` is shorter than `value.len() + 1`.
#[inline]
pub fn encode_str(buf: &mut [u8], value: &str) {
    encode_bytes(buf, value.as_bytes());
}

/// Returns the whole buffer minus its final (terminator) byte.
///
/// An empty buffer yields an empty slice.
#[inline]
pub fn decode_bytes(buf: &[u8]) -> &[u8] {
    &buf[..buf.len().saturating_sub(1)]
}

/// Returns the whole buffer minus its final byte as a string.
///
/// # Errors
///
/// Returns an error if the content is not valid UTF-8.
pub fn decode_str(buf: &[u8]) -> Result<&str> {
    to_str(decode_bytes(buf))
}

/// Returns the content before the first terminator, or `None` if `buf` has
/// no terminator.
#[inline]
pub fn scan_bytes(buf: &[u8]) -> Option<&[u8]> {
    buf.iter()
        .position(|&b| b == TERMINATOR_BYTE)
        .map(|end| &buf[..end])
}

/// Returns the string before the first terminator.
///
/// # Errors
///
/// Returns an error if `buf` has no terminator or the content is not valid
/// UTF-8.
pub fn scan_str(buf: &[u8]) -> Result<&str> {
    let content = scan_bytes(buf).ok_or_else(|| {
        Error::Encoding("unterminated string (missing 0x00 terminator)".to_string())
    })?;
    to_str(content)
}

fn to_str(content: &[u8]) -> Result<&str> {
    std::str::from_utf8(content).map_err(|e| Error::Encoding(format!("invalid UTF-8: {}", e)))
}
