//! Range helpers for scanning encoded keys in a sorted store.
//!
//! Because a key built from the leading fields of a tuple is a byte prefix of
//! every key built from the full tuple, "all keys whose year is 1994" is the
//! byte range `[key!(1994i16), lex_increment(key!(1994i16)))`.

use std::ops::Bound::{self, Excluded, Included, Unbounded};
use std::ops::RangeBounds;

use bytes::{Bytes, BytesMut};

/// Returns the smallest byte string strictly greater than every string that
/// starts with `data`.
///
/// Trailing `0xFF` bytes are dropped and the last remaining byte is bumped.
/// `None` when `data` is empty or all `0xFF`, in which case no finite upper
/// bound exists.
///
/// ```
/// use lexkey::bytes::lex_increment;
///
/// assert_eq!(lex_increment(&[0x80, 0x2A]).unwrap().as_ref(), &[0x80, 0x2B]);
/// assert_eq!(lex_increment(&[0x07, 0xFF]).unwrap().as_ref(), &[0x08]);
/// assert!(lex_increment(&[0xFF]).is_none());
/// ```
pub fn lex_increment(data: &[u8]) -> Option<Bytes> {
    let keep = data.iter().rposition(|&b| b != 0xFF)?;
    let mut next = BytesMut::from(&data[..=keep]);
    next[keep] += 1;
    Some(next.freeze())
}

/// A range of encoded keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BytesRange {
    pub start: Bound<Bytes>,
    pub end: Bound<Bytes>,
}

impl BytesRange {
    pub fn new(start: Bound<Bytes>, end: Bound<Bytes>) -> Self {
        Self { start, end }
    }

    /// Covers every key that starts with `prefix`.
    ///
    /// ```
    /// use lexkey::BytesRange;
    ///
    /// let range = BytesRange::prefix(lexkey::key!(1994i16).unwrap());
    /// assert!(range.contains(&lexkey::key!(1994i16, 9.2f32).unwrap()));
    /// assert!(!range.contains(&lexkey::key!(1995i16, 0f32).unwrap()));
    /// ```
    pub fn prefix(prefix: Bytes) -> Self {
        if prefix.is_empty() {
            return Self::unbounded();
        }
        let end = lex_increment(&prefix).map_or(Unbounded, Excluded);
        Self {
            start: Included(prefix),
            end,
        }
    }

    /// Covers keys from `start` (inclusive) up to every key that starts with
    /// `last`.
    ///
    /// Useful for seeks like "year in 1950..=1969" where `start` and `last`
    /// are keys built from the leading field only.
    pub fn through_prefix(start: Bytes, last: &[u8]) -> Self {
        let end = lex_increment(last).map_or(Unbounded, Excluded);
        Self {
            start: Included(start),
            end,
        }
    }

    /// Covers every key.
    pub fn unbounded() -> Self {
        Self {
            start: Unbounded,
            end: Unbounded,
        }
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        let above_start = match &self.start {
            Included(s) => key >= s.as_ref(),
            Excluded(s) => key > s.as_ref(),
            Unbounded => true,
        };
        let below_end = match &self.end {
            Included(e) => key <= e.as_ref(),
            Excluded(e) => key < e.as_ref(),
            Unbounded => true,
        };
        above_start && below_end
    }
}

impl RangeBounds<Bytes> for BytesRange {
    fn start_bound(&self) -> Bound<&Bytes> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&Bytes> {
        self.end.as_ref()
    }
}
