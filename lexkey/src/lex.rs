//! Generic, type-driven encoding over the primitive codecs.
//!
//! [`Lex`] is implemented for every supported scalar, for strings, for the
//! pointer-like wrappers (`&T`, `&mut T`, `Box<T>`, `Option<T>`), for the
//! dynamic [`Value`](crate::Value), and for records via `#[derive(Lex)]`.
//! Tuples are anonymous records: every element is encoded, in order, and
//! every element is decoded.
//!
//! Type aliases (`type Year = i16;`) are the aliased type and need nothing
//! extra. Newtypes opt in with `#[derive(Lex)]` and `#[lex(transparent)]`.
//!
//! No type tag is written. The caller must decode with the same type that
//! produced the bytes.

use num_complex::{Complex32, Complex64};

use crate::error::{Error, Result};
use crate::record;
use crate::serde::sortable::{
    self, BOOL_WIDTH, CHAR_WIDTH, COMPLEX64_WIDTH, COMPLEX128_WIDTH, INT_WIDTH,
};
use crate::serde::terminated::{self, TERMINATOR_BYTE};

/// A value with an order-preserving binary encoding.
///
/// Encodings of two values of the same type compare bytewise in the same
/// order as the values themselves. The trait is object safe so that values of
/// different types can be composed into one key (see [`crate::build_key`]).
pub trait Lex {
    /// Returns the exact number of bytes [`Lex::lex_encode`] will write.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] if the value has no encoding (e.g. a record
    /// with no fields), [`Error::Nil`] if it is absent.
    fn lex_size(&self) -> Result<usize>;

    /// Writes the encoding to the front of `buf`, returning the number of
    /// bytes written.
    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize>;

    /// Reads a value from the front of `buf` into `self`, returning the
    /// number of bytes consumed.
    ///
    /// Strings are located by scanning for their terminator, so other values
    /// may follow them in `buf`.
    fn lex_decode(&mut self, buf: &[u8]) -> Result<usize>;

    /// Reads a value that occupies the whole of `buf`.
    ///
    /// Identical to [`Lex::lex_decode`] except for strings, which take every
    /// byte but the last without scanning.
    fn lex_decode_whole(&mut self, buf: &[u8]) -> Result<usize> {
        self.lex_decode(buf)
    }
}

/// Returns the number of bytes needed to encode `value`, or `None` if the
/// value is nil or of an unsupported type.
pub fn size<T: Lex + ?Sized>(value: &T) -> Option<usize> {
    value.lex_size().ok()
}

/// Encodes `value` into the front of `buf`.
///
/// Nothing is written unless the whole value fits.
///
/// ```
/// let mut buf = [0u8; 6];
/// lexkey::encode(&mut buf, &(42i16, 9.2f32)).unwrap();
/// assert_eq!(buf, [128, 42, 193, 19, 51, 51]);
///
/// let mut short = [0u8; 5];
/// assert!(lexkey::encode(&mut short, &(42i16, 9.2f32)).is_err());
/// assert_eq!(short, [0u8; 5]);
/// ```
pub fn encode<T: Lex + ?Sized>(buf: &mut [u8], value: &T) -> Result<()> {
    let needed = value.lex_size()?;
    check_len(buf, needed)?;
    value.lex_encode(buf)?;
    Ok(())
}

/// Decodes `buf` into `dest`.
///
/// When `dest` is a string, all of `buf` except the terminator is taken as
/// its content. Otherwise values are read field by field from the start of
/// `buf`.
pub fn decode<T: Lex + ?Sized>(buf: &[u8], dest: &mut T) -> Result<()> {
    dest.lex_decode_whole(buf)?;
    Ok(())
}

#[inline]
pub(crate) fn check_len(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(Error::BufferTooShort {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

macro_rules! fixed_width_lex {
    ($($ty:ty => $width:expr, $encode:path, $decode:path;)*) => {
        $(
            impl Lex for $ty {
                #[inline]
                fn lex_size(&self) -> Result<usize> {
                    Ok($width)
                }

                #[inline]
                fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
                    check_len(buf, $width)?;
                    $encode(buf, *self);
                    Ok($width)
                }

                #[inline]
                fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
                    check_len(buf, $width)?;
                    *self = $decode(buf);
                    Ok($width)
                }
            }
        )*
    };
}

fixed_width_lex! {
    bool => BOOL_WIDTH, sortable::encode_bool, sortable::decode_bool;
    u8 => 1, sortable::encode_u8, sortable::decode_u8;
    u16 => 2, sortable::encode_u16, sortable::decode_u16;
    u32 => 4, sortable::encode_u32, sortable::decode_u32;
    u64 => 8, sortable::encode_u64, sortable::decode_u64;
    usize => INT_WIDTH, sortable::encode_usize, sortable::decode_usize;
    i8 => 1, sortable::encode_i8, sortable::decode_i8;
    i16 => 2, sortable::encode_i16, sortable::decode_i16;
    i32 => 4, sortable::encode_i32, sortable::decode_i32;
    i64 => 8, sortable::encode_i64, sortable::decode_i64;
    isize => INT_WIDTH, sortable::encode_isize, sortable::decode_isize;
    f32 => 4, sortable::encode_f32, sortable::decode_f32;
    f64 => 8, sortable::encode_f64, sortable::decode_f64;
    Complex32 => COMPLEX64_WIDTH, sortable::encode_complex64, sortable::decode_complex64;
    Complex64 => COMPLEX128_WIDTH, sortable::encode_complex128, sortable::decode_complex128;
}

impl Lex for char {
    fn lex_size(&self) -> Result<usize> {
        Ok(CHAR_WIDTH)
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        check_len(buf, CHAR_WIDTH)?;
        sortable::encode_char(buf, *self);
        Ok(CHAR_WIDTH)
    }

    fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
        check_len(buf, CHAR_WIDTH)?;
        *self = sortable::decode_char(buf).ok_or_else(|| {
            Error::Encoding(format!(
                "invalid char code point: 0x{:08x}",
                sortable::decode_i32(buf)
            ))
        })?;
        Ok(CHAR_WIDTH)
    }
}

impl Lex for str {
    fn lex_size(&self) -> Result<usize> {
        Ok(terminated::terminated_len(self.as_bytes()))
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        let len = terminated::terminated_len(self.as_bytes());
        check_len(buf, len)?;
        if self.as_bytes().contains(&TERMINATOR_BYTE) {
            tracing::warn!(
                len = self.len(),
                "encoding string containing the 0x00 terminator; scans will stop early"
            );
        }
        terminated::encode_str(buf, self);
        Ok(len)
    }

    fn lex_decode(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(Error::InvalidDestination(
            "cannot decode into a borrowed str; use String".to_string(),
        ))
    }
}

impl Lex for String {
    fn lex_size(&self) -> Result<usize> {
        self.as_str().lex_size()
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        self.as_str().lex_encode(buf)
    }

    fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
        let value = terminated::scan_str(buf)?;
        self.clear();
        self.push_str(value);
        Ok(value.len() + 1)
    }

    fn lex_decode_whole(&mut self, buf: &[u8]) -> Result<usize> {
        check_len(buf, 1)?;
        let value = terminated::decode_str(buf)?;
        self.clear();
        self.push_str(value);
        Ok(buf.len())
    }
}

impl<T: Lex + ?Sized> Lex for &T {
    fn lex_size(&self) -> Result<usize> {
        (**self).lex_size()
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        (**self).lex_encode(buf)
    }

    fn lex_decode(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(Error::InvalidDestination(
            "cannot decode through a shared reference".to_string(),
        ))
    }
}

impl<T: Lex + ?Sized> Lex for &mut T {
    fn lex_size(&self) -> Result<usize> {
        (**self).lex_size()
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        (**self).lex_encode(buf)
    }

    fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).lex_decode(buf)
    }

    fn lex_decode_whole(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).lex_decode_whole(buf)
    }
}

impl<T: Lex + ?Sized> Lex for Box<T> {
    fn lex_size(&self) -> Result<usize> {
        (**self).lex_size()
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        (**self).lex_encode(buf)
    }

    fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).lex_decode(buf)
    }

    fn lex_decode_whole(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).lex_decode_whole(buf)
    }
}

/// `None` is a nil value: it has no size, cannot be encoded, and cannot be
/// decoded into.
impl<T: Lex> Lex for Option<T> {
    fn lex_size(&self) -> Result<usize> {
        self.as_ref().ok_or(Error::Nil)?.lex_size()
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        self.as_ref().ok_or(Error::Nil)?.lex_encode(buf)
    }

    fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
        self.as_mut().ok_or(Error::Nil)?.lex_decode(buf)
    }

    fn lex_decode_whole(&mut self, buf: &[u8]) -> Result<usize> {
        self.as_mut().ok_or(Error::Nil)?.lex_decode_whole(buf)
    }
}

/// The empty tuple is a record without fields and has no encoding.
impl Lex for () {
    fn lex_size(&self) -> Result<usize> {
        record::sized(0, "()")
    }

    fn lex_encode(&self, _buf: &mut [u8]) -> Result<usize> {
        record::sized(0, "()")
    }

    fn lex_decode(&mut self, _buf: &[u8]) -> Result<usize> {
        record::sized(0, "()")
    }
}

macro_rules! tuple_lex {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Lex),+> Lex for ($($name,)+) {
            fn lex_size(&self) -> Result<usize> {
                let mut sum = 0;
                $(sum += self.$idx.lex_size()?;)+
                record::sized(sum, "tuple")
            }

            fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
                let mut offset = 0;
                $(offset += self.$idx.lex_encode(record::tail_mut(buf, offset)?)?;)+
                record::sized(offset, "tuple")
            }

            fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
                let mut offset = 0;
                $(offset += self.$idx.lex_decode(record::tail(buf, offset)?)?;)+
                record::consumed(offset, "tuple")
            }
        }
    };
}

tuple_lex!(A.0);
tuple_lex!(A.0, B.1);
tuple_lex!(A.0, B.1, C.2);
tuple_lex!(A.0, B.1, C.2, D.3);
tuple_lex!(A.0, B.1, C.2, D.3, E.4);
tuple_lex!(A.0, B.1, C.2, D.3, E.4, F.5);
tuple_lex!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
tuple_lex!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    type AliasedInt = isize;

    fn encoded<T: Lex + ?Sized>(value: &T) -> Vec<u8> {
        let mut buf = vec![0u8; size(value).unwrap()];
        encode(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn should_match_primitive_encoding_when_written_side_by_side() {
        // given
        let mut expected = [0u8; 6];
        sortable::encode_i16(&mut expected, 42);
        sortable::encode_f32(&mut expected[2..], 9.2);

        // when
        let mut actual = [0u8; 6];
        encode(&mut actual, &42i16).unwrap();
        encode(&mut actual[2..], &9.2f32).unwrap();

        // then
        assert_eq!(actual, expected);
    }

    #[test]
    fn should_decode_side_by_side_values() {
        // given
        let mut buf = [0u8; 6];
        sortable::encode_i16(&mut buf, 42);
        sortable::encode_f32(&mut buf[2..], 9.2);

        // when
        let mut a = 0i16;
        let mut b = 0f32;
        decode(&buf, &mut a).unwrap();
        decode(&buf[2..], &mut b).unwrap();

        // then
        assert_eq!(a, 42);
        assert_eq!(b, 9.2);
    }

    #[test]
    fn should_treat_alias_as_underlying_type() {
        let alias: AliasedInt = 42;
        let mut expected = [0u8; 8];
        sortable::encode_isize(&mut expected, 42);

        assert_eq!(size(&alias), Some(8));
        assert_eq!(encoded(&alias), expected);
    }

    #[rstest]
    #[case(&true, 1)]
    #[case(&2i8, 1)]
    #[case(&3i16, 2)]
    #[case(&5i32, 4)]
    #[case(&8i64, 8)]
    #[case(&2u8, 1)]
    #[case(&3u16, 2)]
    #[case(&5u32, 4)]
    #[case(&8u64, 8)]
    #[case(&23f32, 4)]
    #[case(&46f64, 8)]
    #[case(&Complex32::new(1.0, 2.0), 8)]
    #[case(&Complex64::new(1.0, 2.0), 16)]
    #[case(&'x', 4)]
    #[case(&42isize, 8)]
    #[case(&42usize, 8)]
    #[case(&"howdy", 6)]
    fn should_report_size_matching_encoding(#[case] value: &dyn Lex, #[case] expected: usize) {
        assert_eq!(value.lex_size().unwrap(), expected);
        let mut buf = vec![0u8; expected];
        assert_eq!(value.lex_encode(&mut buf).unwrap(), expected);
    }

    #[test]
    fn should_resolve_through_pointers() {
        let value = 42i32;
        let boxed = Box::new(value);
        let some = Some(value);

        assert_eq!(size(&&value), Some(4));
        assert_eq!(encoded(&boxed), encoded(&value));
        assert_eq!(encoded(&some), encoded(&value));
    }

    #[test]
    fn should_report_nil_for_none() {
        // given
        let nil: Option<i32> = None;
        let mut buf = [0u8; 4];

        // then
        assert_eq!(size(&nil), None);
        assert_eq!(nil.lex_size(), Err(Error::Nil));
        assert_eq!(encode(&mut buf, &nil), Err(Error::Nil));
    }

    #[test]
    fn should_fail_to_decode_into_none() {
        let mut nil: Option<i32> = None;
        assert_eq!(decode(&[0x80, 0, 0, 42], &mut nil), Err(Error::Nil));
    }

    #[test]
    fn should_decode_through_some() {
        let mut dest = Some(0i32);
        decode(&[0x80, 0, 0, 42], &mut dest).unwrap();
        assert_eq!(dest, Some(42));
    }

    #[test]
    fn should_reject_shared_reference_destination() {
        // given
        let value = 0i32;
        let mut dest = &value;

        // when
        let result = decode(&[0x80, 0, 0, 42], &mut dest);

        // then
        assert!(matches!(result, Err(Error::InvalidDestination(_))));
        assert_eq!(value, 0);
    }

    #[test]
    fn should_not_write_when_buffer_too_short() {
        // given
        let mut buf = [0xAAu8; 3];

        // when
        let result = encode(&mut buf, &42u32);

        // then
        assert_eq!(
            result,
            Err(Error::BufferTooShort {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(buf, [0xAA; 3]);
    }

    #[test]
    fn should_fail_to_decode_short_buffer() {
        let mut dest = 0u64;
        let result = decode(&[1, 2, 3], &mut dest);
        assert!(matches!(result, Err(Error::BufferTooShort { needed: 8, .. })));
    }

    #[test]
    fn should_decode_whole_buffer_into_string() {
        // given
        let buf = encoded("howdy");
        let mut dest = String::new();

        // when
        decode(&buf, &mut dest).unwrap();

        // then
        assert_eq!(dest, "howdy");
    }

    #[test]
    fn should_scan_string_followed_by_other_values() {
        // given
        let mut buf = encoded("howdy");
        buf.extend(encoded(&42isize));
        buf.extend(encoded(&12.1f32));

        // when
        let mut s = String::new();
        let mut n: isize = 0;
        let mut f = 0f32;
        let mut offset = s.lex_decode(&buf).unwrap();
        offset += n.lex_decode(&buf[offset..]).unwrap();
        offset += f.lex_decode(&buf[offset..]).unwrap();

        // then
        assert_eq!(s, "howdy");
        assert_eq!(n, 42);
        assert_eq!(f, 12.1);
        assert_eq!(offset, buf.len());
    }

    #[test]
    fn should_reject_borrowed_str_destination() {
        let mut dest: Box<str> = "fixed".into();
        let result = dest.lex_decode(b"other\0");
        assert!(matches!(result, Err(Error::InvalidDestination(_))));
    }

    #[test]
    fn should_reject_invalid_char() {
        let mut dest = 'a';
        let mut buf = [0u8; 4];
        sortable::encode_i32(&mut buf, 0x11_0000);
        assert!(matches!(decode(&buf, &mut dest), Err(Error::Encoding(_))));
    }

    #[test]
    fn should_reject_empty_buffer_for_whole_string() {
        let mut dest = String::new();
        assert!(matches!(
            decode(&[], &mut dest),
            Err(Error::BufferTooShort { needed: 1, .. })
        ));
    }

    #[test]
    fn should_encode_tuple_fields_contiguously() {
        // given
        let value = (42isize, "hello".to_string(), 12.5f32);

        // when
        let buf = encoded(&value);

        // then
        let mut expected = [0u8; 18];
        sortable::encode_isize(&mut expected, 42);
        terminated::encode_str(&mut expected[8..], "hello");
        sortable::encode_f32(&mut expected[14..], 12.5);
        assert_eq!(buf, expected);

        let mut decoded = (0isize, String::new(), 0f32);
        decode(&buf, &mut decoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn should_reject_unit_as_empty_record() {
        assert_eq!(size(&()), None);
        assert!(matches!(().lex_size(), Err(Error::Unsupported(_))));
        assert!(matches!(encode(&mut [0u8; 4], &()), Err(Error::Unsupported(_))));
    }

    #[test]
    fn should_reject_tuple_containing_nil() {
        let value = (1u8, None::<u16>);
        assert_eq!(value.lex_size(), Err(Error::Nil));
    }

    proptest! {
        #[test]
        fn should_preserve_tuple_ordering(a: (i16, f32), b: (i16, f32)) {
            prop_assume!(!a.1.is_nan() && !b.1.is_nan());
            prop_assume!(a.1 != f32::NEG_INFINITY && b.1 != f32::NEG_INFINITY);
            let expected = a.0.cmp(&b.0).then(a.1.partial_cmp(&b.1).unwrap());
            prop_assert_eq!(expected, encoded(&a).cmp(&encoded(&b)));
        }

        #[test]
        fn should_roundtrip_i64_through_generic_codec(value: i64) {
            let buf = encoded(&value);
            let mut dest = 0i64;
            decode(&buf, &mut dest).unwrap();
            prop_assert_eq!(dest, value);
        }

        #[test]
        fn should_preserve_string_ordering(a in "[^\\x00]{0,16}", b in "[^\\x00]{0,16}") {
            prop_assert_eq!(a.cmp(&b), encoded(a.as_str()).cmp(&encoded(b.as_str())));
        }
    }
}
