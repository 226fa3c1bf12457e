//! Sortable fixed-width encoding for booleans and numbers.
//!
//! Every function in this module writes or reads a value of a single scalar
//! type into a caller-owned slice such that unsigned bytewise comparison of
//! two encodings matches the natural ordering of the values. Nothing is
//! allocated and no type information is written.
//!
//! ## Encoding Schemes
//!
//! ### Unsigned Integers
//!
//! Stored big-endian, most significant byte first. No transform is needed.
//!
//! ### Signed Integers
//!
//! XOR with the type's minimum value (flipping the sign bit) before the
//! big-endian store:
//! - `MIN` becomes `0x00...00` and sorts first
//! - `MAX` becomes `0xFF...FF` and sorts last
//! - Relative ordering within the negative and positive halves is unchanged
//!
//! ### Floating Point
//!
//! Hacker's Delight (2nd ed.) 17-3. Reinterpret the IEEE 754 bits as a signed
//! integer `n`:
//! - If `n >= 0` (sign bit clear): add the signed minimum, setting the high bit
//! - If `n < 0` (sign bit set): negate, which reverses the negative range
//!
//! The result is stored big-endian as an unsigned integer. Consequences that
//! callers can rely on:
//! - `-0.0` and `+0.0` encode identically
//! - `-inf` and `+inf` encode identically (negative infinity is folded onto
//!   positive infinity before the transform)
//! - Infinity sorts after `MAX`
//! - NaN of either sign sorts after infinity (its sign bit is cleared)
//!
//! ### Platform-Independent Integers
//!
//! `isize` and `usize` are always stored as their 64-bit form so that keys
//! are byte-identical across targets.
//!
//! ## Panics
//!
//! The `encode_*`/`decode_*` functions index the buffer directly and panic if
//! it is shorter than the type's width. Use [`crate::encode`] and
//! [`crate::decode`] for length-checked access.
//!
//! ```
//! use lexkey::serde::sortable::{decode_i16, encode_i16};
//!
//! let mut a = [0u8; 2];
//! let mut b = [0u8; 2];
//! encode_i16(&mut a, -42);
//! encode_i16(&mut b, 7);
//! assert!(a < b);
//! assert_eq!(decode_i16(&a), -42);
//! ```

use num_complex::{Complex32, Complex64};

/// Encoded width of `bool`.
pub const BOOL_WIDTH: usize = 1;

/// Encoded width of a single raw byte.
pub const BYTE_WIDTH: usize = 1;

/// Encoded width of `char`.
pub const CHAR_WIDTH: usize = 4;

/// Encoded width of `isize` and `usize`, regardless of target.
pub const INT_WIDTH: usize = 8;

/// Encoded width of `Complex32`.
pub const COMPLEX64_WIDTH: usize = 8;

/// Encoded width of `Complex64`.
pub const COMPLEX128_WIDTH: usize = 16;

/// Encodes a `bool` as a single byte: `1` for true, `0` for false.
#[inline]
pub fn encode_bool(buf: &mut [u8], value: bool) {
    buf[0] = u8::from(value);
}

/// Decodes a `bool` from a single byte. Only `1` reads as true.
#[inline]
pub fn decode_bool(buf: &[u8]) -> bool {
    buf[0] == 1
}

/// Encodes a single raw byte.
#[inline]
pub fn encode_byte(buf: &mut [u8], value: u8) {
    buf[0] = value;
}

/// Decodes a single raw byte.
#[inline]
pub fn decode_byte(buf: &[u8]) -> u8 {
    buf[0]
}

macro_rules! unsigned_codec {
    ($ty:ty, $width:literal, $encode:ident, $decode:ident) => {
        #[doc = concat!("Encodes a `", stringify!($ty), "` as ", stringify!($width), " big-endian bytes.")]
        #[inline]
        pub fn $encode(buf: &mut [u8], value: $ty) {
            buf[..$width].copy_from_slice(&value.to_be_bytes());
        }

        #[doc = concat!("Decodes a `", stringify!($ty), "` from ", stringify!($width), " big-endian bytes.")]
        #[inline]
        pub fn $decode(buf: &[u8]) -> $ty {
            let mut bytes = [0u8; $width];
            bytes.copy_from_slice(&buf[..$width]);
            <$ty>::from_be_bytes(bytes)
        }
    };
}

unsigned_codec!(u8, 1, encode_u8, decode_u8);
unsigned_codec!(u16, 2, encode_u16, decode_u16);
unsigned_codec!(u32, 4, encode_u32, decode_u32);
unsigned_codec!(u64, 8, encode_u64, decode_u64);

macro_rules! signed_codec {
    (
        $ty:ty, $uty:ty,
        $sortable:ident, $unsortable:ident,
        $encode:ident, $decode:ident,
        $encode_unsigned:ident, $decode_unsigned:ident
    ) => {
        #[doc = concat!("Maps an `", stringify!($ty), "` onto the `", stringify!($uty), "` range, preserving order.")]
        #[inline]
        pub const fn $sortable(value: $ty) -> $uty {
            (value ^ <$ty>::MIN) as $uty
        }

        #[doc = concat!("Inverse of [`", stringify!($sortable), "`].")]
        #[inline]
        pub const fn $unsortable(sortable: $uty) -> $ty {
            (sortable as $ty) ^ <$ty>::MIN
        }

        #[doc = concat!("Encodes an `", stringify!($ty), "` with its sign bit flipped, big-endian.")]
        #[inline]
        pub fn $encode(buf: &mut [u8], value: $ty) {
            $encode_unsigned(buf, $sortable(value));
        }

        #[doc = concat!("Decodes an `", stringify!($ty), "` written by [`", stringify!($encode), "`].")]
        #[inline]
        pub fn $decode(buf: &[u8]) -> $ty {
            $unsortable($decode_unsigned(buf))
        }
    };
}

signed_codec!(
    i8,
    u8,
    encode_i8_sortable,
    decode_i8_sortable,
    encode_i8,
    decode_i8,
    encode_u8,
    decode_u8
);
signed_codec!(
    i16,
    u16,
    encode_i16_sortable,
    decode_i16_sortable,
    encode_i16,
    decode_i16,
    encode_u16,
    decode_u16
);
signed_codec!(
    i32,
    u32,
    encode_i32_sortable,
    decode_i32_sortable,
    encode_i32,
    decode_i32,
    encode_u32,
    decode_u32
);
signed_codec!(
    i64,
    u64,
    encode_i64_sortable,
    decode_i64_sortable,
    encode_i64,
    decode_i64,
    encode_u64,
    decode_u64
);

/// Encodes a `usize` as 8 bytes on every target.
#[inline]
pub fn encode_usize(buf: &mut [u8], value: usize) {
    encode_u64(buf, value as u64);
}

/// Decodes a `usize` from 8 bytes. Values above `usize::MAX` truncate on
/// targets narrower than 64 bits.
#[inline]
pub fn decode_usize(buf: &[u8]) -> usize {
    decode_u64(buf) as usize
}

/// Encodes an `isize` as 8 bytes on every target.
#[inline]
pub fn encode_isize(buf: &mut [u8], value: isize) {
    encode_i64(buf, value as i64);
}

/// Decodes an `isize` from 8 bytes. Values outside the `isize` range
/// truncate on targets narrower than 64 bits.
#[inline]
pub fn decode_isize(buf: &[u8]) -> isize {
    decode_i64(buf) as isize
}

/// Encodes a `char` as its code point, using the `i32` transform.
#[inline]
pub fn encode_char(buf: &mut [u8], value: char) {
    encode_i32(buf, value as i32);
}

/// Decodes a `char`, returning `None` if the bytes do not hold a Unicode
/// scalar value.
#[inline]
pub fn decode_char(buf: &[u8]) -> Option<char> {
    char::from_u32(decode_i32(buf) as u32)
}

/// Encode an f32 value for sortable byte comparison.
///
/// Negative infinity is folded onto positive infinity and the sign bit of
/// any NaN is cleared first, so every NaN sorts after infinity. The result
/// should be written big-endian.
#[inline]
pub const fn encode_f32_sortable(value: f32) -> u32 {
    let mut bits = value.to_bits();
    if bits == f32::NEG_INFINITY.to_bits() {
        bits = f32::INFINITY.to_bits();
    } else if value.is_nan() {
        bits &= !(1 << 31);
    }
    let n = bits as i32;
    let n = if n >= 0 {
        n.wrapping_add(i32::MIN)
    } else {
        n.wrapping_neg()
    };
    n as u32
}

/// Decode a sortable-encoded u32 back to an f32 value.
#[inline]
pub const fn decode_f32_sortable(sortable: u32) -> f32 {
    let n = sortable as i32;
    let n = if n >= 0 {
        n.wrapping_neg()
    } else {
        n.wrapping_add(i32::MIN)
    };
    f32::from_bits(n as u32)
}

/// Encode an f64 value for sortable byte comparison.
///
/// Negative infinity is folded onto positive infinity and the sign bit of
/// any NaN is cleared first, so every NaN sorts after infinity. The result
/// should be written big-endian.
#[inline]
pub const fn encode_f64_sortable(value: f64) -> u64 {
    let mut bits = value.to_bits();
    if bits == f64::NEG_INFINITY.to_bits() {
        bits = f64::INFINITY.to_bits();
    } else if value.is_nan() {
        bits &= !(1 << 63);
    }
    let n = bits as i64;
    let n = if n >= 0 {
        n.wrapping_add(i64::MIN)
    } else {
        n.wrapping_neg()
    };
    n as u64
}

/// Decode a sortable-encoded u64 back to an f64 value.
#[inline]
pub const fn decode_f64_sortable(sortable: u64) -> f64 {
    let n = sortable as i64;
    let n = if n >= 0 {
        n.wrapping_neg()
    } else {
        n.wrapping_add(i64::MIN)
    };
    f64::from_bits(n as u64)
}

/// Encodes an `f32` as 4 bytes.
#[inline]
pub fn encode_f32(buf: &mut [u8], value: f32) {
    encode_u32(buf, encode_f32_sortable(value));
}

/// Decodes an `f32` from 4 bytes.
#[inline]
pub fn decode_f32(buf: &[u8]) -> f32 {
    decode_f32_sortable(decode_u32(buf))
}

/// Encodes an `f64` as 8 bytes.
#[inline]
pub fn encode_f64(buf: &mut [u8], value: f64) {
    encode_u64(buf, encode_f64_sortable(value));
}

/// Decodes an `f64` from 8 bytes.
#[inline]
pub fn decode_f64(buf: &[u8]) -> f64 {
    decode_f64_sortable(decode_u64(buf))
}

/// Encodes a `Complex32` as its real part followed by its imaginary part.
///
/// Encodings therefore sort by real part first, then imaginary part.
#[inline]
pub fn encode_complex64(buf: &mut [u8], value: Complex32) {
    encode_f32(buf, value.re);
    encode_f32(&mut buf[4..], value.im);
}

/// Decodes a `Complex32` from 8 bytes.
#[inline]
pub fn decode_complex64(buf: &[u8]) -> Complex32 {
    Complex32::new(decode_f32(buf), decode_f32(&buf[4..]))
}

/// Encodes a `Complex64` as its real part followed by its imaginary part.
#[inline]
pub fn encode_complex128(buf: &mut [u8], value: Complex64) {
    encode_f64(buf, value.re);
    encode_f64(&mut buf[8..], value.im);
}

/// Decodes a `Complex64` from 16 bytes.
#[inline]
pub fn decode_complex128(buf: &[u8]) -> Complex64 {
    Complex64::new(decode_f64(buf), decode_f64(&buf[8..]))
}
