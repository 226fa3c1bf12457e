//! Dynamically typed values.
//!
//! [`Value`] is a closed set of the kinds lexkey can encode, for callers that
//! only learn the shape of a key at runtime (e.g. from a schema). Each variant
//! encodes exactly like the Rust type it wraps, so a `Value::I16(42)` and a
//! plain `42i16` produce identical bytes.
//!
//! When decoding, the variant acts as the type: the payload is overwritten
//! with the decoded value and the variant is left unchanged.

use num_complex::{Complex32, Complex64};

use crate::error::{Error, Result};
use crate::lex::Lex;
use crate::record;

/// A value of any encodable kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value. Cannot be encoded or decoded into.
    Nil,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Platform-independent unsigned integer, always 8 bytes.
    Usize(usize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    /// Platform-independent signed integer, always 8 bytes.
    Isize(isize),
    F32(f32),
    F64(f64),
    Complex64(Complex32),
    Complex128(Complex64),
    Char(char),
    Str(String),
    Record(Vec<Field>),
}

/// A named-or-positional field of a [`Value::Record`].
///
/// Every field is encoded. Only exported fields are decoded; private fields
/// are skipped without consuming any input, so a record with private fields
/// does not round-trip them.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub value: Value,
    pub exported: bool,
}

impl Field {
    /// Creates a field that is both encoded and decoded.
    pub fn exported(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            exported: true,
        }
    }

    /// Creates a field that is encoded but skipped on decode.
    pub fn private(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            exported: false,
        }
    }
}

impl Value {
    /// Creates a record whose fields are all exported.
    pub fn record<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Record(values.into_iter().map(Field::exported).collect())
    }

    /// Returns a short name for the kind of this value.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::Usize(_) => "usize",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Isize(_) => "isize",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Complex64(_) => "complex64",
            Value::Complex128(_) => "complex128",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Record(_) => "record",
        }
    }

    /// Returns true for [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrows the scalar payload as a `Lex` implementation.
    ///
    /// Returns `None` for `Nil` and records.
    fn scalar(&self) -> Option<&dyn Lex> {
        let lex: &dyn Lex = match self {
            Value::Nil | Value::Record(_) => return None,
            Value::Bool(v) => v,
            Value::U8(v) => v,
            Value::U16(v) => v,
            Value::U32(v) => v,
            Value::U64(v) => v,
            Value::Usize(v) => v,
            Value::I8(v) => v,
            Value::I16(v) => v,
            Value::I32(v) => v,
            Value::I64(v) => v,
            Value::Isize(v) => v,
            Value::F32(v) => v,
            Value::F64(v) => v,
            Value::Complex64(v) => v,
            Value::Complex128(v) => v,
            Value::Char(v) => v,
            Value::Str(v) => v,
        };
        Some(lex)
    }

    fn scalar_mut(&mut self) -> Option<&mut dyn Lex> {
        let lex: &mut dyn Lex = match self {
            Value::Nil | Value::Record(_) => return None,
            Value::Bool(v) => v,
            Value::U8(v) => v,
            Value::U16(v) => v,
            Value::U32(v) => v,
            Value::U64(v) => v,
            Value::Usize(v) => v,
            Value::I8(v) => v,
            Value::I16(v) => v,
            Value::I32(v) => v,
            Value::I64(v) => v,
            Value::Isize(v) => v,
            Value::F32(v) => v,
            Value::F64(v) => v,
            Value::Complex64(v) => v,
            Value::Complex128(v) => v,
            Value::Char(v) => v,
            Value::Str(v) => v,
        };
        Some(lex)
    }
}

impl Lex for Value {
    fn lex_size(&self) -> Result<usize> {
        match self {
            Value::Nil => Err(Error::Nil),
            Value::Record(fields) => {
                let mut sum = 0;
                for field in fields {
                    sum += field.value.lex_size()?;
                }
                record::sized(sum, "Value::Record")
            }
            other => other.scalar().ok_or(Error::Nil)?.lex_size(),
        }
    }

    fn lex_encode(&self, buf: &mut [u8]) -> Result<usize> {
        match self {
            Value::Nil => Err(Error::Nil),
            Value::Record(fields) => {
                let mut offset = 0;
                for field in fields {
                    offset += field.value.lex_encode(record::tail_mut(buf, offset)?)?;
                }
                record::sized(offset, "Value::Record")
            }
            other => other.scalar().ok_or(Error::Nil)?.lex_encode(buf),
        }
    }

    fn lex_decode(&mut self, buf: &[u8]) -> Result<usize> {
        match self {
            Value::Nil => Err(Error::InvalidDestination(
                "nil value carries no type to decode into".to_string(),
            )),
            Value::Record(fields) => {
                let mut offset = 0;
                for field in fields.iter_mut().filter(|f| f.exported) {
                    offset += field.value.lex_decode(record::tail(buf, offset)?)?;
                }
                record::consumed(offset, "Value::Record")
            }
            other => other.scalar_mut().ok_or(Error::Nil)?.lex_decode(buf),
        }
    }

    fn lex_decode_whole(&mut self, buf: &[u8]) -> Result<usize> {
        match self {
            Value::Str(s) => s.lex_decode_whole(buf),
            other => other.lex_decode(buf),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    f32 => F32,
    f64 => F64,
    Complex32 => Complex64,
    Complex64 => Complex128,
    char => Char,
    String => Str,
    Vec<Field> => Record,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
