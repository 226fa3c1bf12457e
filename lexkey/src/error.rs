//! Error types for lexkey operations.

/// Error type for encoding, decoding and key composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value's type has no order-preserving encoding, e.g. a record
    /// without any encodable fields.
    Unsupported(String),

    /// A nil value (`None`, `Value::Nil`) was supplied where a concrete value
    /// is required.
    Nil,

    /// The decode destination cannot be written through.
    InvalidDestination(String),

    /// Key composition was invoked without any values.
    NoValues,

    /// The buffer is shorter than the encoding requires.
    BufferTooShort { needed: usize, available: usize },

    /// The encoded bytes are not a valid value of the destination type.
    Encoding(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unsupported(msg) => write!(f, "Unsupported type: {}", msg),
            Error::Nil => write!(f, "Nil value"),
            Error::InvalidDestination(msg) => write!(f, "Invalid destination: {}", msg),
            Error::NoValues => write!(f, "No values to encode"),
            Error::BufferTooShort { needed, available } => write!(
                f,
                "Buffer too short: need {} bytes, have {}",
                needed, available
            ),
            Error::Encoding(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

/// Result type alias for lexkey operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_buffer_too_short_with_sizes() {
        // given
        let err = Error::BufferTooShort {
            needed: 8,
            available: 3,
        };

        // when
        let msg = err.to_string();

        // then
        assert_eq!(msg, "Buffer too short: need 8 bytes, have 3");
    }

    #[test]
    fn should_display_unsupported_with_type_name() {
        let err = Error::Unsupported("record `Empty` has no encodable fields".to_string());
        assert!(err.to_string().starts_with("Unsupported type:"));
        assert!(err.to_string().contains("Empty"));
    }
}
