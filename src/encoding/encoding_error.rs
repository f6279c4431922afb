/// A worker id that is not one of the registered [crate::encoding::WorkerTag]s.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("invalid worker tag: {0}")]
pub struct InvalidTagError(pub u8);

/// Errors while turning a record into its armored wire representation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    /// NaN and +/- infinity have no agreed meaning on the receiving side and are rejected.
    #[error("{field} is not a finite number: {value}")]
    NonFiniteCoordinate {
        field: &'static str,
        value: f64,
    },
}

/// Errors while turning an armored buffer back into a record. All of these mean that the buffer
///  should be discarded; none of them leave any state behind.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer is not valid base64 (illegal character, wrong padding, ...)
    #[error("malformed armor: {0}")]
    Malformed(String),

    #[error("wrong payload length: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },

    #[error("invalid worker tag: {0}")]
    InvalidTag(u8),
}

impl From<InvalidTagError> for DecodeError {
    fn from(e: InvalidTagError) -> Self {
        DecodeError::InvalidTag(e.0)
    }
}

impl From<base64::DecodeError> for DecodeError {
    fn from(e: base64::DecodeError) -> Self {
        DecodeError::Malformed(e.to_string())
    }
}
