//! Records are packed into a few raw bytes and then armored with base64 (standard alphabet,
//!  padded) so they survive channels that carry printable text only, e.g. a telemetry
//!  status-text field.

use std::fmt::{Debug, Formatter};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;

use crate::encoding::encoding_error::DecodeError;

/// Length of the armored representation of `raw_len` bytes
pub const fn armored_len(raw_len: usize) -> usize {
    raw_len.div_ceil(3) * 4
}

/// The armored representation of a single record. It is ASCII by construction.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct EncodedBuffer(String);

impl EncodedBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for EncodedBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncodedBuffer({:?})", self.0)
    }
}

impl AsRef<[u8]> for EncodedBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<EncodedBuffer> for Bytes {
    fn from(value: EncodedBuffer) -> Self {
        Bytes::from(value.0.into_bytes())
    }
}

pub fn armor(raw: &[u8]) -> EncodedBuffer {
    EncodedBuffer(BASE64.encode(raw))
}

/// Reverses [armor], checking that the result has exactly `expected_len` bytes.
///
/// Trailing NUL bytes are ignored: fixed-width text fields pad with them, and they are never
///  part of base64 output.
pub fn unarmor(armored: &[u8], expected_len: usize) -> Result<Vec<u8>, DecodeError> {
    let end = armored.iter()
        .rposition(|&b| b != 0)
        .map(|pos| pos + 1)
        .unwrap_or(0);

    let raw = BASE64.decode(&armored[..end])?;
    if raw.len() != expected_len {
        return Err(DecodeError::LengthMismatch {
            expected: expected_len,
            actual: raw.len(),
        });
    }
    Ok(raw)
}
