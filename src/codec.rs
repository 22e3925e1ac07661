//! Byte encoding of proof sequences.
//!
//! A proof on the wire is an ordered sequence of integers with no tags; the
//! protocol identity tells the reader how to split it. For storage and
//! transport the sequence is framed as
//! `[version (1 byte)][count (4 bytes)]{[len (4 bytes)][value]}*`, all big-endian.

use num_bigint::BigUint;

use crate::{Error, Result};

/// Encoding version for serialization compatibility.
const PROTOCOL_VERSION: u8 = 1;

/// Largest accepted encoding of a single value.
const MAX_VALUE_SIZE: usize = 4096;

/// Largest accepted number of values in one proof.
const MAX_VALUES: usize = 1024;

/// An ordered proof or signature: responses followed by the challenge.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Proof {
    values: Vec<BigUint>,
}

impl Proof {
    /// Wraps an ordered value sequence.
    pub fn new(values: Vec<BigUint>) -> Self {
        Self { values }
    }

    /// The ordered values.
    pub fn values(&self) -> &[BigUint] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the proof holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The trailing challenge of a signature.
    pub fn challenge(&self) -> Option<&BigUint> {
        self.values.last()
    }

    /// Unwraps into the value sequence.
    pub fn into_values(self) -> Vec<BigUint> {
        self.values
    }

    /// Serializes the proof to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.values.len() > MAX_VALUES {
            return Err(Error::MalformedProof(format!(
                "too many values: {}",
                self.values.len()
            )));
        }

        let mut result = Vec::with_capacity(5 + self.values.len() * 36);
        result.push(PROTOCOL_VERSION);
        result.extend_from_slice(&(self.values.len() as u32).to_be_bytes());

        for value in &self.values {
            let bytes = value.to_bytes_be();
            if bytes.len() > MAX_VALUE_SIZE {
                return Err(Error::MalformedProof(format!(
                    "value of {} bytes exceeds limit",
                    bytes.len()
                )));
            }
            result.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            result.extend_from_slice(&bytes);
        }

        Ok(result)
    }

    /// Deserializes a proof from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (&version, mut rest) = bytes
            .split_first()
            .ok_or_else(|| Error::MalformedProof("empty input".to_string()))?;
        if version != PROTOCOL_VERSION {
            return Err(Error::MalformedProof(format!(
                "Unsupported proof version: {}",
                version
            )));
        }

        let count = read_u32(&mut rest, "value count")?;
        if count > MAX_VALUES {
            return Err(Error::MalformedProof(format!("Invalid value count: {}", count)));
        }

        let mut values = Vec::with_capacity(count);
        for i in 0..count {
            let len = read_u32(&mut rest, "value length")?;
            if len == 0 || len > MAX_VALUE_SIZE {
                return Err(Error::MalformedProof(format!(
                    "Invalid length {} for value {}",
                    len, i
                )));
            }
            if rest.len() < len {
                return Err(Error::MalformedProof(format!(
                    "Truncated proof: incomplete value {}",
                    i
                )));
            }
            let (value, tail) = rest.split_at(len);
            values.push(BigUint::from_bytes_be(value));
            rest = tail;
        }

        if !rest.is_empty() {
            return Err(Error::MalformedProof(format!(
                "Proof has {} trailing bytes",
                rest.len()
            )));
        }

        Ok(Self { values })
    }

    /// Hex encoding of [`Proof::to_bytes`].
    pub fn to_hex(&self) -> Result<String> {
        Ok(hex::encode(self.to_bytes()?))
    }

    /// Parses the output of [`Proof::to_hex`].
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| Error::MalformedProof(format!("invalid hex: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

impl From<Vec<BigUint>> for Proof {
    fn from(values: Vec<BigUint>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[BigUint]> for Proof {
    fn as_ref(&self) -> &[BigUint] {
        &self.values
    }
}

fn read_u32(input: &mut &[u8], what: &str) -> Result<usize> {
    if input.len() < 4 {
        return Err(Error::MalformedProof(format!("Truncated proof: missing {what}")));
    }
    let (head, tail) = input.split_at(4);
    let mut buf = [0u8; 4];
    buf.copy_from_slice(head);
    *input = tail;
    Ok(u32::from_be_bytes(buf) as usize)
}
