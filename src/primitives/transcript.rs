//! Challenge derivation for the Fiat-Shamir transform.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// Running hash of the values that determine a challenge.
///
/// Each value contributes its minimal big-endian encoding, in order. The
/// challenge is the digest read as an unsigned big-endian integer, reduced
/// modulo the exponent ring order.
#[derive(Clone, Default)]
pub struct Transcript(Sha256);

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    /// Appends one value.
    pub fn append(&mut self, value: &BigUint) {
        self.0.update(value.to_bytes_be());
    }

    /// Appends values in iteration order.
    pub fn append_all<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a BigUint>,
    {
        for value in values {
            self.append(value);
        }
    }

    /// Finalizes the transcript into a challenge in `[0, modulus)`.
    pub fn challenge(self, modulus: &BigUint) -> BigUint {
        let digest = self.0.finalize();
        BigUint::from_bytes_be(&digest) % modulus
    }
}

/// One-shot `Hash(modulus, values...)`.
pub fn challenge<'a, I>(modulus: &BigUint, values: I) -> BigUint
where
    I: IntoIterator<Item = &'a BigUint>,
{
    let mut transcript = Transcript::new();
    transcript.append_all(values);
    transcript.challenge(modulus)
}
