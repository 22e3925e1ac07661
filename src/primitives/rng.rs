//! Cryptographically secure random number generation.

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, CryptoRngCore, OsRng, RngCore};

use crate::{Error, Result};

/// Number of extra bytes drawn beyond the modulus width (128 bits of statistical slack).
const EXTRA_SECURITY_BYTES: usize = 16;

/// Cryptographically secure random number generator.
///
/// This is a thin wrapper around `OsRng` that provides a consistent interface
/// for cryptographic randomness throughout the library.
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new cryptographically secure random number generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

/// Draws a value uniformly (up to a 2^-128 bias) from `[0, modulus)`.
///
/// A failing source is reported as [`Error::RandomSource`]; no fallback value
/// is ever substituted.
pub fn random_below(rng: &mut dyn CryptoRngCore, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidParams("modulus cannot be zero".to_string()));
    }

    let byte_len = (modulus.bits() as usize).div_ceil(8) + EXTRA_SECURITY_BYTES;
    let mut buf = vec![0u8; byte_len];
    rng.try_fill_bytes(&mut buf)
        .map_err(|e| Error::RandomSource(e.to_string()))?;

    Ok(BigUint::from_bytes_be(&buf) % modulus)
}
