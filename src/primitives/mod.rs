//! Arithmetic and cryptographic building blocks shared by every protocol.
//!
//! - **exponent**: the exponent unit `Zr` and its single-use blinding
//! - **field**: modular helpers over `Z_q`
//! - **group**: public parameters of the prime-order subgroup of `Z_p*`
//! - **groups**: well-known parameter sets
//! - **rng**: secure randomness and the `random_below` draw
//! - **transcript**: hash-to-exponent challenge derivation

/// Exponent unit with per-round blinding.
pub mod exponent;
/// Modular arithmetic helpers.
pub mod field;
/// Group parameters and element arithmetic.
pub mod group;
/// Well-known group parameter sets.
pub mod groups;
/// Cryptographically secure random number generation.
pub mod rng;
/// Challenge derivation for Fiat-Shamir.
pub mod transcript;

pub use exponent::Zr;
pub use group::GroupParameters;
pub use rng::{SecureRng, random_below};
pub use transcript::{Transcript, challenge};
