//! Sigma-protocol zero-knowledge proofs over a prime-order subgroup of `Z_p*`.
//!
//! The crate provides three proofs of knowledge:
//!
//! - [`SchnorrProver`] / [`SchnorrVerifier`]: knowledge of `x` with `y = g^x`
//! - [`PedersenProver`] / [`PedersenVerifier`]: knowledge of `(x, r)` with `z = g^x h^r`
//! - [`GeneralizedPedersenProver`] / [`GeneralizedPedersenVerifier`]: knowledge
//!   of `(x_1, .., x_n, r)` with `z = g_1^x_1 .. g_n^x_n h^r`
//!
//! Any number of them can run under one challenge through [`MetaProver`] and
//! [`MetaVerifier`], and every prover/verifier pair doubles as a signature
//! scheme through the [`Signer`] and [`SignatureVerifier`] extension traits.
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use sigma_zkp::{GroupParameters, SchnorrProver, SecureRng, SignatureVerifier, Signer};
//!
//! let group = GroupParameters::new(BigUint::from(127u32), BigUint::from(7u32)).unwrap();
//! let mut prover = SchnorrProver::new(group, BigUint::from(2u32), BigUint::from(3u32)).unwrap();
//! let verifier = prover.verifier();
//!
//! let message = BigUint::from(42u32);
//! let signature = prover.sign(&message, &mut SecureRng::new()).unwrap();
//! assert!(verifier.verify_signature(&message, signature.values()));
//! ```

pub mod codec;
pub mod config;
mod error;
pub mod primitives;
pub mod protocol;

pub use codec::Proof;
pub use config::{GroupConfig, GroupSetup};
pub use error::Error;
pub use primitives::groups::{rfc5114_generator, rfc5114_group};
pub use primitives::{GroupParameters, SecureRng, Transcript, Zr, challenge, random_below};
pub use protocol::{
    Consumed, GeneralizedPedersenProver, GeneralizedPedersenVerifier, MetaProver, MetaVerifier,
    PedersenProver, PedersenVerifier, Prover, SchnorrProver, SchnorrVerifier, SignatureVerifier,
    Signer, Verifier,
};

/// Result type for library operations.
pub type Result<T> = core::result::Result<T, Error>;
