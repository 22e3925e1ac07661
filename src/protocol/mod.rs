//! Sigma protocols over a prime-order subgroup of `Z_p*`.
//!
//! Every protocol is split into a stateful [`Prover`] and a stateless
//! [`Verifier`]. Commitments and responses travel as flat, untagged
//! sequences of integers; a verifier knows its own arity and consumes
//! exactly that many values from the front of each stream, handing the
//! remainder to whoever comes next. This is what lets [`MetaVerifier`]
//! check several statements against a single shared challenge.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::{trace, warn};

use crate::Result;

/// Multi-base commitment proof.
pub mod generalized;
/// Aggregation of several protocols under one challenge.
pub mod meta;
/// Single-base (Pedersen) commitment proof.
pub mod pedersen;
/// Schnorr identification.
pub mod schnorr;
/// Fiat-Shamir signing and signature verification.
pub mod signature;

pub use generalized::{GeneralizedPedersenProver, GeneralizedPedersenVerifier};
pub use meta::{MetaProver, MetaVerifier};
pub use pedersen::{PedersenProver, PedersenVerifier};
pub use schnorr::{SchnorrProver, SchnorrVerifier};
pub use signature::{SignatureVerifier, Signer};

/// Prover side of a Sigma protocol.
///
/// A round is `commit` followed by exactly one `prove`. Every `commit`
/// draws fresh blinding values; `prove` consumes them.
pub trait Prover {
    /// Order of the exponent ring challenges are reduced into.
    fn challenge_modulus(&self) -> &BigUint;

    /// First message: commitments to fresh blinding values.
    fn commit(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<BigUint>>;

    /// Third message: responses to `challenge` for the current round.
    fn prove(&mut self, challenge: &BigUint) -> Result<Vec<BigUint>>;
}

/// Result of consuming one protocol's slice of the commitment and response streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Consumed<'c, 'r> {
    /// Whether the recomputed commitment matched the published one.
    pub valid: bool,
    /// Commitments left for the next protocol.
    pub commitments: &'c [BigUint],
    /// Responses left for the next protocol.
    pub responses: &'r [BigUint],
}

impl<'c, 'r> Consumed<'c, 'r> {
    /// An invalid outcome that leaves both streams as they were.
    pub fn rejected(commitments: &'c [BigUint], responses: &'r [BigUint]) -> Self {
        Self {
            valid: false,
            commitments,
            responses,
        }
    }

    /// Whether both streams were consumed entirely.
    pub fn is_exhausted(&self) -> bool {
        self.commitments.is_empty() && self.responses.is_empty()
    }
}

/// Verifier side of a Sigma protocol.
pub trait Verifier {
    /// Order of the exponent ring challenges are reduced into.
    fn challenge_modulus(&self) -> &BigUint;

    /// Number of commitment values this protocol publishes.
    fn commitment_arity(&self) -> usize;

    /// Number of response values this protocol consumes.
    fn response_arity(&self) -> usize;

    /// Recomputes the commitments implied by `challenge` and the leading responses.
    ///
    /// Returns the recomputed commitments and the unconsumed responses, or
    /// `None` if fewer than [`Verifier::response_arity`] responses remain.
    fn recover_commitment<'r>(
        &self,
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Option<(Vec<BigUint>, &'r [BigUint])>;

    /// Checks this protocol's slice of the streams and returns the rest.
    ///
    /// Short streams are rejected without consuming anything. A mismatch
    /// still advances both streams past this protocol's slice.
    fn consume_verify<'c, 'r>(
        &self,
        commitments: &'c [BigUint],
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Consumed<'c, 'r> {
        let arity = self.commitment_arity();
        if commitments.len() < arity || responses.len() < self.response_arity() {
            warn!(
                commitments = commitments.len(),
                responses = responses.len(),
                "stream shorter than protocol arity"
            );
            return Consumed::rejected(commitments, responses);
        }

        let Some((recovered, rest)) = self.recover_commitment(challenge, responses) else {
            return Consumed::rejected(commitments, responses);
        };

        let (published, remaining) = commitments.split_at(arity);
        let valid = recovered.as_slice() == published;
        trace!(valid, "consumed protocol slice");

        Consumed {
            valid,
            commitments: remaining,
            responses: rest,
        }
    }

    /// Checks a complete transcript: valid, with nothing left over.
    fn verify(&self, commitments: &[BigUint], challenge: &BigUint, responses: &[BigUint]) -> bool {
        let consumed = self.consume_verify(commitments, challenge, responses);
        consumed.valid && consumed.is_exhausted()
    }
}

impl<P: Prover + ?Sized> Prover for Box<P> {
    fn challenge_modulus(&self) -> &BigUint {
        (**self).challenge_modulus()
    }

    fn commit(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<BigUint>> {
        (**self).commit(rng)
    }

    fn prove(&mut self, challenge: &BigUint) -> Result<Vec<BigUint>> {
        (**self).prove(challenge)
    }
}

impl<V: Verifier + ?Sized> Verifier for Box<V> {
    fn challenge_modulus(&self) -> &BigUint {
        (**self).challenge_modulus()
    }

    fn commitment_arity(&self) -> usize {
        (**self).commitment_arity()
    }

    fn response_arity(&self) -> usize {
        (**self).response_arity()
    }

    fn recover_commitment<'r>(
        &self,
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Option<(Vec<BigUint>, &'r [BigUint])> {
        (**self).recover_commitment(challenge, responses)
    }

    fn consume_verify<'c, 'r>(
        &self,
        commitments: &'c [BigUint],
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Consumed<'c, 'r> {
        (**self).consume_verify(commitments, challenge, responses)
    }
}
