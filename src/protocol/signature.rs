//! Fiat-Shamir transform over any [`Prover`] / [`Verifier`].
//!
//! A signature on message `m` is `responses ++ [c]` with
//! `c = Hash(q, [m] ++ commitments)`. The verifier recovers the commitments
//! from the responses and the trailing challenge, re-derives the challenge,
//! and accepts only on an exact match with no responses left over.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::debug;

use super::{Prover, Verifier};
use crate::primitives::transcript::Transcript;
use crate::{Proof, Result};

fn derive_challenge(modulus: &BigUint, message: &BigUint, commitments: &[BigUint]) -> BigUint {
    let mut transcript = Transcript::new();
    transcript.append(message);
    transcript.append_all(commitments);
    transcript.challenge(modulus)
}

/// Non-interactive signing for every prover.
pub trait Signer: Prover {
    /// Signs `message` with a fresh commitment.
    fn sign(&mut self, message: &BigUint, rng: &mut dyn CryptoRngCore) -> Result<Proof> {
        let commitments = self.commit(rng)?;
        let challenge = derive_challenge(self.challenge_modulus(), message, &commitments);
        let mut values = self.prove(&challenge)?;
        values.push(challenge);
        debug!(values = values.len(), "signature produced");
        Ok(Proof::new(values))
    }
}

impl<P: Prover + ?Sized> Signer for P {}

/// Non-interactive signature checking for every verifier.
pub trait SignatureVerifier: Verifier {
    /// Verifies `signature` over `message`.
    fn verify_signature(&self, message: &BigUint, signature: &[BigUint]) -> bool {
        let Some((challenge, responses)) = signature.split_last() else {
            return false;
        };
        if responses.len() != self.response_arity() {
            debug!(
                expected = self.response_arity() + 1,
                got = signature.len(),
                "signature length mismatch"
            );
            return false;
        }

        let Some((recovered, rest)) = self.recover_commitment(challenge, responses) else {
            return false;
        };
        if !rest.is_empty() {
            return false;
        }

        let valid = derive_challenge(self.challenge_modulus(), message, &recovered) == *challenge;
        debug!(valid, "signature verified");
        valid
    }
}

impl<V: Verifier + ?Sized> SignatureVerifier for V {}
