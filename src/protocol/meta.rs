//! Several Sigma protocols answering one shared challenge.
//!
//! [`MetaProver`] concatenates its sub-provers' commitments and responses in
//! list order. [`MetaVerifier`] decodes the concatenation positionally: each
//! sub-verifier consumes its own prefix and passes the remainder on. The two
//! lists must therefore be built in the same order with matching protocols.
//!
//! Sub-provers that share a secret must be given consistent values by the
//! caller; nothing here links them.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::debug;

use super::{Consumed, Prover, Verifier};
use crate::{Error, Result};

fn shared_modulus<'a, I>(moduli: I) -> Result<BigUint>
where
    I: IntoIterator<Item = &'a BigUint>,
{
    let mut moduli = moduli.into_iter();
    let first = moduli.next().ok_or_else(|| {
        Error::InvalidParams("aggregate requires at least one protocol".to_string())
    })?;
    if moduli.any(|q| q != first) {
        return Err(Error::ProtocolState(
            "sub-protocols use different challenge moduli".to_string(),
        ));
    }
    Ok(first.clone())
}

/// Runs sub-provers side by side under one challenge.
pub struct MetaProver {
    q: BigUint,
    subprovers: Vec<Box<dyn Prover>>,
}

impl MetaProver {
    /// Aggregates `subprovers`, which must all share the same challenge modulus.
    pub fn new(subprovers: Vec<Box<dyn Prover>>) -> Result<Self> {
        let q = shared_modulus(subprovers.iter().map(|p| p.challenge_modulus()))?;
        Ok(Self { q, subprovers })
    }

    /// Number of sub-provers.
    pub fn len(&self) -> usize {
        self.subprovers.len()
    }

    /// Always false; construction rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.subprovers.is_empty()
    }
}

impl Prover for MetaProver {
    fn challenge_modulus(&self) -> &BigUint {
        &self.q
    }

    fn commit(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<BigUint>> {
        let mut commitments = Vec::new();
        for prover in &mut self.subprovers {
            commitments.extend(prover.commit(rng)?);
        }
        debug!(
            subprovers = self.subprovers.len(),
            commitments = commitments.len(),
            "aggregate commitment issued"
        );
        Ok(commitments)
    }

    fn prove(&mut self, challenge: &BigUint) -> Result<Vec<BigUint>> {
        let mut responses = Vec::new();
        for prover in &mut self.subprovers {
            responses.extend(prover.prove(challenge)?);
        }
        debug!(responses = responses.len(), "aggregate responses issued");
        Ok(responses)
    }
}

/// Checks an aggregated transcript by threading it through sub-verifiers in order.
pub struct MetaVerifier {
    q: BigUint,
    subverifiers: Vec<Box<dyn Verifier>>,
}

impl MetaVerifier {
    /// Aggregates `subverifiers`, in the same order the proof was produced.
    pub fn new(subverifiers: Vec<Box<dyn Verifier>>) -> Result<Self> {
        let q = shared_modulus(subverifiers.iter().map(|v| v.challenge_modulus()))?;
        Ok(Self { q, subverifiers })
    }

    /// Number of sub-verifiers.
    pub fn len(&self) -> usize {
        self.subverifiers.len()
    }

    /// Always false; construction rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.subverifiers.is_empty()
    }

    /// Invalid outcome positioned after this aggregate's whole slice, or at
    /// the unchanged input when the streams are too short to hold it.
    fn skip_slice<'c, 'r>(
        &self,
        commitments: &'c [BigUint],
        responses: &'r [BigUint],
    ) -> Consumed<'c, 'r> {
        let comm_arity = self.commitment_arity();
        let resp_arity = self.response_arity();
        if commitments.len() < comm_arity || responses.len() < resp_arity {
            return Consumed::rejected(commitments, responses);
        }
        Consumed::rejected(&commitments[comm_arity..], &responses[resp_arity..])
    }
}

impl Verifier for MetaVerifier {
    fn challenge_modulus(&self) -> &BigUint {
        &self.q
    }

    fn commitment_arity(&self) -> usize {
        self.subverifiers.iter().map(|v| v.commitment_arity()).sum()
    }

    fn response_arity(&self) -> usize {
        self.subverifiers.iter().map(|v| v.response_arity()).sum()
    }

    fn recover_commitment<'r>(
        &self,
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Option<(Vec<BigUint>, &'r [BigUint])> {
        let mut recovered = Vec::with_capacity(self.commitment_arity());
        let mut rest = responses;
        for verifier in &self.subverifiers {
            let (commitments, tail) = verifier.recover_commitment(challenge, rest)?;
            recovered.extend(commitments);
            rest = tail;
        }
        Some((recovered, rest))
    }

    fn consume_verify<'c, 'r>(
        &self,
        commitments: &'c [BigUint],
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Consumed<'c, 'r> {
        let mut remaining = Consumed {
            valid: true,
            commitments,
            responses,
        };

        for (index, verifier) in self.subverifiers.iter().enumerate() {
            remaining =
                verifier.consume_verify(remaining.commitments, challenge, remaining.responses);
            if !remaining.valid {
                debug!(index, "sub-verifier rejected");
                return self.skip_slice(commitments, responses);
            }
        }

        debug!(subverifiers = self.subverifiers.len(), "aggregate slice accepted");
        remaining
    }
}
