use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::debug;

use super::{Prover, Verifier};
use crate::{Error, GroupParameters, Result, Zr};

/// Prover for knowledge of a Pedersen commitment opening.
///
/// Proves knowledge of `(x, r)` such that `z = g^x * h^r mod p`.
pub struct PedersenProver {
    group: GroupParameters,
    g: BigUint,
    h: BigUint,
    x: Zr,
    r: Zr,
}

impl PedersenProver {
    /// Creates a prover for the value `x` and blinding factor `r`, both in `[0, q)`.
    pub fn new(
        group: GroupParameters,
        g: BigUint,
        h: BigUint,
        x: BigUint,
        r: BigUint,
    ) -> Result<Self> {
        let x = Zr::new(x, group.q().clone())?;
        let r = Zr::new(r, group.q().clone())?;
        Ok(Self { group, g, h, x, r })
    }

    /// The public commitment `z = g^x * h^r mod p`.
    pub fn public_commitment(&self) -> BigUint {
        self.group
            .multi_pow([(&self.g, self.x.value()), (&self.h, self.r.value())])
    }

    /// A verifier for this prover's public commitment.
    pub fn verifier(&self) -> PedersenVerifier {
        PedersenVerifier::new(
            self.group.clone(),
            self.g.clone(),
            self.h.clone(),
            self.public_commitment(),
        )
    }
}

impl Prover for PedersenProver {
    fn challenge_modulus(&self) -> &BigUint {
        self.group.q()
    }

    fn commit(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<BigUint>> {
        let kx = self.x.commit(rng)?.clone();
        let kr = self.r.commit(rng)?;
        let commitment = self.group.multi_pow([(&self.g, &kx), (&self.h, kr)]);
        debug!("pedersen commitment issued");
        Ok(vec![commitment])
    }

    fn prove(&mut self, challenge: &BigUint) -> Result<Vec<BigUint>> {
        if !self.x.is_committed() || !self.r.is_committed() {
            return Err(Error::ProtocolState(
                "prove called without a preceding commit".to_string(),
            ));
        }
        // sx = (kx - c*x) mod q, sr = (kr - c*r) mod q
        let sx = self.x.prove(challenge)?;
        let sr = self.r.prove(challenge)?;
        debug!("pedersen responses issued");
        Ok(vec![sx, sr])
    }
}

/// Verifier for knowledge of a Pedersen commitment opening.
#[derive(Clone, Debug)]
pub struct PedersenVerifier {
    group: GroupParameters,
    g: BigUint,
    h: BigUint,
    z: BigUint,
}

impl PedersenVerifier {
    /// Creates a verifier for the public commitment `z`.
    pub fn new(group: GroupParameters, g: BigUint, h: BigUint, z: BigUint) -> Self {
        Self { group, g, h, z }
    }

    /// The public commitment being verified against.
    pub fn public_commitment(&self) -> &BigUint {
        &self.z
    }
}

impl Verifier for PedersenVerifier {
    fn challenge_modulus(&self) -> &BigUint {
        self.group.q()
    }

    fn commitment_arity(&self) -> usize {
        1
    }

    fn response_arity(&self) -> usize {
        2
    }

    fn recover_commitment<'r>(
        &self,
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Option<(Vec<BigUint>, &'r [BigUint])> {
        let [sx, sr, rest @ ..] = responses else {
            return None;
        };
        // g^sx * h^sr * z^c = g^(sx + cx) * h^(sr + cr) = g^kx * h^kr (mod p)
        let rv = self
            .group
            .multi_pow([(&self.g, sx), (&self.h, sr), (&self.z, challenge)]);
        Some((vec![rv], rest))
    }
}
