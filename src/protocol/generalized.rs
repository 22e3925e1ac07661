use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::debug;

use super::{Prover, Verifier};
use crate::{Error, GroupParameters, Result, Zr};

/// Prover for knowledge of a generalized Pedersen commitment opening.
///
/// Proves knowledge of `({x_1, .., x_n}, r)` such that
/// `z = g_1^x_1 * .. * g_n^x_n * h^r mod p`.
///
/// Commitments are a single combined value; responses are `n + 1` values,
/// one per base in declared order followed by the blinding response.
pub struct GeneralizedPedersenProver {
    group: GroupParameters,
    bases: Vec<BigUint>,
    h: BigUint,
    exponents: Vec<Zr>,
    r: Zr,
}

impl GeneralizedPedersenProver {
    /// Creates a prover for one secret per base plus the blinding factor `r`.
    pub fn new(
        group: GroupParameters,
        bases: Vec<BigUint>,
        h: BigUint,
        secrets: Vec<BigUint>,
        r: BigUint,
    ) -> Result<Self> {
        if bases.is_empty() {
            return Err(Error::InvalidParams("at least one base is required".to_string()));
        }
        if bases.len() != secrets.len() {
            return Err(Error::InvalidParams(format!(
                "{} bases but {} secrets",
                bases.len(),
                secrets.len()
            )));
        }

        let exponents = secrets
            .into_iter()
            .map(|x| Zr::new(x, group.q().clone()))
            .collect::<Result<Vec<_>>>()?;
        let r = Zr::new(r, group.q().clone())?;

        Ok(Self {
            group,
            bases,
            h,
            exponents,
            r,
        })
    }

    /// The public commitment `z = Π g_i^x_i * h^r mod p`.
    pub fn public_commitment(&self) -> BigUint {
        let terms = self
            .bases
            .iter()
            .zip(self.exponents.iter().map(Zr::value))
            .chain(std::iter::once((&self.h, self.r.value())));
        self.group.multi_pow(terms)
    }

    /// A verifier for this prover's public commitment.
    pub fn verifier(&self) -> Result<GeneralizedPedersenVerifier> {
        GeneralizedPedersenVerifier::new(
            self.group.clone(),
            self.bases.clone(),
            self.h.clone(),
            self.public_commitment(),
        )
    }

    fn all_committed(&self) -> bool {
        self.r.is_committed() && self.exponents.iter().all(Zr::is_committed)
    }
}

impl Prover for GeneralizedPedersenProver {
    fn challenge_modulus(&self) -> &BigUint {
        self.group.q()
    }

    fn commit(&mut self, rng: &mut dyn CryptoRngCore) -> Result<Vec<BigUint>> {
        let mut commitment = BigUint::from(1u32);
        for (base, x) in self.bases.iter().zip(self.exponents.iter_mut()) {
            let k = x.commit(rng)?;
            commitment = self.group.mul(&commitment, &self.group.pow(base, k));
        }
        let kr = self.r.commit(rng)?;
        commitment = self.group.mul(&commitment, &self.group.pow(&self.h, kr));

        debug!(bases = self.bases.len(), "generalized pedersen commitment issued");
        Ok(vec![commitment])
    }

    fn prove(&mut self, challenge: &BigUint) -> Result<Vec<BigUint>> {
        if !self.all_committed() {
            return Err(Error::ProtocolState(
                "prove called without a preceding commit".to_string(),
            ));
        }

        let mut responses = Vec::with_capacity(self.exponents.len() + 1);
        for x in &mut self.exponents {
            responses.push(x.prove(challenge)?);
        }
        responses.push(self.r.prove(challenge)?);

        debug!(responses = responses.len(), "generalized pedersen responses issued");
        Ok(responses)
    }
}

/// Verifier for knowledge of a generalized Pedersen commitment opening.
#[derive(Clone, Debug)]
pub struct GeneralizedPedersenVerifier {
    group: GroupParameters,
    bases: Vec<BigUint>,
    h: BigUint,
    z: BigUint,
}

impl GeneralizedPedersenVerifier {
    /// Creates a verifier for the public commitment `z` over `bases` and `h`.
    pub fn new(
        group: GroupParameters,
        bases: Vec<BigUint>,
        h: BigUint,
        z: BigUint,
    ) -> Result<Self> {
        if bases.is_empty() {
            return Err(Error::InvalidParams("at least one base is required".to_string()));
        }
        Ok(Self { group, bases, h, z })
    }

    /// The public commitment being verified against.
    pub fn public_commitment(&self) -> &BigUint {
        &self.z
    }

    /// Number of secret bases, excluding `h`.
    pub fn base_count(&self) -> usize {
        self.bases.len()
    }
}

impl Verifier for GeneralizedPedersenVerifier {
    fn challenge_modulus(&self) -> &BigUint {
        self.group.q()
    }

    fn commitment_arity(&self) -> usize {
        1
    }

    fn response_arity(&self) -> usize {
        self.bases.len() + 1
    }

    fn recover_commitment<'r>(
        &self,
        challenge: &BigUint,
        responses: &'r [BigUint],
    ) -> Option<(Vec<BigUint>, &'r [BigUint])> {
        let n = self.bases.len();
        if responses.len() < n + 1 {
            return None;
        }
        let (own, rest) = responses.split_at(n + 1);

        // Π g_i^s_i * h^sr * z^c = Π g_i^k_i * h^kr (mod p)
        let terms = self
            .bases
            .iter()
            .chain([&self.h, &self.z])
            .zip(own.iter().chain(std::iter::once(challenge)));
        let rv = self.group.multi_pow(terms);
        Some((vec![rv], rest))
    }
}
